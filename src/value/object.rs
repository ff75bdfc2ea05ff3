/*
 * ==========================================================================
 * SWAZI - Lugha ya programu kwa Kiswahili
 * ==========================================================================
 *
 * Crate:    swazi (evaluator core)
 *
 * License:
 * This file is part of the Swazi programming language project.
 *
 * Swazi is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use indexmap::IndexMap;

use crate::span::Span;
use crate::value::Value;

/// Metadata attached to one object property alongside its value.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub value: Value,

    /// Readable and writable only from the owning receiver.
    pub is_private: bool,

    /// Never writable after creation. Readonly functions are getters.
    pub is_readonly: bool,

    /// Publicly readable, writable only from the owning receiver.
    pub is_locked: bool,

    /// Where the property was declared.
    pub span: Span,
}

impl PropertyDescriptor {
    /// A plain, public, writable property.
    pub fn public(value: Value, span: Span) -> Self {
        Self {
            value,
            is_private: false,
            is_readonly: false,
            is_locked: false,
            span,
        }
    }

    pub fn is_getter(&self) -> bool {
        self.is_readonly && matches!(self.value, Value::Function(_))
    }
}

/// Insertion-ordered property store shared by plain objects, class
/// instances and class static tables.
#[derive(Debug, Clone, Default)]
pub struct ObjectValue {
    pub properties: IndexMap<String, PropertyDescriptor>,

    /// Once set, every write through the property protocol is ignored.
    pub is_frozen: bool,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an object of public properties, mostly for native modules.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut object = Self::new();
        for (key, value) in pairs {
            object.define(key, value);
        }
        object
    }

    /// Inserts (or replaces) a public property, bypassing access checks.
    pub fn define(&mut self, key: impl Into<String>, value: Value) {
        self.properties
            .insert(key.into(), PropertyDescriptor::public(value, Span::builtin()));
    }

    pub fn insert(&mut self, key: impl Into<String>, descriptor: PropertyDescriptor) {
        self.properties.insert(key.into(), descriptor);
    }

    pub fn descriptor(&self, key: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(key)
    }

    /// Raw stored value, ignoring privacy and the getter convention.
    pub fn raw_get(&self, key: &str) -> Option<Value> {
        self.properties.get(key).map(|d| d.value.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Keys visible from outside the object (no private ones).
    pub fn public_keys(&self) -> Vec<String> {
        self.properties
            .iter()
            .filter(|(_, d)| !d.is_private)
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn clear(&mut self) {
        self.properties.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_insertion_order() {
        let object = ObjectValue::from_pairs([
            ("zeta", Value::Number(1.0)),
            ("alpha", Value::Number(2.0)),
            ("mid", Value::Number(3.0)),
        ]);
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn readonly_function_is_a_getter() {
        let getter = PropertyDescriptor {
            is_readonly: true,
            ..PropertyDescriptor::public(Value::native("g", |_, _, _, _| Ok(Value::Null)), Span::builtin())
        };
        assert!(getter.is_getter());

        let readonly_number = PropertyDescriptor {
            is_readonly: true,
            ..PropertyDescriptor::public(Value::Number(1.0), Span::builtin())
        };
        assert!(!readonly_number.is_getter());
    }

    #[test]
    fn public_keys_skip_private_properties() {
        let mut object = ObjectValue::new();
        object.define("shown", Value::Null);
        object.insert(
            "hidden",
            PropertyDescriptor {
                is_private: true,
                ..PropertyDescriptor::public(Value::Null, Span::builtin())
            },
        );
        assert_eq!(object.public_keys(), vec!["shown".to_string()]);
    }
}
