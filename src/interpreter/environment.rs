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

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{EvalResult, SwaziError};
use crate::span::Span;
use crate::value::Value;

pub type EnvRef = Rc<RefCell<Environment>>;

/// Name the current receiver is bound under (`$`, `this`, `self`).
pub const RECEIVER: &str = "$";

/// Hidden binding naming the class a materialised method belongs to, used
/// to resolve `super.method(...)`. Not a valid identifier, so scripts can
/// never shadow it.
pub const OWNER_CLASS: &str = "@owner";

#[derive(Debug, Clone)]
pub struct Variable {
    pub value: Value,
    pub is_constant: bool,
}

impl Variable {
    pub fn mutable(value: Value) -> Self {
        Self {
            value,
            is_constant: false,
        }
    }

    pub fn constant(value: Value) -> Self {
        Self {
            value,
            is_constant: true,
        }
    }
}

/// One lexical scope frame.
///
/// Lookup walks to the root; `set` always binds in this frame. Only
/// [`Environment::assign`] walks the chain to mutate an existing binding.
pub struct Environment {
    values: HashMap<String, Variable>,
    parent: Option<EnvRef>,
}

impl Environment {
    pub fn new(parent: Option<EnvRef>) -> Self {
        Self {
            values: HashMap::new(),
            parent,
        }
    }

    /// Fresh root frame.
    pub fn global() -> EnvRef {
        Rc::new(RefCell::new(Environment::new(None)))
    }

    /// Fresh frame whose parent is `parent`.
    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment::new(Some(parent.clone()))))
    }

    pub fn parent(&self) -> Option<EnvRef> {
        self.parent.clone()
    }

    pub fn has(&self, name: &str) -> bool {
        if self.values.contains_key(name) {
            return true;
        }

        match &self.parent {
            Some(parent) => parent.borrow().has(name),
            None => false,
        }
    }

    /// Recursive lookup, failing with a reference error when exhausted.
    pub fn get(&self, name: &str, span: Span) -> EvalResult<Variable> {
        self.lookup(name)
            .ok_or_else(|| SwaziError::reference_error(format!("Undefined variable '{}'", name), span))
    }

    pub fn lookup(&self, name: &str) -> Option<Variable> {
        if let Some(var) = self.values.get(name) {
            return Some(var.clone());
        }

        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => None,
        }
    }

    /// Binds in this frame, replacing any local binding of the same name.
    pub fn set(&mut self, name: impl Into<String>, var: Variable) {
        self.values.insert(name.into(), var);
    }

    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.set(name, Variable::mutable(value));
    }

    pub fn define_constant(&mut self, name: impl Into<String>, value: Value) {
        self.set(name, Variable::constant(value));
    }

    /// Every receiver bound anywhere along the chain, innermost first.
    pub fn receivers(&self) -> Vec<Value> {
        let mut found = Vec::new();
        if let Some(var) = self.values.get(RECEIVER) {
            found.push(var.value.clone());
        }
        if let Some(parent) = &self.parent {
            found.extend(parent.borrow().receivers());
        }
        found
    }

    /// Chain-searching assignment: mutates the nearest existing binding,
    /// failing on constants; creates the binding in `env` if none exists.
    pub fn assign(env: &EnvRef, name: &str, value: Value, span: Span) -> EvalResult<()> {
        match Self::frame_of(env, name) {
            Some(frame) => {
                let mut frame = frame.borrow_mut();
                let var = frame
                    .values
                    .get_mut(name)
                    .ok_or_else(|| SwaziError::reference_error(format!("Undefined variable '{}'", name), span))?;

                if var.is_constant {
                    return Err(SwaziError::type_error(
                        format!("Cannot assign to constant '{}'", name),
                        span,
                    ));
                }
                var.value = value;
                Ok(())
            }
            None => {
                env.borrow_mut().define(name, value);
                Ok(())
            }
        }
    }

    /// The frame (starting at `env`) that owns `name`.
    pub fn frame_of(env: &EnvRef, name: &str) -> Option<EnvRef> {
        let mut current = Some(env.clone());
        while let Some(frame) = current {
            if frame.borrow().values.contains_key(name) {
                return Some(frame);
            }
            current = frame.borrow().parent.clone();
        }
        None
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn number(env: &EnvRef, name: &str) -> f64 {
        match env.borrow().get(name, Span::default()).map(|v| v.value) {
            Ok(Value::Number(n)) => n,
            other => panic!("expected number for {}, got {:?}", name, other),
        }
    }

    #[test]
    fn lookup_walks_to_root() {
        let root = Environment::global();
        root.borrow_mut().define("x", Value::Number(1.0));
        let inner = Environment::child(&Environment::child(&root));

        assert!(inner.borrow().has("x"));
        assert_eq!(number(&inner, "x"), 1.0);
    }

    #[test]
    fn missing_name_is_a_reference_error() {
        let root = Environment::global();
        let err = root.borrow().get("nope", Span::new(4, 2)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ReferenceError);
        assert_eq!(err.span, Span::new(4, 2));
    }

    #[test]
    fn set_shadows_instead_of_mutating_parent() {
        let root = Environment::global();
        root.borrow_mut().define("x", Value::Number(1.0));
        let inner = Environment::child(&root);
        inner.borrow_mut().define("x", Value::Number(2.0));

        assert_eq!(number(&inner, "x"), 2.0);
        assert_eq!(number(&root, "x"), 1.0);
    }

    #[test]
    fn assign_mutates_nearest_binding() {
        let root = Environment::global();
        root.borrow_mut().define("x", Value::Number(1.0));
        let inner = Environment::child(&root);

        Environment::assign(&inner, "x", Value::Number(5.0), Span::default()).unwrap();
        assert_eq!(number(&root, "x"), 5.0);
        assert!(!inner.borrow().values.contains_key("x"));
    }

    #[test]
    fn assign_creates_locally_when_unbound() {
        let root = Environment::global();
        let inner = Environment::child(&root);

        Environment::assign(&inner, "fresh", Value::Bool(true), Span::default()).unwrap();
        assert!(inner.borrow().values.contains_key("fresh"));
        assert!(!root.borrow().has("fresh"));
    }

    #[test]
    fn assign_to_constant_fails() {
        let root = Environment::global();
        root.borrow_mut().define_constant("PI", Value::Number(3.14));
        let inner = Environment::child(&root);

        let err = Environment::assign(&inner, "PI", Value::Number(3.0), Span::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
        assert_eq!(number(&root, "PI"), 3.14);
    }

    #[test]
    fn receivers_are_collected_innermost_first() {
        let root = Environment::global();
        root.borrow_mut().define(RECEIVER, Value::Number(1.0));
        let inner = Environment::child(&root);
        inner.borrow_mut().define(RECEIVER, Value::Number(2.0));

        let found: Vec<f64> = inner
            .borrow()
            .receivers()
            .into_iter()
            .map(|v| match v {
                Value::Number(n) => n,
                _ => f64::NAN,
            })
            .collect();
        assert_eq!(found, vec![2.0, 1.0]);
    }
}
