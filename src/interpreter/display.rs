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

use std::rc::Rc;

use crate::error::{EvalResult, SwaziError};
use crate::span::Span;
use crate::value::{ObjectRef, ObjectValue, Value};

/// Objects with at most this many simple properties print on one line.
const INLINE_PROPERTY_LIMIT: usize = 3;
const INLINE_WIDTH_LIMIT: usize = 80;

/// Property hidden from rendering and JSON; links an instance to its class.
pub const CLASS_LINK: &str = "__class__";

/// ============================================================================
/// value_to_string
/// ============================================================================
/// Converts a runtime `Value` into the text produced by `chapisha`, string
/// concatenation and template literals.
///
/// Examples:
///   - Number(3.0)      → "3"
///   - Bool(true)       → "kweli"
///   - Array([1,"a"])   → "[ 1, \"a\" ]"
///   - Function         → "[kazi name]"
///   - Class            → "[muundo Name]"
/// ============================================================================
pub fn value_to_string(val: &Value) -> String {
    match val {
        Value::Null => "null".to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::Bool(b) => bool_literal(*b).to_string(),
        Value::Function(f) => format!("[kazi {}]", f.name),
        Value::Class(c) => format!("[muundo {}]", c.name),
        Value::Array(_) | Value::Object(_) => Printer::default().render(val, 0),
    }
}

pub fn bool_literal(b: bool) -> &'static str {
    if b {
        "kweli"
    } else {
        "sikweli"
    }
}

/// Integral doubles (within 1e-12) print without a fraction.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if (n - n.round()).abs() < 1e-12 && n.abs() < 9.0e15 {
        return format!("{}", n.round() as i64);
    }
    format!("{}", n)
}

/// Renders nested arrays and objects, tracking the containers currently
/// being printed so cycles terminate.
#[derive(Default)]
struct Printer {
    open: Vec<usize>,
}

impl Printer {
    fn render(&mut self, val: &Value, depth: usize) -> String {
        match val {
            Value::String(s) => format!("{:?}", s),
            Value::Array(items) => {
                let id = Rc::as_ptr(items) as usize;
                if self.open.contains(&id) {
                    return "[/*cycle*/]".to_string();
                }
                self.open.push(id);
                let snapshot = items.borrow().clone();
                let out = if snapshot.is_empty() {
                    "[]".to_string()
                } else {
                    let parts: Vec<String> = snapshot.iter().map(|v| self.render(v, depth)).collect();
                    format!("[ {} ]", parts.join(", "))
                };
                self.open.pop();
                out
            }
            Value::Object(object) => self.render_object(object, depth),
            other => value_to_string(other),
        }
    }

    fn render_object(&mut self, object: &ObjectRef, depth: usize) -> String {
        let id = Rc::as_ptr(object) as usize;
        if self.open.contains(&id) {
            return "{/*cycle*/}".to_string();
        }
        self.open.push(id);

        let snapshot: ObjectValue = object.borrow().clone();
        let prefix = match snapshot.raw_get(CLASS_LINK) {
            Some(Value::Class(class)) => format!("{} ", class.name),
            _ => String::new(),
        };

        let mut entries = Vec::new();
        let mut all_simple = true;
        for (key, descriptor) in snapshot.properties.iter() {
            if descriptor.is_private || key == CLASS_LINK {
                continue;
            }
            let rendered = match &descriptor.value {
                Value::Function(_) if descriptor.is_readonly => "[getter]".to_string(),
                Value::Function(f) => format!("[tabia {}]", f.name),
                value => {
                    if matches!(value, Value::Array(_) | Value::Object(_)) {
                        all_simple = false;
                    }
                    self.render(value, depth + 1)
                }
            };
            entries.push(format!("{}: {}", key, rendered));
        }
        self.open.pop();

        if entries.is_empty() {
            return format!("{}{{}}", prefix);
        }

        let inline = format!("{}{{ {} }}", prefix, entries.join(", "));
        if entries.len() <= INLINE_PROPERTY_LIMIT && all_simple && inline.len() <= INLINE_WIDTH_LIMIT {
            return inline;
        }

        let indent = "  ".repeat(depth + 1);
        let closing = "  ".repeat(depth);
        let body: Vec<String> = entries.iter().map(|e| format!("{}{}", indent, e)).collect();
        format!("{}{{\n{}\n{}}}", prefix, body.join(",\n"), closing)
    }
}

/* ============================================================================
 * JSON bridge
 * ============================================================================
 */

/// Converts a runtime value into JSON.
///
/// Private properties and the class link are skipped, as are function
/// valued properties. Non-finite numbers become `null`.
pub fn value_to_json(val: &Value, span: Span) -> EvalResult<serde_json::Value> {
    let mut open = Vec::new();
    to_json(val, span, &mut open)
}

fn to_json(val: &Value, span: Span, open: &mut Vec<usize>) -> EvalResult<serde_json::Value> {
    Ok(match val {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Number(n) => number_to_json(*n),

        Value::Array(items) => {
            let id = Rc::as_ptr(items) as usize;
            if open.contains(&id) {
                return Err(SwaziError::type_error("Cannot serialize a cyclic structure", span));
            }
            open.push(id);
            let snapshot = items.borrow().clone();
            let mut out = Vec::with_capacity(snapshot.len());
            for item in &snapshot {
                out.push(to_json(item, span, open)?);
            }
            open.pop();
            serde_json::Value::Array(out)
        }

        Value::Object(object) => {
            let id = Rc::as_ptr(object) as usize;
            if open.contains(&id) {
                return Err(SwaziError::type_error("Cannot serialize a cyclic structure", span));
            }
            open.push(id);
            let snapshot = object.borrow().clone();
            let mut map = serde_json::Map::new();
            for (key, descriptor) in snapshot.properties.iter() {
                if descriptor.is_private || key == CLASS_LINK {
                    continue;
                }
                if matches!(descriptor.value, Value::Function(_)) {
                    continue;
                }
                map.insert(key.clone(), to_json(&descriptor.value, span, open)?);
            }
            open.pop();
            serde_json::Value::Object(map)
        }

        Value::Function(_) | Value::Class(_) => {
            return Err(SwaziError::type_error(
                format!("Cannot serialize a value of type `{}` to JSON", val.type_name()),
                span,
            ))
        }
    })
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Converts parsed JSON into fresh runtime values.
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::array(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::object(ObjectValue::from_pairs(
            map.iter().map(|(k, v)| (k.clone(), json_to_value(v))),
        )),
    }
}
