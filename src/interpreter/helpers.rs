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

//! Coercion and equality rules shared by operators and natives.

use std::rc::Rc;

use crate::error::{EvalResult, SwaziError};
use crate::interpreter::display::value_to_string;
use crate::span::Span;
use crate::value::Value;

/// Converts a value to a number.
///
/// Strings must be numeric in their entirety (surrounding whitespace is
/// ignored). Absence, arrays, objects, functions and classes never convert.
pub fn to_number(value: &Value, span: Span) -> EvalResult<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_number(s).ok_or_else(|| {
            SwaziError::value_error(format!("Cannot convert string '{}' to number", s), span)
        }),
        other => Err(SwaziError::type_error(
            format!("Cannot convert value of type `{}` to a number", other.type_name()),
            span,
        )),
    }
}

/// Parses a whole (trimmed) string as a number.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Truthiness. NaN is falsy.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Number(n) => !(*n == 0.0 || n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Bool(b) => *b,
        Value::Array(items) => !items.borrow().is_empty(),
        Value::Object(obj) => !obj.borrow().is_empty(),
        Value::Function(_) | Value::Class(_) => true,
    }
}

/// Coerces to an array index. Fractions truncate toward zero.
pub fn to_index(value: &Value, span: Span) -> EvalResult<i64> {
    let n = to_number(value, span)?;
    if n.is_nan() {
        return Err(SwaziError::type_error("Array index must be a number", span));
    }
    Ok(n.trunc() as i64)
}

/// Longest array an index write may grow to.
pub const MAX_ARRAY_LENGTH: usize = 1 << 24;

/// Longest string a native may build.
pub const MAX_STRING_LENGTH: usize = 1 << 28;

/// Loose (`==`) equality.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    loose_equals_in(a, b, &mut Vec::new())
}

/// Array pairs already being compared count as equal when revisited.
fn loose_equals_in(a: &Value, b: &Value, open: &mut Vec<(*const (), *const ())>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,

        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => match parse_number(s) {
            Some(parsed) => parsed == *n,
            None => value_to_string(&Value::Number(*n)) == *s,
        },

        (Value::Array(x), Value::Array(y)) => {
            if Rc::ptr_eq(x, y) {
                return true;
            }
            let pair = (Rc::as_ptr(x) as *const (), Rc::as_ptr(y) as *const ());
            if open.contains(&pair) {
                return true;
            }
            open.push(pair);
            let equal = {
                let (x, y) = (x.borrow(), y.borrow());
                x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| loose_equals_in(l, r, open))
            };
            open.pop();
            equal
        }

        (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
        (Value::Class(x), Value::Class(y)) => Rc::ptr_eq(x, y),

        _ => value_to_string(a) == value_to_string(b),
    }
}

/// Strict (`===`) equality: same tag, value equality for primitives and
/// identity for everything shared.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        _ => a.same_reference(b),
    }
}

/// Clamps a possibly negative slice bound into `0..=len`.
pub fn normalize_bound(index: i64, len: usize) -> usize {
    let len = len as i64;
    let resolved = if index < 0 { len + index } else { index };
    resolved.clamp(0, len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::ObjectValue;
    use pretty_assertions::assert_eq;

    fn arr(items: Vec<Value>) -> Value {
        Value::array(items)
    }

    #[test]
    fn string_to_number_requires_full_consumption() {
        assert_eq!(to_number(&Value::string(" 42 "), Span::default()).unwrap(), 42.0);
        assert_eq!(to_number(&Value::string("1.5e2"), Span::default()).unwrap(), 150.0);

        let err = to_number(&Value::string("12abc"), Span::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValueError);
        assert_eq!(err.message, "Cannot convert string '12abc' to number");
    }

    #[test]
    fn structured_values_do_not_convert() {
        let err = to_number(&arr(vec![]), Span::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
        assert_eq!(err.message, "Cannot convert value of type `orodha` to a number");

        assert!(to_number(&Value::Null, Span::default()).is_err());
        assert_eq!(to_number(&Value::Bool(true), Span::default()).unwrap(), 1.0);
    }

    #[test]
    fn truthiness() {
        assert!(!to_bool(&Value::Null));
        assert!(!to_bool(&Value::Number(0.0)));
        assert!(!to_bool(&Value::Number(f64::NAN)));
        assert!(to_bool(&Value::Number(-1.0)));
        assert!(!to_bool(&Value::string("")));
        assert!(to_bool(&Value::string("0")));
        assert!(!to_bool(&arr(vec![])));
        assert!(to_bool(&arr(vec![Value::Null])));
        assert!(!to_bool(&Value::object(ObjectValue::new())));
        assert!(to_bool(&Value::object(ObjectValue::from_pairs([("a", Value::Null)]))));
    }

    #[test]
    fn loose_equality_terminates_on_self_containing_arrays() {
        let a = arr(vec![Value::Number(1.0)]);
        let b = arr(vec![Value::Number(1.0)]);
        for v in [&a, &b] {
            if let Value::Array(items) = v {
                items.borrow_mut().push(v.clone());
            }
        }
        assert!(loose_equals(&a, &b));

        let c = arr(vec![Value::Number(2.0)]);
        if let Value::Array(items) = &c {
            items.borrow_mut().push(c.clone());
        }
        assert!(!loose_equals(&a, &c));
    }

    #[test]
    fn loose_equality_coerces_numeric_strings() {
        assert!(loose_equals(&Value::Number(1.0), &Value::string("1")));
        assert!(loose_equals(&Value::string(" 2.0"), &Value::Number(2.0)));
        assert!(!loose_equals(&Value::Number(1.0), &Value::string("one")));
        assert!(!loose_equals(&Value::Null, &Value::Number(0.0)));
    }

    #[test]
    fn loose_equality_is_deep_for_arrays() {
        let a = arr(vec![Value::Number(1.0), arr(vec![Value::Number(2.0), Value::Number(3.0)])]);
        let b = arr(vec![Value::Number(1.0), arr(vec![Value::Number(2.0), Value::Number(3.0)])]);
        assert!(loose_equals(&a, &b));
        assert!(!strict_equals(&a, &b));
        assert!(strict_equals(&a, &a.clone()));
    }

    #[test]
    fn strict_equality_requires_same_tag() {
        assert!(!strict_equals(&Value::Number(1.0), &Value::string("1")));
        assert!(strict_equals(&Value::string("x"), &Value::string("x")));
        assert!(!strict_equals(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
    }

    #[test]
    fn slice_bounds_wrap_negatives() {
        assert_eq!(normalize_bound(-1, 5), 4);
        assert_eq!(normalize_bound(-10, 5), 0);
        assert_eq!(normalize_bound(7, 5), 5);
    }
}
