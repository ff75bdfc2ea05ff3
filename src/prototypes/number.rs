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

use crate::error::{EvalResult, SwaziError};
use crate::interpreter::display::format_number;
use crate::interpreter::helpers::to_number;
use crate::prototypes::bound_method;
use crate::span::Span;
use crate::value::Value;

/// Number methods: `toFixed(digits)`, `abs()`, `round()`, `floor()`,
/// `ceil()` and `toString()`.
pub fn member(n: f64, name: &str) -> Option<Value> {
    let method: fn(&f64, &[Value], Span) -> EvalResult<Value> = match name {
        "toFixed" => number_to_fixed,
        "abs" => |n, _, _| Ok(Value::Number(n.abs())),
        "round" => |n, _, _| Ok(Value::Number(n.round())),
        "floor" => |n, _, _| Ok(Value::Number(n.floor())),
        "ceil" => |n, _, _| Ok(Value::Number(n.ceil())),
        "toString" => |n, _, _| Ok(Value::String(format_number(*n))),
        _ => return None,
    };
    Some(bound_method(name, n, method))
}

/// Fixed-point rendering with `digits` decimals (0 to 100).
fn number_to_fixed(n: &f64, args: &[Value], span: Span) -> EvalResult<Value> {
    let digits = match args.first() {
        None | Some(Value::Null) => 0.0,
        Some(v) => to_number(v, span)?,
    };
    if !(0.0..=100.0).contains(&digits) {
        return Err(SwaziError::value_error(
            format!("toFixed() digits must be between 0 and 100, got {}", format_number(digits)),
            span,
        ));
    }
    Ok(Value::String(format!("{:.*}", digits as usize, n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::interpreter::display::value_to_string;
    use crate::interpreter::Interpreter;
    use pretty_assertions::assert_eq;

    fn call(n: f64, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let interp = Interpreter::new();
        let env = interp.globals().clone();
        let method = member(n, name).expect("member exists");
        interp.call_function(&method, args, &env, Span::builtin())
    }

    #[test]
    fn to_fixed_pads_and_rounds() {
        assert_eq!(value_to_string(&call(3.14159, "toFixed", vec![Value::Number(2.0)]).unwrap()), "3.14");
        assert_eq!(value_to_string(&call(2.0, "toFixed", vec![Value::Number(3.0)]).unwrap()), "2.000");

        let err = call(1.0, "toFixed", vec![Value::Number(-1.0)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValueError);
    }

    #[test]
    fn rounding_family() {
        assert_eq!(value_to_string(&call(-2.5, "abs", vec![]).unwrap()), "2.5");
        assert_eq!(value_to_string(&call(2.4, "ceil", vec![]).unwrap()), "3");
        assert_eq!(value_to_string(&call(2.6, "floor", vec![]).unwrap()), "2");
        assert_eq!(value_to_string(&call(2.5, "round", vec![]).unwrap()), "3");
    }

    #[test]
    fn to_string_uses_language_formatting() {
        assert_eq!(value_to_string(&call(7.0, "toString", vec![]).unwrap()), "7");
    }
}
