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

use crate::error::EvalResult;
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::helpers::{to_bool, to_number};
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::Value;

/// Installs the type-name and conversion functions.
///
/// # Installed Functions
/// - `ainaya(v)` → type name (`namba`, `neno`, ...)
/// - `Namba(v)`  → number conversion, fails like arithmetic does
/// - `Neno(v)`   → string rendering
/// - `Bool(v)`   → truthiness
/// - `Orodha(...v)` → array of the arguments
pub fn install(env: &EnvRef) {
    let mut env = env.borrow_mut();
    env.define("ainaya", Value::native("ainaya", type_of));
    env.define("Namba", Value::native("Namba", to_namba));
    env.define("Neno", Value::native("Neno", to_neno));
    env.define("Bool", Value::native("Bool", to_bool_value));
    env.define("Orodha", Value::native("Orodha", |_, args, _, _| Ok(Value::array(args))));
}

fn first(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Null)
}

fn type_of(_: &Interpreter, args: Vec<Value>, _: &EnvRef, _: Span) -> EvalResult<Value> {
    Ok(Value::string(first(&args).type_name()))
}

fn to_namba(_: &Interpreter, args: Vec<Value>, _: &EnvRef, span: Span) -> EvalResult<Value> {
    Ok(Value::Number(to_number(&first(&args), span)?))
}

fn to_neno(_: &Interpreter, args: Vec<Value>, _: &EnvRef, _: Span) -> EvalResult<Value> {
    Ok(Value::String(value_to_string(&first(&args))))
}

fn to_bool_value(_: &Interpreter, args: Vec<Value>, _: &EnvRef, _: Span) -> EvalResult<Value> {
    Ok(Value::Bool(to_bool(&first(&args))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn call(name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let interp = Interpreter::new();
        let env = interp.globals().clone();
        let f = env.borrow().get(name, Span::builtin()).unwrap().value;
        interp.call_function(&f, args, &env, Span::builtin())
    }

    #[test]
    fn conversions() {
        assert_eq!(value_to_string(&call("ainaya", vec![Value::array(vec![])]).unwrap()), "orodha");
        assert_eq!(value_to_string(&call("Namba", vec![" 42 ".into()]).unwrap()), "42");
        assert_eq!(value_to_string(&call("Neno", vec![Value::Bool(false)]).unwrap()), "sikweli");
        assert_eq!(value_to_string(&call("Bool", vec!["".into()]).unwrap()), "sikweli");
        assert_eq!(
            value_to_string(&call("Orodha", vec![Value::Number(1.0), "a".into()]).unwrap()),
            r#"[ 1, "a" ]"#
        );
    }

    #[test]
    fn namba_rejects_non_numeric_text() {
        let err = call("Namba", vec!["12abc".into()]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValueError);
    }
}
