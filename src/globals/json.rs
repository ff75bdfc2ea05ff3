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
use crate::interpreter::display::{json_to_value, value_to_json};
use crate::interpreter::environment::EnvRef;
use crate::interpreter::helpers::to_bool;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{ObjectValue, Value};

/// Installs the `json` namespace: `json.stringify(value, pretty?)` and
/// `json.parse(text)`.
pub fn install(env: &EnvRef) {
    let namespace = ObjectValue::from_pairs([
        ("stringify", Value::native("stringify", json_stringify)),
        ("parse", Value::native("parse", json_parse)),
    ]);
    env.borrow_mut().define("json", Value::object(namespace));
}

/// Compact by default; a truthy second argument pretty-prints.
fn json_stringify(_: &Interpreter, args: Vec<Value>, _: &EnvRef, span: Span) -> EvalResult<Value> {
    let value = args.first().cloned().unwrap_or(Value::Null);
    let pretty = args.get(1).map(to_bool).unwrap_or(false);

    let json = value_to_json(&value, span)?;
    let text = if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    }
    .map_err(|e| SwaziError::value_error(format!("Failed to serialize JSON: {}", e), span))?;

    Ok(Value::String(text))
}

fn json_parse(_: &Interpreter, args: Vec<Value>, _: &EnvRef, span: Span) -> EvalResult<Value> {
    let text = match args.first() {
        Some(Value::String(text)) => text,
        other => {
            return Err(SwaziError::type_error(
                format!(
                    "json.parse() expects a string, got `{}`",
                    other.map(Value::type_name).unwrap_or("nothing")
                ),
                span,
            ))
        }
    };

    let json: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| SwaziError::value_error(format!("Invalid JSON: {}", e), span))?;
    Ok(json_to_value(&json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::interpreter::display::value_to_string;
    use pretty_assertions::assert_eq;

    fn run(f: fn(&Interpreter, Vec<Value>, &EnvRef, Span) -> EvalResult<Value>, args: Vec<Value>) -> EvalResult<Value> {
        let interp = Interpreter::new();
        let env = interp.globals().clone();
        f(&interp, args, &env, Span::builtin())
    }

    #[test]
    fn parse_then_stringify_keeps_key_order() {
        let parsed = run(json_parse, vec![r#"{"z":1,"a":[true,null,"s"]}"#.into()]).unwrap();
        let text = run(json_stringify, vec![parsed]).unwrap();
        assert_eq!(value_to_string(&text), r#"{"z":1,"a":[true,null,"s"]}"#);
    }

    #[test]
    fn malformed_text_is_a_value_error() {
        let err = run(json_parse, vec!["{oops".into()]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValueError);
    }

    #[test]
    fn functions_cannot_be_serialized() {
        let f = Value::native("f", |_, _, _, _| Ok(Value::Null));
        let err = run(json_stringify, vec![f]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
    }
}
