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

//! Member (`.`) and index (`[]`) reads, dispatched on the runtime type of
//! the receiver.

use crate::error::{EvalResult, SwaziError};
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::helpers::to_index;
use crate::interpreter::Interpreter;
use crate::prototypes;
use crate::span::Span;
use crate::value::Value;

impl Interpreter {
    /// Reads `target.name`.
    ///
    /// Order: reflective properties (`aina`, `ninamba`, ...) on any value,
    /// then the property protocol for objects and class static tables, then
    /// the built-in member tables for strings, numbers and arrays.
    pub fn get_member(&self, target: &Value, name: &str, env: &EnvRef, span: Span) -> EvalResult<Value> {
        if let Some(value) = reflective_property(target, name) {
            return Ok(value);
        }

        match target {
            Value::Object(object) => self.get_object_property(object, name, env, span),
            Value::Class(class) => self.get_object_property(&class.static_table, name, env, span),
            Value::Null => Err(SwaziError::type_error(
                format!("Cannot read property '{}' of null", name),
                span,
            )),
            other => prototypes::member(other, name).ok_or_else(|| {
                SwaziError::type_error(
                    format!("Unknown property '{}' on a value of type `{}`", name, other.type_name()),
                    span,
                )
            }),
        }
    }

    /// Reads `target[index]`. Out-of-range reads are null; negative
    /// indices are not normalized here.
    pub fn get_index(&self, target: &Value, index: &Value, env: &EnvRef, span: Span) -> EvalResult<Value> {
        match target {
            Value::Array(items) => {
                let i = to_index(index, span)?;
                if i < 0 {
                    return Ok(Value::Null);
                }
                Ok(items.borrow().get(i as usize).cloned().unwrap_or(Value::Null))
            }
            Value::String(s) => {
                let i = to_index(index, span)?;
                if i < 0 {
                    return Ok(Value::Null);
                }
                Ok(s.chars()
                    .nth(i as usize)
                    .map(|c| Value::String(c.to_string()))
                    .unwrap_or(Value::Null))
            }
            Value::Object(object) => self.get_object_property(object, &value_to_string(index), env, span),
            Value::Class(class) => self.get_object_property(&class.static_table, &value_to_string(index), env, span),
            Value::Null => Err(SwaziError::type_error("Cannot index into null", span)),
            other => Err(SwaziError::type_error(
                format!("Cannot index into a value of type `{}`", other.type_name()),
                span,
            )),
        }
    }
}

/// `aina` and the `ni*` type predicates.
fn reflective_property(target: &Value, name: &str) -> Option<Value> {
    let is = |expected: &str| Some(Value::Bool(target.type_name() == expected));
    match name {
        "aina" => Some(Value::string(target.type_name())),
        "ninamba" => is("namba"),
        "nineno" => is("neno"),
        "nibool" => is("bool"),
        "niorodha" => is("orodha"),
        "nikazi" => is("kazi"),
        "niobject" => is("object"),
        "nimuundo" => is("muundo"),
        "ninull" => is("null"),
        _ => None,
    }
}
