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
use crate::interpreter::environment::EnvRef;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{ObjectRef, ObjectValue, Value};

/// Creates and installs the global `Object` namespace.
///
/// # Installed Functions
/// - `Object.keys(obj)`
/// - `Object.values(obj)`
/// - `Object.entries(obj)`
/// - `Object.freeze(obj)`
/// - `Object.isFrozen(obj)`
///
/// Private properties never show up in keys, values or entries.
pub fn install(env: &EnvRef) {
    let namespace = ObjectValue::from_pairs([
        ("keys", Value::native("keys", object_keys)),
        ("values", Value::native("values", object_values)),
        ("entries", Value::native("entries", object_entries)),
        ("freeze", Value::native("freeze", object_freeze)),
        ("isFrozen", Value::native("isFrozen", object_is_frozen)),
    ]);
    env.borrow_mut().define("Object", Value::object(namespace));
}

/// Objects, and the static table behind a class.
fn target(args: &[Value], method: &str, span: Span) -> EvalResult<ObjectRef> {
    match args.first() {
        Some(Value::Object(object)) => Ok(object.clone()),
        Some(Value::Class(class)) => Ok(class.static_table.clone()),
        other => Err(SwaziError::type_error(
            format!(
                "Object.{}() requires an object, got `{}`",
                method,
                other.map(Value::type_name).unwrap_or("nothing")
            ),
            span,
        )),
    }
}

/// Public `(key, value)` pairs in insertion order. Values are read through
/// the property protocol, so getters run.
fn public_entries(interp: &Interpreter, object: &ObjectRef, env: &EnvRef, span: Span) -> EvalResult<Vec<(String, Value)>> {
    let keys = object.borrow().public_keys();
    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        let value = interp.get_object_property(object, &key, env, span)?;
        entries.push((key, value));
    }
    Ok(entries)
}

fn object_keys(_: &Interpreter, args: Vec<Value>, _: &EnvRef, span: Span) -> EvalResult<Value> {
    let object = target(&args, "keys", span)?;
    let keys = object.borrow().public_keys();
    Ok(Value::array(keys.into_iter().map(Value::String).collect()))
}

fn object_values(interp: &Interpreter, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
    let object = target(&args, "values", span)?;
    let values = public_entries(interp, &object, env, span)?
        .into_iter()
        .map(|(_, value)| value)
        .collect();
    Ok(Value::array(values))
}

/// `[[key, value], ...]`
fn object_entries(interp: &Interpreter, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
    let object = target(&args, "entries", span)?;
    let entries = public_entries(interp, &object, env, span)?
        .into_iter()
        .map(|(key, value)| Value::array(vec![Value::String(key), value]))
        .collect();
    Ok(Value::array(entries))
}

/// Freezes in place and returns the same object.
fn object_freeze(_: &Interpreter, args: Vec<Value>, _: &EnvRef, span: Span) -> EvalResult<Value> {
    let object = target(&args, "freeze", span)?;
    object.borrow_mut().is_frozen = true;
    Ok(args.into_iter().next().unwrap_or(Value::Null))
}

fn object_is_frozen(_: &Interpreter, args: Vec<Value>, _: &EnvRef, span: Span) -> EvalResult<Value> {
    let object = target(&args, "isFrozen", span)?;
    let frozen = object.borrow().is_frozen;
    Ok(Value::Bool(frozen))
}
