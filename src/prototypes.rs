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

/*!
 * Built-in Member Tables
 * ----------------------
 *
 * Methods reachable through `.` on strings, numbers and arrays. Each
 * lookup synthesizes a native function closing over the receiver, so
 * `let f = s.upper; f()` keeps working on the original value.
 */

pub mod array;
pub mod number;
pub mod regex;
pub mod string;

use crate::error::EvalResult;
use crate::span::Span;
use crate::value::Value;

/// Looks up a built-in member on a primitive or array receiver.
///
/// Returns `None` when the receiver type has no such member; objects,
/// classes and null are handled by the caller.
pub fn member(receiver: &Value, name: &str) -> Option<Value> {
    match receiver {
        Value::String(s) => string::member(s, name),
        Value::Number(n) => number::member(*n, name),
        Value::Array(items) => array::member(items, name),
        _ => None,
    }
}

/// Wraps a receiver-bound method that needs neither the interpreter nor
/// the calling environment.
pub(crate) fn bound_method<R, F>(name: &str, receiver: R, f: F) -> Value
where
    R: 'static,
    F: Fn(&R, &[Value], Span) -> EvalResult<Value> + 'static,
{
    Value::native(name, move |_, args, _, span| f(&receiver, &args, span))
}
