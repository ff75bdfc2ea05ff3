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

use tracing::debug;

use crate::error::EvalResult;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::helpers::to_number;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{ObjectValue, Value};

/// Installs the `swazi` namespace: `swazi.exit(code?)` and
/// `swazi.version`.
pub fn install(env: &EnvRef) {
    let namespace = ObjectValue::from_pairs([
        ("exit", Value::native("exit", swazi_exit)),
        ("version", Value::string(env!("CARGO_PKG_VERSION"))),
    ]);
    env.borrow_mut().define("swazi", Value::object(namespace));
}

/// Flushes program output, then terminates the process immediately.
/// Pending callbacks and timers are abandoned.
fn swazi_exit(interp: &Interpreter, args: Vec<Value>, _: &EnvRef, span: Span) -> EvalResult<Value> {
    let code = match args.first() {
        None | Some(Value::Null) => 0,
        Some(v) => to_number(v, span)? as i32,
    };
    debug!(code, "swazi.exit");
    interp.flush_output();
    std::process::exit(code)
}
