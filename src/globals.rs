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
 * Global Bindings
 * ---------------
 *
 * Everything a program can see without declaring it. Installed once into
 * the global environment when an `Interpreter` is created:
 *
 *  - conversions.rs → `ainaya`, `Namba`, `Neno`, `Bool`, `Orodha`
 *  - object.rs      → `Object.keys/values/entries/freeze/isFrozen`
 *  - json.rs        → `json.stringify/parse`
 *  - process.rs     → `swazi.exit`
 *  - timers         → see `interpreter::timers`
 */

pub mod conversions;
pub mod json;
pub mod object;
pub mod process;

use crate::interpreter::environment::EnvRef;
use crate::interpreter::timers::install_timers;

/// Installs every global binding into `env`.
pub fn install(env: &EnvRef) {
    conversions::install(env);
    object::install(env);
    json::install(env);
    process::install(env);
    install_timers(env);
}
