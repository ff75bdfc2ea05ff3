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

//! # Swazi
//!
//! Evaluator core of the Swazi scripting language: a tree-walking runtime
//! that executes an already-built syntax tree.
//!
//! ```no_run
//! use swazi::ast::build::*;
//! use swazi::Interpreter;
//!
//! let program = vec![
//!     var("jina", string("Dunia")),
//!     print(vec![template(&["Habari ", "!"], vec![ident("jina")])]),
//! ];
//!
//! Interpreter::new().run(&program).unwrap();
//! ```

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod globals;
pub mod interpreter;
pub mod logging;
pub mod prototypes;
pub mod span;
pub mod value;

pub use config::InterpreterConfig;
pub use diagnostics::DiagnosticPrinter;
pub use error::{ErrorKind, EvalResult, SwaziError};
pub use interpreter::environment::{EnvRef, Environment};
pub use interpreter::Interpreter;
pub use logging::init_tracing;
pub use span::Span;
pub use value::{ClassValue, FunctionValue, ObjectValue, PropertyDescriptor, Value};
