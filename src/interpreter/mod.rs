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
 * Interpreter Entry & Runtime Bootstrap
 * -------------------------------------
 * This module is the **primary runtime entrypoint**. It is responsible for:
 *
 *  - Creating the global execution environment
 *  - Installing all built-in global functions and objects
 *  - Driving the main statement execution loop
 *  - Draining the async callback queue once the program completes
 *
 * All actual evaluation logic is delegated to the following submodules:
 *
 *  - statements.rs  → Statement execution (exec_stmt)
 *  - expressions.rs → Expression evaluation (eval_expr)
 *  - operators.rs   → Binary and compound operators
 *  - members.rs     → Member / index access and built-in member tables
 *  - properties.rs  → Object property protocol (privacy, getters, freeze)
 *  - calls.rs       → Function invocation and parameter binding
 *  - classes.rs     → Class declaration, `new`, `super` and delete
 *  - patterns.rs    → Destructuring declarations
 *  - timers.rs      → Async queue and timer threads
 *  - display.rs     → Value formatting utilities
 */

pub mod calls;
pub mod classes;
pub mod display;
pub mod environment;
pub mod expressions;
pub mod helpers;
pub mod members;
pub mod operators;
pub mod patterns;
pub mod properties;
pub mod statements;
pub mod timers;

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::ast::Stmt;
use crate::config::InterpreterConfig;
use crate::error::{EvalResult, SwaziError};
use crate::globals;
use crate::span::Span;
use crate::value::{ClassValue, Value};

use environment::{EnvRef, Environment};
use statements::ExecSignal;
use timers::Scheduler;

/// One runtime instance: global scope, scheduler and output sink.
///
/// The evaluator is single-threaded; only timer threads run alongside it
/// and they never touch script values.
pub struct Interpreter {
    globals: EnvRef,
    config: InterpreterConfig,
    scheduler: Scheduler,
    output: RefCell<Box<dyn Write>>,

    /// Class whose constructor is currently running, for `super(...)`.
    class_context: RefCell<Option<Rc<ClassValue>>>,
    call_depth: Cell<usize>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        let globals = Environment::global();
        globals::install(&globals);

        Self {
            globals,
            scheduler: Scheduler::new(config.timer_slice()),
            config,
            output: RefCell::new(Box::new(io::stdout())),
            class_context: RefCell::new(None),
            call_depth: Cell::new(0),
        }
    }

    /// Redirects print statements (stdout by default).
    pub fn with_output(self, writer: impl Write + 'static) -> Self {
        *self.output.borrow_mut() = Box::new(writer);
        self
    }

    pub fn globals(&self) -> &EnvRef {
        &self.globals
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Runs a program, then drains the async queue.
    ///
    /// Returns the value of a top-level `return`, or null.
    pub fn run(&self, program: &[Stmt]) -> EvalResult<Value> {
        let value = self.execute(program)?;
        self.run_event_loop();
        Ok(value)
    }

    /// Executes top-level statements without touching the async queue.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub fn execute(&self, program: &[Stmt]) -> EvalResult<Value> {
        for stmt in program {
            match self.exec_stmt(stmt, &self.globals)? {
                ExecSignal::None => {}
                ExecSignal::Return(value) => return Ok(value),
                ExecSignal::Break | ExecSignal::Continue => {
                    return Err(SwaziError::syntax_error("'break' or 'continue' outside of a loop", stmt.span))
                }
            }
        }
        Ok(Value::Null)
    }

    /// Drains queued callbacks until the queue is empty and no timers are
    /// live. Failing callbacks are logged and the loop carries on.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_event_loop(&self) {
        let mut executed = 0usize;
        while let Some(job) = self.scheduler.next_job() {
            let Some((callback, args)) = self.scheduler.take_callback(job) else {
                continue;
            };
            if callback.is_null() {
                continue;
            }

            executed += 1;
            if let Err(error) = self.call_function(&callback, args, &self.globals, Span::builtin()) {
                warn!(%error, ?job, "unhandled async callback error");
            }
            self.scheduler.reap();
        }
        self.scheduler.reap();
        debug!(executed, "event loop drained");
    }

    /// Writes program output (print statements).
    pub(crate) fn write_output(&self, text: &str, span: Span) -> EvalResult<()> {
        let mut out = self.output.borrow_mut();
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| SwaziError::runtime_error(format!("Failed to write output: {}", e), span))
    }

    pub(crate) fn flush_output(&self) {
        let _ = self.output.borrow_mut().flush();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
