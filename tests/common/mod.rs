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

//! Helpers shared by the integration tests: run a program built with
//! `swazi::ast::build` and capture what it prints.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use swazi::ast::Stmt;
use swazi::interpreter::display::value_to_string;
use swazi::{Interpreter, InterpreterConfig, SwaziError, Value};

/// In-memory sink handed to `Interpreter::with_output`.
#[derive(Clone, Default)]
pub struct Output(Rc<RefCell<Vec<u8>>>);

impl Output {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn test_config() -> InterpreterConfig {
    InterpreterConfig::default().with_timer_slice(Duration::from_millis(5))
}

/// Runs `program` (including the event loop) and returns its result and
/// everything it printed.
pub fn run_with(config: InterpreterConfig, program: &[Stmt]) -> (Result<Value, SwaziError>, String) {
    let output = Output::default();
    let interp = Interpreter::with_config(config).with_output(output.clone());
    let result = interp.run(program);
    (result, output.text())
}

pub fn run(program: &[Stmt]) -> (Result<Value, SwaziError>, String) {
    run_with(test_config(), program)
}

/// Printed output of a program that must succeed.
pub fn output_of(program: &[Stmt]) -> String {
    let (result, output) = run(program);
    if let Err(err) = result {
        panic!("program failed: {} (output so far: {:?})", err, output);
    }
    output
}

/// The error of a program that must fail.
pub fn error_of(program: &[Stmt]) -> SwaziError {
    match run(program).0 {
        Ok(value) => panic!("program should have failed, returned {}", value_to_string(&value)),
        Err(err) => err,
    }
}
