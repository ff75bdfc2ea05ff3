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

use std::fmt::Write;

use crate::error::SwaziError;
use crate::span::Span;

/// Renders compiler-style diagnostics for runtime errors.
///
/// The output is inspired by `rustc` diagnostics, but simplified and
/// designed to remain readable without color.
pub struct DiagnosticPrinter {
    /// Full source code of the file being interpreted.
    source: String,

    /// Name of the source file, used only for display.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Formats an error report.
    ///
    /// # Output Example
    /// ```text
    /// error[TypeError]: 'x' is not callable
    ///   --> main.swz:12:10
    ///    |
    ///  12 | data y = x(1)
    ///    |          ^
    /// help: Only functions can be called.
    /// ```
    pub fn render(&self, error: &SwaziError) -> String {
        let Span { line, column } = error.span;
        let mut out = String::new();

        let _ = writeln!(out, "error[{}]: {}", error.kind, error.message);
        let _ = writeln!(out, "  --> {}:{}:{}", self.file_name, line, column + 1);

        // Runtime-produced spans have no source line to show.
        if line > 0 {
            let src_line = self.source.lines().nth(line - 1).unwrap_or("");
            let _ = writeln!(out, "   |");
            let _ = writeln!(out, "{:>3} | {}", line, src_line);
            let _ = writeln!(out, "   | {}^", " ".repeat(column));
        }

        if let Some(help) = &error.help {
            let _ = writeln!(out, "help: {}", help);
        }

        out
    }

    /// Prints the rendered diagnostic to stderr.
    pub fn print(&self, error: &SwaziError) {
        eprint!("{}", self.render(error));
    }
}
