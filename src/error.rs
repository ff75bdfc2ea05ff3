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

use std::fmt;

use thiserror::Error;

use crate::span::Span;

/// Result alias used by every evaluation entry point.
pub type EvalResult<T> = Result<T, SwaziError>;

/// Category of a runtime failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong value shape for an operation.
    TypeError,

    /// Malformed numeric conversion or malformed data.
    ValueError,

    /// Private / locked / readonly access violation.
    PermissionError,

    /// Malformed construct only detectable while running.
    SyntaxError,

    /// Undefined identifier.
    ReferenceError,

    DivisionByZero,
    ModuloByZero,

    /// Runtime limits (call depth) and other host-level failures.
    RuntimeError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ValueError => "ValueError",
            ErrorKind::PermissionError => "PermissionError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::DivisionByZero => "DivisionByZero",
            ErrorKind::ModuloByZero => "ModuloByZero",
            ErrorKind::RuntimeError => "RuntimeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single structured error raised by the evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct SwaziError {
    /// Error category
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Primary source location
    pub span: Span,

    /// Optional note / help text
    pub help: Option<String>,
}

impl SwaziError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            help: None,
        }
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::TypeError, message, span)
    }

    pub fn value_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::ValueError, message, span)
    }

    pub fn permission_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::PermissionError, message, span)
    }

    pub fn syntax_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::SyntaxError, message, span)
    }

    /// Reference error (undefined variable)
    pub fn reference_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::ReferenceError, message, span)
    }

    pub fn runtime_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::RuntimeError, message, span)
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Re-anchors an error raised without a useful location (natives report
    /// `Span::builtin()`) at the call site that triggered it.
    pub fn or_at(mut self, span: Span) -> Self {
        if self.span == Span::builtin() {
            self.span = span;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_kind_and_message() {
        let err = SwaziError::type_error("not callable", Span::new(3, 4));
        assert_eq!(err.to_string(), "TypeError: not callable");
    }

    #[test]
    fn or_at_only_replaces_builtin_spans() {
        let native = SwaziError::value_error("bad", Span::builtin()).or_at(Span::new(2, 1));
        assert_eq!(native.span, Span::new(2, 1));

        let located = SwaziError::value_error("bad", Span::new(7, 0)).or_at(Span::new(2, 1));
        assert_eq!(located.span, Span::new(7, 0));
    }
}
