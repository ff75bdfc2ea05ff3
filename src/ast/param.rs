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

use crate::ast::Expr;
use crate::span::Span;

/// Represents **one declared parameter** in a function, lambda, or method.
#[derive(Debug, Clone)]
pub struct Param {
    /// Parameter name (identifier)
    pub name: String,

    /// Optional default value, evaluated in the call's local scope so it
    /// may reference earlier parameters.
    pub default: Option<Expr>,

    /// `...name` collects remaining arguments into an array.
    pub is_rest: bool,

    /// For rest parameters: exact number of arguments to collect.
    /// Zero means "everything that is left".
    pub rest_required_count: usize,

    pub span: Span,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            is_rest: false,
            rest_required_count: 0,
            span: Span::default(),
        }
    }

    pub fn with_default(name: impl Into<String>, default: Expr) -> Self {
        Self {
            default: Some(default),
            ..Self::new(name)
        }
    }

    pub fn rest(name: impl Into<String>) -> Self {
        Self {
            is_rest: true,
            ..Self::new(name)
        }
    }

    /// `...name[count]`
    pub fn rest_exact(name: impl Into<String>, count: usize) -> Self {
        Self {
            is_rest: true,
            rest_required_count: count,
            ..Self::new(name)
        }
    }

    /// Number of arguments this parameter demands from the caller.
    pub fn required_count(&self) -> usize {
        if self.is_rest {
            self.rest_required_count
        } else if self.default.is_some() {
            0
        } else {
            1
        }
    }
}
