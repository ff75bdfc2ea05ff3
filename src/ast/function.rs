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

use crate::ast::{Param, Stmt};
use crate::span::Span;

/// A function body together with its parameter list.
///
/// Shared through `Rc` by function declarations, function expressions,
/// object literal methods and class methods.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub span: Span,
    min_arity: usize,
}

impl FunctionDecl {
    pub fn new(name: Option<String>, params: Vec<Param>, body: Vec<Stmt>, span: Span) -> Self {
        let min_arity = params.iter().map(Param::required_count).sum();
        Self {
            name,
            params,
            body,
            span,
            min_arity,
        }
    }

    /// Required singles plus every rest parameter's required count.
    pub fn min_arity(&self) -> usize {
        self.min_arity
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anon>")
    }
}
