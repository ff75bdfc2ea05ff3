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

use std::rc::Rc;

use crate::ast::{ClassDecl, Expr, FunctionDecl, Pattern};
use crate::span::Span;

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// All executable statements.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /* ----------------------------- */
    /* EXPRESSIONS                   */
    /* ----------------------------- */
    Expression(Expr),

    /// `chapisha a, b` (newline) / `andika a, b` (no newline)
    Print {
        expressions: Vec<Expr>,
        newline: bool,
    },

    /* ----------------------------- */
    /* VARIABLES                     */
    /* ----------------------------- */
    /// `data x = ...` / `thabiti x = ...`
    VarDecl {
        target: Pattern,
        value: Option<Expr>,
        is_constant: bool,
    },

    /// `target = value` where target is an identifier, member or index.
    Assign {
        target: Expr,
        value: Expr,
    },

    /* ----------------------------- */
    /* FUNCTIONS & CLASSES           */
    /* ----------------------------- */
    Function(Rc<FunctionDecl>),
    Return(Option<Expr>),
    Class(Rc<ClassDecl>),

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */
    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },

    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Vec<Stmt>,
    },

    /// `kwa kila first, second katika iterable`
    ///
    /// Arrays and strings bind (element, index); objects bind (key, value).
    ForIn {
        first: String,
        second: Option<String>,
        iterable: Expr,
        body: Vec<Stmt>,
    },

    While {
        condition: Expr,
        body: Vec<Stmt>,
    },

    DoWhile {
        body: Vec<Stmt>,
        condition: Expr,
    },

    Break,
    Continue,
}
