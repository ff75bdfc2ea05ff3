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

use crate::ast::function::FunctionDecl;
use crate::span::Span;

/// An expression node plus the location it was parsed from.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Moves the node to a new source location (builder-style).
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// All expression forms understood by the evaluator.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /* ----------------------------- */
    /* LITERALS                      */
    /* ----------------------------- */
    Number(f64),
    String(String),
    Bool(bool),
    Null,

    /// `` `a ${x} b` `` -> quasis `["a ", " b"]`, expressions `[x]`.
    Template {
        quasis: Vec<String>,
        expressions: Vec<Expr>,
    },

    Array(Vec<Expr>),
    Object(Vec<ObjectMember>),

    /// Function expression or lambda.
    Function(Rc<FunctionDecl>),

    /* ----------------------------- */
    /* NAMES                         */
    /* ----------------------------- */
    Identifier(String),

    /// `$`, `this` or `self`.
    Receiver,

    /* ----------------------------- */
    /* OPERATORS                     */
    /* ----------------------------- */
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `++`, `--`, `+=`, `-=`, `*=`. `value` is `None` for `++` / `--`.
    Update {
        op: UpdateOp,
        target: Box<Expr>,
        value: Option<Box<Expr>>,
    },

    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    /// `...expr` inside array literals and argument lists.
    Spread(Box<Expr>),

    /* ----------------------------- */
    /* ACCESS & CALLS                */
    /* ----------------------------- */
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        optional: bool,
    },

    Member {
        object: Box<Expr>,
        property: String,
        optional: bool,
    },

    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        optional: bool,
    },

    /* ----------------------------- */
    /* CLASSES                       */
    /* ----------------------------- */
    New {
        class: Box<Expr>,
        args: Vec<Expr>,
    },

    /// `super(args)` when `method` is `None`, otherwise `super.method(args)`.
    Super {
        method: Option<String>,
        args: Vec<Expr>,
    },

    /// `futa target(args)`
    Delete {
        target: Box<Expr>,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,

    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
}

impl UpdateOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
            UpdateOp::AddAssign => "+=",
            UpdateOp::SubtractAssign => "-=",
            UpdateOp::MultiplyAssign => "*=",
        }
    }
}

/// One entry of an object literal.
#[derive(Debug, Clone)]
pub enum ObjectMember {
    Property(PropertyNode),

    /// `{ ...other }` (object sources only).
    Spread(Expr),
}

#[derive(Debug, Clone)]
pub enum PropertyKey {
    Named(String),

    /// `{ [expr]: value }`, key is stringified.
    Computed(Expr),
}

/// A `key: value` pair in an object literal along with its descriptor flags.
#[derive(Debug, Clone)]
pub struct PropertyNode {
    pub key: PropertyKey,
    pub value: Expr,
    pub is_private: bool,
    pub is_readonly: bool,
    pub is_locked: bool,

    /// Declared with method syntax (`tabia name() {}`), so the function
    /// closes over the object as its receiver.
    pub is_method: bool,
    pub span: Span,
}
