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

//! Syntax tree consumed by the evaluator.
//!
//! The tree is produced by an external parser (or by the helpers in
//! [`build`]) and is never mutated while a program runs. Function bodies and
//! class bodies are held behind `Rc` so closures, methods and class values
//! can share them without copying statement lists.

pub mod build;
pub mod class;
pub mod expr;
pub mod function;
pub mod param;
pub mod pattern;
pub mod stmt;

pub use class::{ClassBody, ClassDecl, ClassMethod, ClassProperty, MethodFlags};
pub use expr::{BinaryOp, Expr, ExprKind, ObjectMember, PropertyKey, PropertyNode, UnaryOp, UpdateOp};
pub use function::FunctionDecl;
pub use param::Param;
pub use pattern::{ArrayPatternElement, ObjectPatternProperty, Pattern};
pub use stmt::{Stmt, StmtKind};
