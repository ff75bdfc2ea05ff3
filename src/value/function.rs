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
use std::rc::Rc;

use crate::ast::FunctionDecl;
use crate::error::EvalResult;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::Value;

/// Host-implemented callable.
///
/// Receives the raw argument vector, the *calling* environment and the call
/// site's span. Natives do their own arity checks.
pub type NativeFn = Rc<dyn Fn(&Interpreter, Vec<Value>, &EnvRef, Span) -> EvalResult<Value>>;

pub struct FunctionValue {
    pub name: String,
    pub kind: FunctionKind,
}

pub enum FunctionKind {
    /// Closure over the environment it was created in.
    User {
        decl: Rc<FunctionDecl>,
        closure: EnvRef,
    },

    Native(NativeFn),
}

impl FunctionValue {
    pub fn user(decl: Rc<FunctionDecl>, closure: EnvRef) -> Self {
        Self {
            name: decl.display_name().to_string(),
            kind: FunctionKind::User { decl, closure },
        }
    }

    pub fn native(name: &str, f: NativeFn) -> Self {
        Self {
            name: name.to_string(),
            kind: FunctionKind::Native(f),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, FunctionKind::Native(_))
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_native() { "native" } else { "user" };
        write!(f, "FunctionValue({} {})", kind, self.name)
    }
}
