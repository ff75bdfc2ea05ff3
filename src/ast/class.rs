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

use crate::ast::{Expr, FunctionDecl};
use crate::span::Span;

/// `muundo Name rithi Base { ... }`
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub superclass: Option<String>,
    pub body: ClassBody,
    pub span: Span,
}

/// Ordered property declarations and method declarations of a class.
#[derive(Debug, Clone, Default)]
pub struct ClassBody {
    pub properties: Vec<ClassProperty>,
    pub methods: Vec<ClassMethod>,
}

impl ClassBody {
    pub fn constructor(&self) -> Option<&ClassMethod> {
        self.methods.iter().find(|m| m.flags.is_constructor)
    }

    pub fn destructor(&self) -> Option<&ClassMethod> {
        self.methods.iter().find(|m| m.flags.is_destructor)
    }

    /// Ordinary (non-constructor, non-destructor) method by name.
    pub fn method(&self, name: &str, is_static: bool) -> Option<&ClassMethod> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.flags.is_static == is_static && m.is_plain())
    }
}

#[derive(Debug, Clone)]
pub struct ClassProperty {
    pub name: String,
    pub value: Option<Expr>,
    pub is_private: bool,
    pub is_static: bool,
    pub is_locked: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ClassMethod {
    pub name: String,
    pub function: Rc<FunctionDecl>,
    pub flags: MethodFlags,
    pub span: Span,
}

impl ClassMethod {
    /// Not a constructor or destructor.
    pub fn is_plain(&self) -> bool {
        !self.flags.is_constructor && !self.flags.is_destructor
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodFlags {
    pub is_static: bool,
    pub is_private: bool,
    pub is_locked: bool,
    pub is_getter: bool,
    pub is_constructor: bool,
    pub is_destructor: bool,
}
