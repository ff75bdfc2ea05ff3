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

use crate::ast::{ClassDecl, ClassMethod};
use crate::interpreter::environment::EnvRef;
use crate::value::ObjectRef;

/// A declared class.
///
/// Holds the declaration itself so instances can be materialised from it on
/// every `new`, plus the static table (an ordinary object, so static members
/// reuse the instance access rules).
pub struct ClassValue {
    pub name: String,
    pub superclass: Option<Rc<ClassValue>>,
    pub decl: Rc<ClassDecl>,
    pub static_table: ObjectRef,

    /// Lexical parent for every materialised method and initializer.
    pub defining_env: EnvRef,
}

impl ClassValue {
    /// `[Base, ..., Self]`
    pub fn chain_base_first(self: &Rc<Self>) -> Vec<Rc<ClassValue>> {
        let mut chain = Vec::new();
        let mut current = Some(self.clone());
        while let Some(class) = current {
            current = class.superclass.clone();
            chain.push(class);
        }
        chain.reverse();
        chain
    }

    /// Finds a plain method starting at this class and walking up.
    pub fn find_method(self: &Rc<Self>, name: &str) -> Option<(Rc<ClassValue>, ClassMethod)> {
        let mut current = Some(self.clone());
        while let Some(class) = current {
            if let Some(method) = class.decl.body.method(name, false) {
                let method = method.clone();
                return Some((class, method));
            }
            current = class.superclass.clone();
        }
        None
    }
}

impl fmt::Debug for ClassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassValue")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name.clone()))
            .finish()
    }
}
