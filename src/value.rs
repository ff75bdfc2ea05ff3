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

pub mod class;
pub mod function;
pub mod object;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use class::ClassValue;
pub use function::{FunctionKind, FunctionValue, NativeFn};
pub use object::{ObjectValue, PropertyDescriptor};

use crate::error::EvalResult;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::Interpreter;
use crate::span::Span;

pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
pub type ObjectRef = Rc<RefCell<ObjectValue>>;

/// Runtime value representation.
///
/// This is the core type that flows through the interpreter.
/// Every expression ultimately evaluates to one of these. Numbers, strings
/// and booleans are copied by value; functions, arrays, objects and classes
/// are shared and compare by identity under `===`.
#[derive(Clone)]
pub enum Value {
    /// Absence: uninitialised variables, missing properties, void returns.
    Null,

    Number(f64),
    String(String),
    Bool(bool),

    Function(Rc<FunctionValue>),
    Array(ArrayRef),
    Object(ObjectRef),
    Class(Rc<ClassValue>),
}

impl Value {
    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn object(object: ObjectValue) -> Value {
        Value::Object(Rc::new(RefCell::new(object)))
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::String(s.into())
    }

    /// Wraps a host closure as a callable value.
    pub fn native<F>(name: &str, f: F) -> Value
    where
        F: Fn(&Interpreter, Vec<Value>, &EnvRef, Span) -> EvalResult<Value> + 'static,
    {
        Value::Function(Rc::new(FunctionValue::native(name, Rc::new(f))))
    }

    /// Language-level type name, as reported by `aina` / `ainaya`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "namba",
            Value::String(_) => "neno",
            Value::Bool(_) => "bool",
            Value::Function(_) => "kazi",
            Value::Array(_) => "orodha",
            Value::Object(_) => "object",
            Value::Class(_) => "muundo",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True when both values point at the same allocation. Always false for
    /// value types.
    pub fn same_reference(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

// Shallow on purpose: objects may be cyclic.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Function(func) => write!(f, "Function({})", func.name),
            Value::Array(items) => match items.try_borrow() {
                Ok(items) => write!(f, "Array(len={})", items.len()),
                Err(_) => write!(f, "Array(<borrowed>)"),
            },
            Value::Object(obj) => match obj.try_borrow() {
                Ok(obj) => write!(f, "Object(keys={:?})", obj.keys().collect::<Vec<_>>()),
                Err(_) => write!(f, "Object(<borrowed>)"),
            },
            Value::Class(class) => write!(f, "Class({})", class.name),
        }
    }
}
