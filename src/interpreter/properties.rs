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

//! Unified object property protocol: privacy, locking, readonly, getters
//! and freezing. Plain objects, instances and class static tables all go
//! through here.

use std::rc::Rc;

use crate::error::{EvalResult, SwaziError};
use crate::interpreter::display::CLASS_LINK;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{ObjectRef, PropertyDescriptor, Value};

impl Interpreter {
    /// True when the current lexical context is "inside" `object`: some
    /// receiver bound along the chain is the object itself, or is an
    /// instance whose class owns `object` as its static table.
    pub fn is_internal_access(&self, env: &EnvRef, object: &ObjectRef) -> bool {
        let receivers = env.borrow().receivers();
        receivers.iter().any(|receiver| match receiver {
            Value::Object(bound) => {
                if Rc::ptr_eq(bound, object) {
                    return true;
                }
                match bound.borrow().raw_get(CLASS_LINK) {
                    Some(Value::Class(class)) => Rc::ptr_eq(&class.static_table, object),
                    _ => false,
                }
            }
            _ => false,
        })
    }

    /// Reads `object[key]`.
    ///
    /// Missing keys read as null. Private keys need internal access.
    /// Readonly function properties are getters and are invoked.
    pub fn get_object_property(&self, object: &ObjectRef, key: &str, env: &EnvRef, span: Span) -> EvalResult<Value> {
        let descriptor = match object.borrow().descriptor(key) {
            Some(descriptor) => descriptor.clone(),
            None => return Ok(Value::Null),
        };

        if descriptor.is_private && !self.is_internal_access(env, object) {
            return Err(SwaziError::permission_error(
                format!("Cannot access private property '{}' from outside its owner", key),
                span,
            ));
        }

        if descriptor.is_getter() {
            return self.call_function_with_receiver(
                &descriptor.value,
                Value::Object(object.clone()),
                Vec::new(),
                env,
                span,
            );
        }

        Ok(descriptor.value)
    }

    /// Writes `object[key] = value`.
    ///
    /// Frozen objects ignore writes. Existing private or locked keys need
    /// internal access, readonly keys are never writable. New keys are
    /// created public and writable.
    pub fn set_object_property(
        &self,
        object: &ObjectRef,
        key: &str,
        value: Value,
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<()> {
        let (frozen, existing) = {
            let borrowed = object.borrow();
            (borrowed.is_frozen, borrowed.descriptor(key).cloned())
        };

        if frozen {
            return Ok(());
        }

        let Some(existing) = existing else {
            object
                .borrow_mut()
                .insert(key, PropertyDescriptor::public(value, span));
            return Ok(());
        };

        if existing.is_readonly {
            return Err(SwaziError::permission_error(
                format!("Cannot assign to readonly property '{}'", key),
                span,
            ));
        }

        if (existing.is_private || existing.is_locked) && !self.is_internal_access(env, object) {
            let what = if existing.is_private { "private" } else { "locked" };
            return Err(SwaziError::permission_error(
                format!("Cannot modify {} property '{}' from outside its owner", what, key),
                span,
            ));
        }

        if let Some(slot) = object.borrow_mut().properties.get_mut(key) {
            slot.value = value;
        }
        Ok(())
    }
}
