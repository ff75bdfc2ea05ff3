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

use crate::ast::{ArrayPatternElement, Pattern};
use crate::error::{EvalResult, SwaziError};
use crate::interpreter::environment::{EnvRef, Variable};
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::Value;

impl Interpreter {
    /// Binds a declaration target (plain name or destructuring pattern) in
    /// the current frame. Missing elements and keys bind null.
    pub(crate) fn bind_pattern(
        &self,
        pattern: &Pattern,
        value: Value,
        is_constant: bool,
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<()> {
        validate_pattern(pattern, span)?;

        match pattern {
            Pattern::Identifier(name) => {
                bind(env, name, value, is_constant);
                Ok(())
            }

            Pattern::Array(elements) => {
                let items = match &value {
                    Value::Array(items) => items.borrow().clone(),
                    other => {
                        return Err(SwaziError::type_error(
                            format!("Cannot destructure non-array value of type `{}`", other.type_name()),
                            span,
                        ))
                    }
                };

                for (i, element) in elements.iter().enumerate() {
                    match element {
                        ArrayPatternElement::Hole => {}
                        ArrayPatternElement::Binding(name) => {
                            bind(env, name, items.get(i).cloned().unwrap_or(Value::Null), is_constant);
                        }
                        ArrayPatternElement::Rest(name) => {
                            let rest = items.get(i..).map(<[Value]>::to_vec).unwrap_or_default();
                            bind(env, name, Value::array(rest), is_constant);
                        }
                    }
                }
                Ok(())
            }

            Pattern::Object(properties) => {
                let object = match &value {
                    Value::Object(object) => object.clone(),
                    other => {
                        return Err(SwaziError::type_error(
                            format!("Cannot destructure non-object value of type `{}`", other.type_name()),
                            span,
                        ))
                    }
                };

                for property in properties {
                    let value = self.get_object_property(&object, &property.key, env, span)?;
                    bind(env, &property.target, value, is_constant);
                }
                Ok(())
            }
        }
    }
}

fn bind(env: &EnvRef, name: &str, value: Value, is_constant: bool) {
    let variable = if is_constant {
        Variable::constant(value)
    } else {
        Variable::mutable(value)
    };
    env.borrow_mut().set(name, variable);
}

/// Rest must be last, names must be non-empty.
fn validate_pattern(pattern: &Pattern, span: Span) -> EvalResult<()> {
    if pattern.bound_names().iter().any(|name| name.is_empty()) {
        return Err(SwaziError::syntax_error("Destructuring target needs a name", span));
    }

    if let Pattern::Array(elements) = pattern {
        let last = elements.len().saturating_sub(1);
        let misplaced = elements
            .iter()
            .enumerate()
            .any(|(i, el)| matches!(el, ArrayPatternElement::Rest(_)) && i != last);
        if misplaced {
            return Err(SwaziError::syntax_error(
                "Rest element must be last in an array pattern",
                span,
            ));
        }
    }
    Ok(())
}
