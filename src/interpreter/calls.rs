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

use std::cell::Cell;

use tracing::trace;

use crate::ast::FunctionDecl;
use crate::error::{EvalResult, SwaziError};
use crate::interpreter::environment::{EnvRef, Environment, RECEIVER};
use crate::interpreter::statements::ExecSignal;
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{FunctionKind, Value};

/// Decrements the call depth when a user call finishes, on every path.
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl Interpreter {
    /// Calls `callee` with already-evaluated arguments.
    ///
    /// # Parameters
    /// - `callee` - must be a function value
    /// - `args` - positional arguments
    /// - `env` - the *calling* environment (handed to natives)
    /// - `span` - call site, for diagnostics
    pub fn call_function(&self, callee: &Value, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
        self.invoke(callee, None, args, env, span)
    }

    /// Like [`Interpreter::call_function`], additionally binding `receiver`
    /// as `$` in the call's local scope before parameters are bound.
    pub fn call_function_with_receiver(
        &self,
        callee: &Value,
        receiver: Value,
        args: Vec<Value>,
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<Value> {
        self.invoke(callee, Some(receiver), args, env, span)
    }

    fn invoke(
        &self,
        callee: &Value,
        receiver: Option<Value>,
        args: Vec<Value>,
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<Value> {
        let function = match callee {
            Value::Function(f) => f.clone(),
            other => {
                return Err(SwaziError::type_error(
                    format!("A value of type `{}` is not callable", other.type_name()),
                    span,
                ))
            }
        };

        match &function.kind {
            FunctionKind::Native(native) => native(self, args, env, span).map_err(|e| e.or_at(span)),

            FunctionKind::User { decl, closure } => {
                let _guard = self.enter_call(span)?;
                trace!(function = %function.name, args = args.len(), "call");

                let local = Environment::child(closure);
                if let Some(receiver) = receiver {
                    local.borrow_mut().define(RECEIVER, receiver);
                }
                self.bind_parameters(decl, args, &local, span)?;

                match self.exec_block(&decl.body, &local)? {
                    ExecSignal::Return(value) => Ok(value),
                    ExecSignal::None => Ok(Value::Null),
                    ExecSignal::Break | ExecSignal::Continue => Err(SwaziError::syntax_error(
                        format!("'break' or 'continue' outside of a loop in '{}'", function.name),
                        decl.span,
                    )),
                }
            }
        }
    }

    fn enter_call(&self, span: Span) -> EvalResult<DepthGuard<'_>> {
        let depth = self.call_depth.get();
        if depth >= self.config.max_call_depth {
            return Err(SwaziError::runtime_error(
                format!("Maximum call depth of {} exceeded", self.config.max_call_depth),
                span,
            ));
        }
        self.call_depth.set(depth + 1);
        Ok(DepthGuard {
            depth: &self.call_depth,
        })
    }

    /// Binds positional arguments to the declared parameters in `local`.
    ///
    /// Defaults are evaluated in `local`, so they can see earlier
    /// parameters. A rest parameter takes exactly its required count, or
    /// everything left when that count is zero.
    fn bind_parameters(&self, decl: &FunctionDecl, args: Vec<Value>, local: &EnvRef, span: Span) -> EvalResult<()> {
        let name = decl.display_name();
        if args.len() < decl.min_arity() {
            return Err(SwaziError::type_error(
                format!(
                    "Function '{}' expects at least {} argument(s), but {} were provided",
                    name,
                    decl.min_arity(),
                    args.len()
                ),
                span,
            ));
        }

        let mut next = 0usize;
        for param in &decl.params {
            if param.is_rest {
                let remaining = args.len().saturating_sub(next);
                let take = if param.rest_required_count > 0 {
                    if remaining < param.rest_required_count {
                        return Err(SwaziError::type_error(
                            format!(
                                "Rest parameter '{}' of '{}' requires {} argument(s), but {} remain",
                                param.name, name, param.rest_required_count, remaining
                            ),
                            span,
                        ));
                    }
                    param.rest_required_count
                } else {
                    remaining
                };
                let collected = args[next..next + take].to_vec();
                next += take;
                local.borrow_mut().define(param.name.clone(), Value::array(collected));
                continue;
            }

            let value = if next < args.len() {
                next += 1;
                args[next - 1].clone()
            } else if let Some(default) = &param.default {
                self.eval_expr(default, local)?
            } else {
                return Err(SwaziError::type_error(
                    format!("Missing required argument '{}' for '{}'", param.name, name),
                    span,
                ));
            };
            local.borrow_mut().define(param.name.clone(), value);
        }
        Ok(())
    }
}
