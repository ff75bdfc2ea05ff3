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

/*!
 * Statement Executor
 * ------------------
 *
 * Executes **all top-level and block-level statements**. Expressions are
 * evaluated by `expressions.rs`, calls by `calls.rs`.
 *
 * Every block, loop iteration and branch runs in a fresh child
 * environment. Control flow leaves a statement through [`ExecSignal`],
 * which every enclosing block checks after each nested statement.
 */

use crate::ast::{Expr, ExprKind, Stmt, StmtKind};
use crate::error::{EvalResult, SwaziError};
use crate::interpreter::display::{value_to_string, CLASS_LINK};
use crate::interpreter::environment::{EnvRef, Environment, Variable};
use crate::interpreter::helpers::{to_bool, to_index, MAX_ARRAY_LENGTH};
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{FunctionValue, Value};

use std::rc::Rc;

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

/// Outcome of executing one statement.
#[derive(Debug)]
pub enum ExecSignal {
    /// Normal fall-through execution.
    None,

    /// Early return from a function.
    Return(Value),

    Break,
    Continue,
}

/// What a loop does after one pass over its body.
enum LoopStep {
    Next,
    Exit,
    Propagate(ExecSignal),
}

impl From<ExecSignal> for LoopStep {
    fn from(signal: ExecSignal) -> Self {
        match signal {
            ExecSignal::None | ExecSignal::Continue => LoopStep::Next,
            ExecSignal::Break => LoopStep::Exit,
            ret @ ExecSignal::Return(_) => LoopStep::Propagate(ret),
        }
    }
}

impl Interpreter {
    /// Runs statements in order inside `env`, stopping at the first signal.
    pub fn exec_block(&self, stmts: &[Stmt], env: &EnvRef) -> EvalResult<ExecSignal> {
        for stmt in stmts {
            match self.exec_stmt(stmt, env)? {
                ExecSignal::None => {}
                signal => return Ok(signal),
            }
        }
        Ok(ExecSignal::None)
    }

    /// Runs statements in a fresh child of `env`.
    fn exec_scoped(&self, stmts: &[Stmt], env: &EnvRef) -> EvalResult<ExecSignal> {
        let scope = Environment::child(env);
        self.exec_block(stmts, &scope)
    }

    /* ============================================================================
     * Statement Execution Entry Point
     * ============================================================================
     */

    /// Executes a single statement inside the given environment.
    pub fn exec_stmt(&self, stmt: &Stmt, env: &EnvRef) -> EvalResult<ExecSignal> {
        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.eval_expr(expr, env)?;
                Ok(ExecSignal::None)
            }

            StmtKind::Print { expressions, newline } => {
                let mut parts = Vec::with_capacity(expressions.len());
                for expr in expressions {
                    parts.push(value_to_string(&self.eval_expr(expr, env)?));
                }
                let mut text = parts.join(" ");
                if *newline {
                    text.push('\n');
                }
                self.write_output(&text, stmt.span)?;
                Ok(ExecSignal::None)
            }

            /* ------------------------------------------------------------------
             * Declarations
             * ---------------------------------------------------------------- */
            StmtKind::VarDecl { target, value, is_constant } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None if *is_constant => {
                        return Err(SwaziError::syntax_error(
                            "Constant declarations must be initialized",
                            stmt.span,
                        ))
                    }
                    None => Value::Null,
                };
                self.bind_pattern(target, value, *is_constant, env, stmt.span)?;
                Ok(ExecSignal::None)
            }

            StmtKind::Assign { target, value } => {
                self.exec_assign(target, value, env, stmt.span)?;
                Ok(ExecSignal::None)
            }

            StmtKind::Function(decl) => {
                let name = decl.name.clone().ok_or_else(|| {
                    SwaziError::syntax_error("Function declarations need a name", stmt.span)
                })?;
                let function = Value::Function(Rc::new(FunctionValue::user(decl.clone(), env.clone())));
                env.borrow_mut().set(name, Variable::constant(function));
                Ok(ExecSignal::None)
            }

            StmtKind::Class(decl) => {
                self.declare_class(decl, env, stmt.span)?;
                Ok(ExecSignal::None)
            }

            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Null,
                };
                Ok(ExecSignal::Return(value))
            }

            /* ------------------------------------------------------------------
             * Control Flow
             * ---------------------------------------------------------------- */
            StmtKind::Block(body) => self.exec_scoped(body, env),

            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if to_bool(&self.eval_expr(condition, env)?) {
                    self.exec_scoped(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.exec_scoped(else_branch, env)
                } else {
                    Ok(ExecSignal::None)
                }
            }

            StmtKind::For {
                init,
                condition,
                post,
                body,
            } => {
                let for_env = Environment::child(env);
                if let Some(init) = init {
                    self.exec_stmt(init, &for_env)?;
                }

                loop {
                    if let Some(condition) = condition {
                        if !to_bool(&self.eval_expr(condition, &for_env)?) {
                            break;
                        }
                    }

                    match LoopStep::from(self.exec_scoped(body, &for_env)?) {
                        LoopStep::Next => {}
                        LoopStep::Exit => break,
                        LoopStep::Propagate(signal) => return Ok(signal),
                    }

                    if let Some(post) = post {
                        self.exec_stmt(post, &for_env)?;
                    }
                }
                Ok(ExecSignal::None)
            }

            StmtKind::ForIn {
                first,
                second,
                iterable,
                body,
            } => self.exec_for_in(first, second.as_deref(), iterable, body, env),

            StmtKind::While { condition, body } => {
                while to_bool(&self.eval_expr(condition, env)?) {
                    match LoopStep::from(self.exec_scoped(body, env)?) {
                        LoopStep::Next => {}
                        LoopStep::Exit => break,
                        LoopStep::Propagate(signal) => return Ok(signal),
                    }
                }
                Ok(ExecSignal::None)
            }

            StmtKind::DoWhile { body, condition } => {
                loop {
                    // The condition sees the body's scope.
                    let body_env = Environment::child(env);
                    match LoopStep::from(self.exec_block(body, &body_env)?) {
                        LoopStep::Next => {}
                        LoopStep::Exit => break,
                        LoopStep::Propagate(signal) => return Ok(signal),
                    }
                    if !to_bool(&self.eval_expr(condition, &body_env)?) {
                        break;
                    }
                }
                Ok(ExecSignal::None)
            }

            StmtKind::Break => Ok(ExecSignal::Break),
            StmtKind::Continue => Ok(ExecSignal::Continue),
        }
    }

    /* ============================================================================
     * For-in
     * ============================================================================
     */

    fn exec_for_in(
        &self,
        first: &str,
        second: Option<&str>,
        iterable: &Expr,
        body: &[Stmt],
        env: &EnvRef,
    ) -> EvalResult<ExecSignal> {
        let source = self.eval_expr(iterable, env)?;

        // (first, second) pairs, snapshotted before the body runs.
        let pairs: Vec<(Value, Value)> = match &source {
            Value::Array(items) => items
                .borrow()
                .iter()
                .enumerate()
                .map(|(i, item)| (item.clone(), Value::Number(i as f64)))
                .collect(),
            Value::String(s) => s
                .chars()
                .enumerate()
                .map(|(i, c)| (Value::String(c.to_string()), Value::Number(i as f64)))
                .collect(),
            Value::Object(object) => {
                let keys = if self.is_internal_access(env, object) {
                    object
                        .borrow()
                        .keys()
                        .filter(|key| *key != CLASS_LINK)
                        .map(str::to_string)
                        .collect()
                } else {
                    object.borrow().public_keys()
                };
                let mut pairs = Vec::with_capacity(keys.len());
                for key in keys {
                    let value = self.get_object_property(object, &key, env, iterable.span)?;
                    pairs.push((Value::String(key), value));
                }
                pairs
            }
            other => {
                return Err(SwaziError::type_error(
                    format!("Cannot iterate over a value of type `{}`", other.type_name()),
                    iterable.span,
                ))
            }
        };

        for (first_value, second_value) in pairs {
            let iter_env = Environment::child(env);
            {
                let mut scope = iter_env.borrow_mut();
                scope.define(first, first_value);
                if let Some(second) = second {
                    scope.define(second, second_value);
                }
            }
            match LoopStep::from(self.exec_block(body, &iter_env)?) {
                LoopStep::Next => {}
                LoopStep::Exit => break,
                LoopStep::Propagate(signal) => return Ok(signal),
            }
        }
        Ok(ExecSignal::None)
    }

    /* ============================================================================
     * Assignment
     * ============================================================================
     */

    fn exec_assign(&self, target: &Expr, value: &Expr, env: &EnvRef, span: Span) -> EvalResult<()> {
        match &target.kind {
            ExprKind::Identifier(name) => {
                let value = self.eval_expr(value, env)?;
                Environment::assign(env, name, value, span)
            }

            ExprKind::Index { object, index, .. } => {
                let container = self.eval_expr(object, env)?;
                let index = self.eval_expr(index, env)?;
                let value = self.eval_expr(value, env)?;
                self.assign_index(&container, &index, value, env, span)
            }

            ExprKind::Member { object, property, .. } => {
                let container = self.eval_expr(object, env)?;
                let value = self.eval_expr(value, env)?;
                match &container {
                    Value::Object(obj) => self.set_object_property(obj, property, value, env, span),
                    Value::Class(class) => self.set_object_property(&class.static_table, property, value, env, span),
                    other => Err(SwaziError::type_error(
                        format!(
                            "Cannot assign property '{}' on a value of type `{}`",
                            property,
                            other.type_name()
                        ),
                        span,
                    )),
                }
            }

            _ => Err(SwaziError::syntax_error("Invalid assignment target", target.span)),
        }
    }

    /// `container[index] = value`
    pub(crate) fn assign_index(
        &self,
        container: &Value,
        index: &Value,
        value: Value,
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<()> {
        match container {
            Value::Array(items) => {
                let i = to_index(index, span)?;
                if i < 0 {
                    return Err(SwaziError::value_error("Negative array index not supported", span));
                }
                if i as u64 >= MAX_ARRAY_LENGTH as u64 {
                    return Err(SwaziError::value_error(
                        format!("Array index {} exceeds the maximum array length of {}", i, MAX_ARRAY_LENGTH),
                        span,
                    ));
                }
                let i = i as usize;
                let mut items = items.borrow_mut();
                if i >= items.len() {
                    items.resize(i + 1, Value::Null);
                }
                items[i] = value;
                Ok(())
            }
            Value::Object(obj) => self.set_object_property(obj, &value_to_string(index), value, env, span),
            Value::Class(class) => {
                self.set_object_property(&class.static_table, &value_to_string(index), value, env, span)
            }
            other => Err(SwaziError::type_error(
                format!("Cannot assign by index into a value of type `{}`", other.type_name()),
                span,
            )),
        }
    }
}
