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
 * Expression Evaluator
 * --------------------
 *
 * `eval_expr` is the single dispatcher over [`ExprKind`]. Operators live in
 * `operators.rs`, member and index reads in `members.rs`, class-related
 * forms in `classes.rs`.
 *
 * Member, index and call expressions are evaluated through `eval_chain`,
 * which yields `None` once an optional link (`?.`) meets null. The whole
 * remaining chain is then skipped, arguments included.
 */

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{Expr, ExprKind, ObjectMember, PropertyKey, PropertyNode, UnaryOp};
use crate::error::{EvalResult, SwaziError};
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::{EnvRef, Environment, RECEIVER};
use crate::interpreter::helpers::{to_bool, to_number};
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{FunctionValue, ObjectRef, ObjectValue, PropertyDescriptor, Value};

impl Interpreter {
    /// Evaluates a single expression and returns its runtime value.
    pub fn eval_expr(&self, expr: &Expr, env: &EnvRef) -> EvalResult<Value> {
        let span = expr.span;

        match &expr.kind {
            // ---------------------------------------------------------------------
            // Literals
            // ---------------------------------------------------------------------
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::String(s) => Ok(Value::String(s.clone())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Null => Ok(Value::Null),

            ExprKind::Template { quasis, expressions } => {
                let mut out = String::new();
                for (i, quasi) in quasis.iter().enumerate() {
                    out.push_str(quasi);
                    if let Some(expr) = expressions.get(i) {
                        out.push_str(&value_to_string(&self.eval_expr(expr, env)?));
                    }
                }
                // More holes than text segments: trailing expressions still render.
                for expr in expressions.iter().skip(quasis.len()) {
                    out.push_str(&value_to_string(&self.eval_expr(expr, env)?));
                }
                Ok(Value::String(out))
            }

            ExprKind::Array(items) => self.eval_array_literal(items, env),
            ExprKind::Object(members) => self.eval_object_literal(members, env),

            ExprKind::Function(decl) => Ok(Value::Function(Rc::new(FunctionValue::user(
                decl.clone(),
                env.clone(),
            )))),

            // ---------------------------------------------------------------------
            // Names
            // ---------------------------------------------------------------------
            ExprKind::Identifier(name) => Ok(env.borrow().get(name, span)?.value),
            ExprKind::Receiver => self.current_receiver(env, span),

            // ---------------------------------------------------------------------
            // Operators
            // ---------------------------------------------------------------------
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand, env)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!to_bool(&value))),
                    UnaryOp::Negate => Ok(Value::Number(-to_number(&value, operand.span)?)),
                    UnaryOp::Plus => Ok(Value::Number(to_number(&value, operand.span)?)),
                }
            }

            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right, env, span),

            ExprKind::Update { op, target, value } => self.eval_update(*op, target, value.as_deref(), env, span),

            ExprKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => {
                if to_bool(&self.eval_expr(condition, env)?) {
                    self.eval_expr(then_branch, env)
                } else {
                    self.eval_expr(else_branch, env)
                }
            }

            ExprKind::Spread(_) => Err(SwaziError::syntax_error(
                "Spread is only allowed in array literals, object literals and argument lists",
                span,
            )),

            // ---------------------------------------------------------------------
            // Access & calls
            // ---------------------------------------------------------------------
            ExprKind::Call { .. } | ExprKind::Member { .. } | ExprKind::Index { .. } => {
                Ok(self.eval_chain(expr, env)?.unwrap_or(Value::Null))
            }

            // ---------------------------------------------------------------------
            // Classes
            // ---------------------------------------------------------------------
            ExprKind::New { class, args } => match self.eval_expr(class, env)? {
                Value::Class(class) => self.construct_from_exprs(&class, args, env, span),
                other => Err(SwaziError::type_error(
                    format!("'new' expects a class, got a value of type `{}`", other.type_name()),
                    class.span,
                )),
            },

            ExprKind::Super { method: None, args } => self.call_super_constructor(args, env, span),
            ExprKind::Super {
                method: Some(name),
                args,
            } => self.call_super_method(name, args, env, span),

            ExprKind::Delete { target, args } => {
                let target = self.eval_expr(target, env)?;
                let args = self.eval_args(args, env)?;
                self.delete_instance(&target, args, env, span)
            }
        }
    }

    /* ============================================================================
     * Chains
     * ============================================================================
     */

    /// Member / index / call evaluation. `Ok(None)` means an optional link
    /// short-circuited somewhere along the chain.
    fn eval_chain(&self, expr: &Expr, env: &EnvRef) -> EvalResult<Option<Value>> {
        match &expr.kind {
            ExprKind::Member {
                object,
                property,
                optional,
            } => {
                let Some(target) = self.eval_link(object, *optional, env)? else {
                    return Ok(None);
                };
                self.get_member(&target, property, env, expr.span).map(Some)
            }

            ExprKind::Index {
                object,
                index,
                optional,
            } => {
                let Some(target) = self.eval_link(object, *optional, env)? else {
                    return Ok(None);
                };
                let index = self.eval_expr(index, env)?;
                self.get_index(&target, &index, env, expr.span).map(Some)
            }

            ExprKind::Call {
                callee,
                args,
                optional,
            } => self.eval_call(callee, args, *optional, env, expr.span),

            _ => self.eval_expr(expr, env).map(Some),
        }
    }

    /// Evaluates the object side of a link; `None` when the chain is
    /// already short-circuited or this link is optional and hits null.
    fn eval_link(&self, object: &Expr, optional: bool, env: &EnvRef) -> EvalResult<Option<Value>> {
        match self.eval_chain(object, env)? {
            Some(Value::Null) if optional => Ok(None),
            other => Ok(other),
        }
    }

    fn eval_call(
        &self,
        callee: &Expr,
        args: &[Expr],
        optional: bool,
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<Option<Value>> {
        // Method calls keep hold of their receiver.
        let (function, receiver) = match &callee.kind {
            ExprKind::Member {
                object,
                property,
                optional: member_optional,
            } => {
                let Some(receiver) = self.eval_link(object, *member_optional, env)? else {
                    return Ok(None);
                };
                (self.get_member(&receiver, property, env, callee.span)?, Some(receiver))
            }
            ExprKind::Index {
                object,
                index,
                optional: index_optional,
            } => {
                let Some(receiver) = self.eval_link(object, *index_optional, env)? else {
                    return Ok(None);
                };
                let index = self.eval_expr(index, env)?;
                (self.get_index(&receiver, &index, env, callee.span)?, Some(receiver))
            }
            _ => match self.eval_chain(callee, env)? {
                Some(function) => (function, None),
                None => return Ok(None),
            },
        };

        if optional && function.is_null() {
            return Ok(None);
        }

        let args = self.eval_args(args, env)?;
        let result = match receiver {
            Some(receiver @ Value::Object(_)) => self.call_function_with_receiver(&function, receiver, args, env, span),
            _ => self.call_function(&function, args, env, span),
        };
        result.map(Some)
    }

    /* ============================================================================
     * Arguments & literals
     * ============================================================================
     */

    /// Evaluates call arguments, expanding `...array` and `...string`.
    pub(crate) fn eval_args(&self, args: &[Expr], env: &EnvRef) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            match &arg.kind {
                ExprKind::Spread(source) => match self.eval_expr(source, env)? {
                    Value::Array(items) => values.extend(items.borrow().iter().cloned()),
                    Value::String(s) => values.extend(s.chars().map(|c| Value::String(c.to_string()))),
                    other => {
                        return Err(SwaziError::type_error(
                            format!("Cannot spread a value of type `{}` into arguments", other.type_name()),
                            arg.span,
                        ))
                    }
                },
                _ => values.push(self.eval_expr(arg, env)?),
            }
        }
        Ok(values)
    }

    fn eval_array_literal(&self, items: &[Expr], env: &EnvRef) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            match &item.kind {
                ExprKind::Spread(source) => match self.eval_expr(source, env)? {
                    Value::Array(source) => values.extend(source.borrow().iter().cloned()),
                    other => {
                        return Err(SwaziError::type_error(
                            format!("Cannot spread a value of type `{}` into an array", other.type_name()),
                            item.span,
                        ))
                    }
                },
                _ => values.push(self.eval_expr(item, env)?),
            }
        }
        Ok(Value::array(values))
    }

    /// Builds an object literal. Method and getter functions close over a
    /// scope binding the receiver to the object under construction.
    fn eval_object_literal(&self, members: &[ObjectMember], env: &EnvRef) -> EvalResult<Value> {
        let object: ObjectRef = Rc::new(RefCell::new(ObjectValue::new()));
        let mut method_scope: Option<EnvRef> = None;

        for member in members {
            match member {
                ObjectMember::Spread(source) => match self.eval_expr(source, env)? {
                    Value::Object(source) => {
                        // Copy first: `{ ...a }` may read from `object` itself.
                        let copied: Vec<(String, PropertyDescriptor)> = source
                            .borrow()
                            .properties
                            .iter()
                            .map(|(k, d)| (k.clone(), d.clone()))
                            .collect();
                        let mut target = object.borrow_mut();
                        for (key, descriptor) in copied {
                            target.insert(key, descriptor);
                        }
                    }
                    other => {
                        return Err(SwaziError::type_error(
                            format!("Cannot spread a value of type `{}` into an object", other.type_name()),
                            source.span,
                        ))
                    }
                },

                ObjectMember::Property(node) => {
                    let key = match &node.key {
                        PropertyKey::Named(key) => key.clone(),
                        PropertyKey::Computed(expr) => value_to_string(&self.eval_expr(expr, env)?),
                    };
                    let value = self.eval_property_value(node, &object, &mut method_scope, env)?;
                    object.borrow_mut().insert(
                        key,
                        PropertyDescriptor {
                            value,
                            is_private: node.is_private,
                            is_readonly: node.is_readonly,
                            is_locked: node.is_locked,
                            span: node.span,
                        },
                    );
                }
            }
        }

        Ok(Value::Object(object))
    }

    fn eval_property_value(
        &self,
        node: &PropertyNode,
        object: &ObjectRef,
        method_scope: &mut Option<EnvRef>,
        env: &EnvRef,
    ) -> EvalResult<Value> {
        match &node.value.kind {
            ExprKind::Function(decl) if node.is_method || node.is_readonly => {
                let scope = method_scope.get_or_insert_with(|| {
                    let scope = Environment::child(env);
                    scope.borrow_mut().define(RECEIVER, Value::Object(object.clone()));
                    scope
                });
                Ok(Value::Function(Rc::new(FunctionValue::user(decl.clone(), scope.clone()))))
            }
            _ => self.eval_expr(&node.value, env),
        }
    }
}
