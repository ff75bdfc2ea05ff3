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

//! Binary operators and the in-place update operators (`++`, `--`, `+=`,
//! `-=`, `*=`).

use std::cmp::Ordering;

use crate::ast::{BinaryOp, Expr, ExprKind, UpdateOp};
use crate::error::{ErrorKind, EvalResult, SwaziError};
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::{EnvRef, Environment};
use crate::interpreter::helpers::{loose_equals, strict_equals, to_bool, to_number};
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::Value;

impl Interpreter {
    /// Evaluates both operands (right only when needed for `&&` / `||`)
    /// and applies `op`.
    pub(crate) fn eval_binary(
        &self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<Value> {
        match op {
            BinaryOp::And => {
                if !to_bool(&self.eval_expr(left, env)?) {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(to_bool(&self.eval_expr(right, env)?)))
            }
            BinaryOp::Or => {
                if to_bool(&self.eval_expr(left, env)?) {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(to_bool(&self.eval_expr(right, env)?)))
            }
            _ => {
                let l = self.eval_expr(left, env)?;
                let r = self.eval_expr(right, env)?;
                binary_op(op, &l, &r, span)
            }
        }
    }

    /// Mutates `target` in place and returns the new value.
    ///
    /// Identifiers are resolved with the chain-searching assignment policy;
    /// index and member targets write back through the same paths as
    /// ordinary assignment.
    pub(crate) fn eval_update(
        &self,
        op: UpdateOp,
        target: &Expr,
        operand: Option<&Expr>,
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<Value> {
        match &target.kind {
            ExprKind::Identifier(name) => {
                let current = env.borrow().get(name, target.span)?.value;
                let operand = self.eval_operand(operand, env)?;
                let next = apply_update(op, &current, operand.as_ref(), span)?;
                Environment::assign(env, name, next.clone(), span)?;
                Ok(next)
            }

            ExprKind::Index { object, index, .. } => {
                let container = self.eval_expr(object, env)?;
                let index = self.eval_expr(index, env)?;
                let current = self.get_index(&container, &index, env, target.span)?;
                let operand = self.eval_operand(operand, env)?;
                let next = apply_update(op, &current, operand.as_ref(), span)?;
                self.assign_index(&container, &index, next.clone(), env, span)?;
                Ok(next)
            }

            ExprKind::Member { object, property, .. } => {
                let container = self.eval_expr(object, env)?;
                let current = self.get_member(&container, property, env, target.span)?;
                let operand = self.eval_operand(operand, env)?;
                let next = apply_update(op, &current, operand.as_ref(), span)?;
                match &container {
                    Value::Object(obj) => self.set_object_property(obj, property, next.clone(), env, span)?,
                    Value::Class(class) => {
                        self.set_object_property(&class.static_table, property, next.clone(), env, span)?
                    }
                    other => {
                        return Err(SwaziError::type_error(
                            format!(
                                "Cannot update property '{}' on a value of type `{}`",
                                property,
                                other.type_name()
                            ),
                            span,
                        ))
                    }
                }
                Ok(next)
            }

            _ => Err(SwaziError::syntax_error(
                format!("Invalid target for '{}'", op.symbol()),
                target.span,
            )),
        }
    }

    fn eval_operand(&self, operand: Option<&Expr>, env: &EnvRef) -> EvalResult<Option<Value>> {
        operand.map(|expr| self.eval_expr(expr, env)).transpose()
    }
}

/// Applies a non-short-circuiting binary operator to two values.
pub fn binary_op(op: BinaryOp, l: &Value, r: &Value, span: Span) -> EvalResult<Value> {
    let value = match op {
        BinaryOp::Add => match (l, r) {
            (Value::String(_), _) | (_, Value::String(_)) => {
                Value::String(format!("{}{}", value_to_string(l), value_to_string(r)))
            }
            (Value::Array(a), Value::Array(b)) => {
                let mut joined = a.borrow().clone();
                joined.extend(b.borrow().iter().cloned());
                Value::array(joined)
            }
            _ => Value::Number(to_number(l, span)? + to_number(r, span)?),
        },
        BinaryOp::Subtract => Value::Number(to_number(l, span)? - to_number(r, span)?),
        BinaryOp::Multiply => Value::Number(to_number(l, span)? * to_number(r, span)?),
        BinaryOp::Divide => {
            let (a, b) = (to_number(l, span)?, to_number(r, span)?);
            if b == 0.0 {
                return Err(SwaziError::new(ErrorKind::DivisionByZero, "Division by zero", span));
            }
            Value::Number(a / b)
        }
        BinaryOp::Modulo => {
            let (a, b) = (to_number(l, span)?, to_number(r, span)?);
            if b == 0.0 {
                return Err(SwaziError::new(ErrorKind::ModuloByZero, "Modulo by zero", span));
            }
            Value::Number(a % b)
        }
        BinaryOp::Power => Value::Number(to_number(l, span)?.powf(to_number(r, span)?)),

        BinaryOp::Equal => Value::Bool(loose_equals(l, r)),
        BinaryOp::NotEqual => Value::Bool(!loose_equals(l, r)),
        BinaryOp::StrictEqual => Value::Bool(strict_equals(l, r)),
        BinaryOp::StrictNotEqual => Value::Bool(!strict_equals(l, r)),

        BinaryOp::Less => Value::Bool(compare(l, r, span)? == Some(Ordering::Less)),
        BinaryOp::Greater => Value::Bool(compare(l, r, span)? == Some(Ordering::Greater)),
        BinaryOp::LessEqual => Value::Bool(matches!(
            compare(l, r, span)?,
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinaryOp::GreaterEqual => Value::Bool(matches!(
            compare(l, r, span)?,
            Some(Ordering::Greater | Ordering::Equal)
        )),

        BinaryOp::And => Value::Bool(to_bool(l) && to_bool(r)),
        BinaryOp::Or => Value::Bool(to_bool(l) || to_bool(r)),
    };
    Ok(value)
}

/// Strings compare lexically, everything else numerically. `None` when a
/// NaN is involved.
fn compare(l: &Value, r: &Value, span: Span) -> EvalResult<Option<Ordering>> {
    match (l, r) {
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        _ => Ok(to_number(l, span)?.partial_cmp(&to_number(r, span)?)),
    }
}

fn apply_update(op: UpdateOp, current: &Value, operand: Option<&Value>, span: Span) -> EvalResult<Value> {
    match (op, operand) {
        (UpdateOp::Increment, _) => Ok(Value::Number(numeric(current, op, span)? + 1.0)),
        (UpdateOp::Decrement, _) => Ok(Value::Number(numeric(current, op, span)? - 1.0)),

        (UpdateOp::AddAssign, Some(rhs)) => match (current, rhs) {
            (Value::String(_), _) | (_, Value::String(_)) => Ok(Value::String(format!(
                "{}{}",
                value_to_string(current),
                value_to_string(rhs)
            ))),
            _ => Ok(Value::Number(numeric(current, op, span)? + numeric(rhs, op, span)?)),
        },
        (UpdateOp::SubtractAssign, Some(rhs)) => {
            Ok(Value::Number(numeric(current, op, span)? - numeric(rhs, op, span)?))
        }
        (UpdateOp::MultiplyAssign, Some(rhs)) => {
            Ok(Value::Number(numeric(current, op, span)? * numeric(rhs, op, span)?))
        }

        (_, None) => Err(SwaziError::syntax_error(
            format!("'{}' needs a right-hand value", op.symbol()),
            span,
        )),
    }
}

fn numeric(value: &Value, op: UpdateOp, span: Span) -> EvalResult<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(SwaziError::type_error(
            format!(
                "Operator '{}' expects a number, got a value of type `{}`",
                op.symbol(),
                other.type_name()
            ),
            span,
        )),
    }
}
