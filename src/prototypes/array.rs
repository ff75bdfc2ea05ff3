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

use std::cmp::Ordering;
use std::rc::Rc;

use crate::error::{EvalResult, SwaziError};
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::helpers::{normalize_bound, strict_equals, to_bool, to_index, to_number};
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{ArrayRef, Value};

/// Signature shared by every array method: the receiver array, then the
/// usual native arguments.
type ArrayMethod = fn(&Interpreter, &ArrayRef, Vec<Value>, &EnvRef, Span) -> EvalResult<Value>;

/// Resolves an array member: the `urefu` / `length` property or a method
/// bound to `items`.
///
/// Mutating methods (`push`, `pop`, `shift`, `unshift`, `sort`, `reverse`,
/// `splice`) change the array in place. Callback methods call back with
/// `(element, index, array)`; the elements are snapshotted first, so a
/// callback may freely mutate the array.
pub fn member(items: &ArrayRef, name: &str) -> Option<Value> {
    if matches!(name, "urefu" | "length") {
        return Some(Value::Number(items.borrow().len() as f64));
    }

    let method: ArrayMethod = match name {
        // Mutating methods
        "push" => array_push,
        "pop" => |_, items, _, _, _| Ok(items.borrow_mut().pop().unwrap_or(Value::Null)),
        "shift" => array_shift,
        "unshift" => array_unshift,
        "sort" => array_sort,
        "reverse" => array_reverse,
        "splice" => array_splice,

        // Iteration & search
        "map" => array_map,
        "filter" => array_filter,
        "forEach" => array_for_each,
        "find" => array_find,
        "some" => array_some,
        "every" => array_every,
        "includes" => |_, items, args, _, _| Ok(Value::Bool(position(items, args.first()).is_some())),
        "indexOf" => |_, items, args, _, _| {
            Ok(Value::Number(position(items, args.first()).map(|i| i as f64).unwrap_or(-1.0)))
        },

        // Reduction
        "reduce" => |interp, items, args, env, span| reduce(interp, items, args, env, span, false),
        "reduceRight" => |interp, items, args, env, span| reduce(interp, items, args, env, span, true),

        // Non-mutating
        "slice" => array_slice,
        "join" => array_join,
        "concat" => array_concat,
        "toString" => |_, items, _, _, _| Ok(Value::String(value_to_string(&Value::Array(items.clone())))),

        _ => return None,
    };

    let items = Rc::clone(items);
    Some(Value::native(name, move |interp, args, env, span| {
        method(interp, &items, args, env, span)
    }))
}

/* ==========================================================================
 * HELPERS
 * ==========================================================================
 */

fn callback_arg(args: &[Value], method: &str, span: Span) -> EvalResult<Value> {
    match args.first() {
        Some(f @ Value::Function(_)) => Ok(f.clone()),
        other => Err(SwaziError::type_error(
            format!(
                "{}() expects a function, got `{}`",
                method,
                other.map(Value::type_name).unwrap_or("nothing")
            ),
            span,
        )),
    }
}

/// Calls `callback(element, index, array)` for every element of a
/// snapshot, handing each result to `visit` until it returns false.
fn each_with<F>(
    interp: &Interpreter,
    items: &ArrayRef,
    callback: &Value,
    env: &EnvRef,
    span: Span,
    mut visit: F,
) -> EvalResult<()>
where
    F: FnMut(usize, Value, Value) -> bool,
{
    let snapshot = items.borrow().clone();
    let array = Value::Array(items.clone());

    for (i, element) in snapshot.into_iter().enumerate() {
        let result = interp.call_function(
            callback,
            vec![element.clone(), Value::Number(i as f64), array.clone()],
            env,
            span,
        )?;
        if !visit(i, element, result) {
            break;
        }
    }
    Ok(())
}

fn position(items: &ArrayRef, needle: Option<&Value>) -> Option<usize> {
    let items = items.borrow();
    match needle {
        Some(needle) => items.iter().position(|item| strict_equals(item, needle)),
        None => items.iter().position(Value::is_null),
    }
}

/// Default sort order: numbers numerically, everything else by its
/// string rendering.
fn default_order(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => value_to_string(a).cmp(&value_to_string(b)),
    }
}

/* ==========================================================================
 * MUTATING METHODS
 * ==========================================================================
 */

/// Appends every argument; returns the new length.
fn array_push(_: &Interpreter, items: &ArrayRef, args: Vec<Value>, _: &EnvRef, _: Span) -> EvalResult<Value> {
    let mut items = items.borrow_mut();
    items.extend(args);
    Ok(Value::Number(items.len() as f64))
}

fn array_shift(_: &Interpreter, items: &ArrayRef, _: Vec<Value>, _: &EnvRef, _: Span) -> EvalResult<Value> {
    let mut items = items.borrow_mut();
    if items.is_empty() {
        return Ok(Value::Null);
    }
    Ok(items.remove(0))
}

/// Prepends the arguments in order; returns the new length.
fn array_unshift(_: &Interpreter, items: &ArrayRef, args: Vec<Value>, _: &EnvRef, _: Span) -> EvalResult<Value> {
    let mut items = items.borrow_mut();
    items.splice(0..0, args);
    Ok(Value::Number(items.len() as f64))
}

/// Sorts in place and returns the same array.
///
/// With a comparator `cmp(a, b)`, a negative result orders `a` first. The
/// first comparator error aborts the sort and leaves the array untouched.
fn array_sort(interp: &Interpreter, items: &ArrayRef, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
    let mut sorted = items.borrow().clone();

    match args.first() {
        None | Some(Value::Null) => sorted.sort_by(default_order),
        Some(cmp @ Value::Function(_)) => {
            let mut failure: Option<SwaziError> = None;
            sorted.sort_by(|a, b| {
                if failure.is_some() {
                    return Ordering::Equal;
                }
                let result = interp
                    .call_function(cmp, vec![a.clone(), b.clone()], env, span)
                    .and_then(|v| to_number(&v, span));
                match result {
                    Ok(n) if n < 0.0 => Ordering::Less,
                    Ok(n) if n > 0.0 => Ordering::Greater,
                    Ok(_) => Ordering::Equal,
                    Err(e) => {
                        failure = Some(e);
                        Ordering::Equal
                    }
                }
            });
            if let Some(error) = failure {
                return Err(error);
            }
        }
        Some(other) => {
            return Err(SwaziError::type_error(
                format!("sort() comparator must be a function, got `{}`", other.type_name()),
                span,
            ))
        }
    }

    *items.borrow_mut() = sorted;
    Ok(Value::Array(items.clone()))
}

fn array_reverse(_: &Interpreter, items: &ArrayRef, _: Vec<Value>, _: &EnvRef, _: Span) -> EvalResult<Value> {
    items.borrow_mut().reverse();
    Ok(Value::Array(items.clone()))
}

/// `splice(start, count?, ...items)`: removes `count` elements (all
/// remaining by default) from `start`, inserts `items` there and returns
/// the removed elements. Negative `start` counts from the end.
fn array_splice(_: &Interpreter, items: &ArrayRef, args: Vec<Value>, _: &EnvRef, span: Span) -> EvalResult<Value> {
    let mut args = args.into_iter();
    let start = args.next().unwrap_or(Value::Number(0.0));
    let count = args.next();
    let inserted: Vec<Value> = args.collect();

    let mut items = items.borrow_mut();
    let len = items.len();
    let start = normalize_bound(to_index(&start, span)?, len);
    let count = match count {
        None | Some(Value::Null) => len - start,
        Some(v) => to_index(&v, span)?.clamp(0, (len - start) as i64) as usize,
    };

    let removed: Vec<Value> = items.splice(start..start + count, inserted).collect();
    Ok(Value::array(removed))
}

/* ==========================================================================
 * ITERATION & SEARCH
 * ==========================================================================
 */

fn array_map(interp: &Interpreter, items: &ArrayRef, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
    let callback = callback_arg(&args, "map", span)?;
    let mut mapped = Vec::with_capacity(items.borrow().len());
    each_with(interp, items, &callback, env, span, |_, _, result| {
        mapped.push(result);
        true
    })?;
    Ok(Value::array(mapped))
}

fn array_filter(interp: &Interpreter, items: &ArrayRef, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
    let callback = callback_arg(&args, "filter", span)?;
    let mut kept = Vec::new();
    each_with(interp, items, &callback, env, span, |_, element, result| {
        if to_bool(&result) {
            kept.push(element);
        }
        true
    })?;
    Ok(Value::array(kept))
}

fn array_for_each(interp: &Interpreter, items: &ArrayRef, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
    let callback = callback_arg(&args, "forEach", span)?;
    each_with(interp, items, &callback, env, span, |_, _, _| true)?;
    Ok(Value::Null)
}

/// First element the callback accepts, or null.
fn array_find(interp: &Interpreter, items: &ArrayRef, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
    let callback = callback_arg(&args, "find", span)?;
    let mut found = Value::Null;
    each_with(interp, items, &callback, env, span, |_, element, result| {
        if to_bool(&result) {
            found = element;
            return false;
        }
        true
    })?;
    Ok(found)
}

fn array_some(interp: &Interpreter, items: &ArrayRef, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
    let callback = callback_arg(&args, "some", span)?;
    let mut any = false;
    each_with(interp, items, &callback, env, span, |_, _, result| {
        any = to_bool(&result);
        !any
    })?;
    Ok(Value::Bool(any))
}

fn array_every(interp: &Interpreter, items: &ArrayRef, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
    let callback = callback_arg(&args, "every", span)?;
    let mut all = true;
    each_with(interp, items, &callback, env, span, |_, _, result| {
        all = to_bool(&result);
        all
    })?;
    Ok(Value::Bool(all))
}

/// `reduce(f, init?)` / `reduceRight(f, init?)` with
/// `f(accumulator, element, index, array)`.
fn reduce(
    interp: &Interpreter,
    items: &ArrayRef,
    args: Vec<Value>,
    env: &EnvRef,
    span: Span,
    from_right: bool,
) -> EvalResult<Value> {
    let method = if from_right { "reduceRight" } else { "reduce" };
    let callback = callback_arg(&args, method, span)?;

    let snapshot = items.borrow().clone();
    let mut order: Vec<usize> = (0..snapshot.len()).collect();
    if from_right {
        order.reverse();
    }
    let mut order = order.into_iter();

    let mut accumulator = match args.get(1) {
        Some(init) => init.clone(),
        None => match order.next() {
            Some(first) => snapshot[first].clone(),
            None => {
                return Err(SwaziError::type_error(
                    format!("{}() of an empty array with no initial value", method),
                    span,
                ))
            }
        },
    };

    let array = Value::Array(items.clone());
    for i in order {
        accumulator = interp.call_function(
            &callback,
            vec![accumulator, snapshot[i].clone(), Value::Number(i as f64), array.clone()],
            env,
            span,
        )?;
    }
    Ok(accumulator)
}

/* ==========================================================================
 * NON-MUTATING METHODS
 * ==========================================================================
 */

/// `slice(start?, end?)` with negative bounds counted from the end.
fn array_slice(_: &Interpreter, items: &ArrayRef, args: Vec<Value>, _: &EnvRef, span: Span) -> EvalResult<Value> {
    let items = items.borrow();
    let start = match args.first() {
        None | Some(Value::Null) => 0,
        Some(v) => normalize_bound(to_index(v, span)?, items.len()),
    };
    let end = match args.get(1) {
        None | Some(Value::Null) => items.len(),
        Some(v) => normalize_bound(to_index(v, span)?, items.len()),
    };
    if start >= end {
        return Ok(Value::array(Vec::new()));
    }
    Ok(Value::array(items[start..end].to_vec()))
}

fn array_join(_: &Interpreter, items: &ArrayRef, args: Vec<Value>, _: &EnvRef, _: Span) -> EvalResult<Value> {
    let sep = match args.first() {
        None | Some(Value::Null) => ",".to_string(),
        Some(v) => value_to_string(v),
    };
    let joined = items
        .borrow()
        .iter()
        .map(value_to_string)
        .collect::<Vec<_>>()
        .join(&sep);
    Ok(Value::String(joined))
}

/// New array of the receiver followed by each argument; array arguments
/// are flattened one level.
fn array_concat(_: &Interpreter, items: &ArrayRef, args: Vec<Value>, _: &EnvRef, _: Span) -> EvalResult<Value> {
    let mut joined = items.borrow().clone();
    for arg in args {
        match arg {
            Value::Array(other) => joined.extend(other.borrow().iter().cloned()),
            other => joined.push(other),
        }
    }
    Ok(Value::array(joined))
}
