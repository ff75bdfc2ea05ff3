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

use crate::error::{EvalResult, SwaziError};
use crate::interpreter::helpers::{normalize_bound, to_index, to_number, MAX_STRING_LENGTH};
use crate::prototypes::{bound_method, regex};
use crate::span::Span;
use crate::value::Value;

/// Resolves a string member: the `urefu` / `length` property, or one of
/// the methods listed below bound to `s`.
///
/// # Installed Methods
/// - `len()`, `upper()`, `lower()`, `trim()`
/// - `split(sep)`, `contains(s)`, `startsWith(s)`, `endsWith(s)`
/// - `replace(find, with)`, `repeat(n)`, `charAt(i)`, `slice(start, end?)`
/// - `indexOf(s)`, `match(pattern, flags?)`, `replaceRegex(pattern, with, flags?)`
pub fn member(s: &str, name: &str) -> Option<Value> {
    if matches!(name, "urefu" | "length") {
        return Some(Value::Number(s.chars().count() as f64));
    }

    let method: fn(&String, &[Value], Span) -> EvalResult<Value> = match name {
        "len" => string_len,
        "upper" => |s, _, _| Ok(Value::String(s.to_uppercase())),
        "lower" => |s, _, _| Ok(Value::String(s.to_lowercase())),
        "trim" => |s, _, _| Ok(Value::String(s.trim().to_string())),
        "split" => string_split,
        "contains" => |s, args, span| Ok(Value::Bool(s.contains(string_arg(args, 0, "contains", span)?))),
        "startsWith" => |s, args, span| Ok(Value::Bool(s.starts_with(string_arg(args, 0, "startsWith", span)?))),
        "endsWith" => |s, args, span| Ok(Value::Bool(s.ends_with(string_arg(args, 0, "endsWith", span)?))),
        "replace" => string_replace,
        "repeat" => string_repeat,
        "charAt" => string_char_at,
        "slice" => string_slice,
        "indexOf" => string_index_of,
        "match" => string_match,
        "replaceRegex" => string_replace_regex,
        _ => return None,
    };

    Some(bound_method(name, s.to_string(), method))
}

fn string_arg<'a>(args: &'a [Value], i: usize, method: &str, span: Span) -> EvalResult<&'a str> {
    match args.get(i) {
        Some(Value::String(s)) => Ok(s),
        other => Err(SwaziError::type_error(
            format!(
                "{}() expects a string as argument {}, got `{}`",
                method,
                i + 1,
                other.map(Value::type_name).unwrap_or("nothing")
            ),
            span,
        )),
    }
}

/// Optional regex flags argument; missing or null means none.
fn flags_arg<'a>(args: &'a [Value], i: usize, method: &str, span: Span) -> EvalResult<&'a str> {
    match args.get(i) {
        None | Some(Value::Null) => Ok(""),
        Some(_) => string_arg(args, i, method, span),
    }
}

/// Number of characters, not bytes.
fn string_len(s: &String, _args: &[Value], _span: Span) -> EvalResult<Value> {
    Ok(Value::Number(s.chars().count() as f64))
}

/// `"a,b".split(",")`. An empty separator splits into characters.
fn string_split(s: &String, args: &[Value], span: Span) -> EvalResult<Value> {
    let sep = string_arg(args, 0, "split", span)?;
    let parts = if sep.is_empty() {
        s.chars().map(|c| Value::String(c.to_string())).collect()
    } else {
        s.split(sep).map(Value::string).collect()
    };
    Ok(Value::array(parts))
}

/// Replaces every occurrence.
fn string_replace(s: &String, args: &[Value], span: Span) -> EvalResult<Value> {
    let find = string_arg(args, 0, "replace", span)?;
    let with = string_arg(args, 1, "replace", span)?;
    Ok(Value::String(s.replace(find, with)))
}

fn string_repeat(s: &String, args: &[Value], span: Span) -> EvalResult<Value> {
    let count = to_number(args.first().unwrap_or(&Value::Null), span)?;
    if count < 0.0 || !count.is_finite() {
        return Err(SwaziError::value_error(
            format!("repeat() count must be a non-negative number, got {}", count),
            span,
        ));
    }
    let count = count as usize;
    match s.len().checked_mul(count) {
        Some(total) if total <= MAX_STRING_LENGTH => Ok(Value::String(s.repeat(count))),
        _ => Err(SwaziError::value_error(
            format!("repeat() result would exceed the maximum string length of {}", MAX_STRING_LENGTH),
            span,
        )),
    }
}

fn string_char_at(s: &String, args: &[Value], span: Span) -> EvalResult<Value> {
    let i = to_index(args.first().unwrap_or(&Value::Number(0.0)), span)?;
    if i < 0 {
        return Ok(Value::Null);
    }
    Ok(s.chars()
        .nth(i as usize)
        .map(|c| Value::String(c.to_string()))
        .unwrap_or(Value::Null))
}

/// Character-based slice; negative bounds count from the end.
fn string_slice(s: &String, args: &[Value], span: Span) -> EvalResult<Value> {
    let chars: Vec<char> = s.chars().collect();
    let start = match args.first() {
        None | Some(Value::Null) => 0,
        Some(v) => normalize_bound(to_index(v, span)?, chars.len()),
    };
    let end = match args.get(1) {
        None | Some(Value::Null) => chars.len(),
        Some(v) => normalize_bound(to_index(v, span)?, chars.len()),
    };
    if start >= end {
        return Ok(Value::string(""));
    }
    Ok(Value::String(chars[start..end].iter().collect()))
}

/// Character index of the first occurrence, or -1.
fn string_index_of(s: &String, args: &[Value], span: Span) -> EvalResult<Value> {
    let needle = string_arg(args, 0, "indexOf", span)?;
    let index = s
        .find(needle)
        .map(|byte| s[..byte].chars().count() as f64)
        .unwrap_or(-1.0);
    Ok(Value::Number(index))
}

/// All non-overlapping matches as an array of strings.
fn string_match(s: &String, args: &[Value], span: Span) -> EvalResult<Value> {
    let pattern = string_arg(args, 0, "match", span)?;
    let flags = flags_arg(args, 1, "match", span)?;
    let re = regex::compile(pattern, flags, span)?;

    let matches = re.find_iter(s).map(|m| Value::string(m.as_str())).collect();
    Ok(Value::array(matches))
}

fn string_replace_regex(s: &String, args: &[Value], span: Span) -> EvalResult<Value> {
    let pattern = string_arg(args, 0, "replaceRegex", span)?;
    let with = string_arg(args, 1, "replaceRegex", span)?;
    let flags = flags_arg(args, 2, "replaceRegex", span)?;
    let re = regex::compile(pattern, flags, span)?;

    Ok(Value::String(re.replace_all(s, with).into_owned()))
}
