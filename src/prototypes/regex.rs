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

use regex::{Regex, RegexBuilder};

use crate::error::{EvalResult, SwaziError};
use crate::span::Span;

/* ==========================================================================
 * PATTERN COMPILATION
 * ==========================================================================
 */

/// Compiles `pattern` with a flag string made of `i`, `m`, `s` and `x`.
///
/// # Errors
/// - `SyntaxError` for an unknown flag
/// - `SyntaxError` when the pattern itself does not compile
pub fn compile(pattern: &str, flags: &str, span: Span) -> EvalResult<Regex> {
    let mut builder = RegexBuilder::new(pattern);

    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            other => {
                return Err(SwaziError::syntax_error(
                    format!("Invalid regex flag '{}'", other),
                    span,
                )
                .with_help("supported flags are i, m, s and x"))
            }
        };
    }

    builder
        .build()
        .map_err(|e| SwaziError::syntax_error(format!("Invalid regex pattern '{}': {}", pattern, e), span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn flags_configure_the_regex() {
        let re = compile("^cat", "im", Span::builtin()).unwrap();
        assert!(re.is_match("dog\nCAT"));
    }

    #[test]
    fn unknown_flag_is_a_syntax_error() {
        let err = compile("a", "g", Span::builtin()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SyntaxError);
        assert!(err.help.is_some());
    }

    #[test]
    fn bad_pattern_is_a_syntax_error() {
        let err = compile("(", "", Span::builtin()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SyntaxError);
    }
}
