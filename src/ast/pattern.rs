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

/// Left-hand side of a variable declaration.
#[derive(Debug, Clone)]
pub enum Pattern {
    Identifier(String),

    /// `[a, , b, ...rest]`
    Array(Vec<ArrayPatternElement>),

    /// `{ a, b: c }`
    Object(Vec<ObjectPatternProperty>),
}

#[derive(Debug, Clone)]
pub enum ArrayPatternElement {
    /// Skipped slot.
    Hole,
    Binding(String),
    Rest(String),
}

#[derive(Debug, Clone)]
pub struct ObjectPatternProperty {
    pub key: String,
    pub target: String,
}

impl Pattern {
    /// Every name the pattern introduces, in declaration order.
    pub fn bound_names(&self) -> Vec<&str> {
        match self {
            Pattern::Identifier(name) => vec![name.as_str()],
            Pattern::Array(elements) => elements
                .iter()
                .filter_map(|el| match el {
                    ArrayPatternElement::Hole => None,
                    ArrayPatternElement::Binding(n) | ArrayPatternElement::Rest(n) => Some(n.as_str()),
                })
                .collect(),
            Pattern::Object(props) => props.iter().map(|p| p.target.as_str()).collect(),
        }
    }
}
