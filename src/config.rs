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

use std::time::Duration;

use serde::Deserialize;

/// Runtime knobs for one interpreter instance.
///
/// Can be built in code or loaded from JSON:
///
/// ```json
/// { "max_call_depth": 128, "timer_slice_ms": 20, "file_name": "main.swz" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Nested user-function calls allowed before failing.
    pub max_call_depth: usize,

    /// Sleep granularity of timer threads; bounds cancellation latency.
    pub timer_slice_ms: u64,

    /// Name shown in rendered diagnostics.
    pub file_name: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 256,
            timer_slice_ms: 50,
            file_name: "<script>".to_string(),
        }
    }
}

impl InterpreterConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_timer_slice(mut self, slice: Duration) -> Self {
        self.timer_slice_ms = slice.as_millis().max(1) as u64;
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn timer_slice(&self) -> Duration {
        Duration::from_millis(self.timer_slice_ms.max(1))
    }
}
