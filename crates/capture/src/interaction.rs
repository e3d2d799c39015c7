// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured step data types.

use crate::duration_serde;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// One executed step, as recorded by the capture log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapturedExecution {
    /// Sequence number within the log
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Elapsed time since capture started
    #[serde(rename = "elapsed_ms", with = "duration_serde")]
    pub elapsed: Duration,

    /// The step that ran
    pub step: CapturedStep,

    /// What happened
    pub outcome: CapturedOutcome,
}

/// Step identity at the time it was executed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedStep {
    /// Scenario the step belongs to
    pub scenario: String,
    /// Nesting depth; 0 for steps written in the feature file
    pub depth: usize,
    /// Gherkin keyword (`Given`, `When`, ...)
    pub keyword: String,
    /// Sentence text as matched against the registry
    pub sentence: String,
}

impl CapturedStep {
    pub fn new(
        scenario: impl Into<String>,
        depth: usize,
        keyword: impl Into<String>,
        sentence: impl Into<String>,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            depth,
            keyword: keyword.into(),
            sentence: sentence.into(),
        }
    }
}

/// Captured outcome of a single step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CapturedOutcome {
    /// Handler applied its side effect directly
    Passed { kind: String },
    /// Handler returned further steps, all of which passed
    Expanded { kind: String, children: usize },
    /// Step (or one of its children) failed
    Failed {
        /// Step kind, absent when the sentence did not resolve
        kind: Option<String>,
        error: String,
        message: String,
    },
}

impl CapturedOutcome {
    /// Whether this outcome is a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
