// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Step failure taxonomy.
//!
//! Every failure is local to one step. The executor never catches or retries
//! these (only the retry assertion re-polls, internally); the first error
//! aborts the scenario and is reported with its message.

use crate::browser::BrowserError;
use crate::registry::ResolveError;
use thiserror::Error;

/// Errors raised while resolving or executing a step
#[derive(Debug, Error)]
pub enum StepError {
    /// No registered pattern matches the sentence
    #[error("Undefined step: no definition matches \"{sentence}\"")]
    UnresolvedStep { sentence: String },

    /// Two patterns of equal specificity match the sentence
    #[error("Ambiguous step \"{sentence}\": matches both '{first}' and '{second}'")]
    AmbiguousStep {
        sentence: String,
        first: String,
        second: String,
    },

    /// A composite step produced a child that does not resolve
    #[error("Composite step \"{parent}\" expanded to unresolvable step \"{child}\"")]
    Composition { parent: String, child: String },

    /// Composite expansion nested deeper than the configured limit
    #[error("Composite step \"{sentence}\" exceeded the maximum expansion depth of {limit}")]
    ExpansionTooDeep { sentence: String, limit: usize },

    /// Locator matched nothing, or fewer elements than the requested ordinal
    #[error("{}", not_found_message(.locator, .requested, .found))]
    ElementNotFound {
        locator: String,
        requested: Option<usize>,
        found: usize,
    },

    /// A single-shot predicate was false
    #[error("Assertion failed for {subject}: expected {expected}, but {observed}")]
    AssertionFailed {
        subject: String,
        expected: String,
        observed: String,
    },

    /// The retry assertion exhausted its budget
    #[error(
        "The text \"{expected}\" was not found anywhere in the text of the current page \
         after {attempts} attempt(s); last observed text: \"{last_observed}\""
    )]
    AssertionTimeout {
        expected: String,
        attempts: u64,
        last_observed: String,
    },

    /// Parameter store miss
    #[error("Unknown parameter \"{name}\"")]
    UnknownParameter { name: String },

    /// Malformed step argument (ordinal, count, timeout, date modifier, table)
    #[error("Invalid step argument: {message}")]
    InvalidArgument { message: String },

    /// Driver-level failure
    #[error(transparent)]
    Browser(#[from] BrowserError),
}

impl StepError {
    /// Build an `ElementNotFound` for a locator that matched nothing
    pub fn not_found(locator: impl ToString) -> Self {
        Self::ElementNotFound {
            locator: locator.to_string(),
            requested: None,
            found: 0,
        }
    }

    /// Build an `AssertionFailed`
    pub fn assertion(
        subject: impl Into<String>,
        expected: impl Into<String>,
        observed: impl Into<String>,
    ) -> Self {
        Self::AssertionFailed {
            subject: subject.into(),
            expected: expected.into(),
            observed: observed.into(),
        }
    }

    /// Build an `InvalidArgument`
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Stable snake_case name, used in capture logs and reports
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::UnresolvedStep { .. } => "unresolved_step",
            Self::AmbiguousStep { .. } => "ambiguous_step",
            Self::Composition { .. } => "composition",
            Self::ExpansionTooDeep { .. } => "expansion_too_deep",
            Self::ElementNotFound { .. } => "element_not_found",
            Self::AssertionFailed { .. } => "assertion_failed",
            Self::AssertionTimeout { .. } => "assertion_timeout",
            Self::UnknownParameter { .. } => "unknown_parameter",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Browser(_) => "browser",
        }
    }

    /// Whether this error comes from composite expansion
    pub fn is_composition(&self) -> bool {
        matches!(
            self,
            Self::Composition { .. } | Self::ExpansionTooDeep { .. }
        )
    }
}

impl From<ResolveError> for StepError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoMatch { sentence } => Self::UnresolvedStep { sentence },
            ResolveError::Ambiguous {
                sentence,
                first,
                second,
            } => Self::AmbiguousStep {
                sentence,
                first,
                second,
            },
        }
    }
}

fn not_found_message(locator: &str, requested: &Option<usize>, found: &usize) -> String {
    match requested {
        Some(n) => format!(
            "The element {} number {} was not found anywhere in the page (requested {}, found {})",
            locator, n, n, found
        ),
        None => format!("The element {} was not found anywhere in the page", locator),
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
