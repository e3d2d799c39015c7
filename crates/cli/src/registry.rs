// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sentence pattern registry.
//!
//! Patterns are regular expressions compiled once at startup and bound to a
//! [`StepKind`]. When several patterns match a sentence the most specific one
//! wins, where specificity is the number of literal characters outside
//! groups and classes. Two patterns that could both claim the same sentence
//! at equal specificity are rejected when the second one is registered.

use crate::steps::StepKind;
use regex::Regex;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::trace;

/// Errors raised while building a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid step pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Step pattern '{pattern}' is registered twice")]
    Duplicate { pattern: String },

    #[error("Step pattern '{pattern}' does not match its own example \"{example}\"")]
    ExampleMismatch { pattern: String, example: String },

    #[error(
        "Step patterns '{first}' and '{second}' are ambiguous: both match \"{example}\" \
         with equal specificity"
    )]
    Ambiguous {
        first: String,
        second: String,
        example: String,
    },
}

/// Why a sentence did not resolve to a single pattern
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No step pattern matches \"{sentence}\"")]
    NoMatch { sentence: String },

    #[error("\"{sentence}\" matches both '{first}' and '{second}' with equal specificity")]
    Ambiguous {
        sentence: String,
        first: String,
        second: String,
    },
}

/// A sentence matched against a registered pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepInvocation {
    pub kind: StepKind,
    /// Captured groups in order; unmatched optional groups are empty
    pub args: Vec<String>,
    /// Source of the pattern that matched
    pub pattern: String,
}

#[derive(Debug)]
struct Entry {
    regex: Regex,
    kind: StepKind,
    example: String,
    /// Literal characters outside groups, in order
    literal: String,
    specificity: usize,
}

/// Registered patterns, in registration order
#[derive(Debug, Default)]
pub struct PatternRegistry {
    entries: Vec<Entry>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern with an example sentence it must match.
    ///
    /// Registration fails if a pattern of equal specificity already matches
    /// one of the candidate sentences: both examples, plus the literal text
    /// of the two patterns joined in either order.
    pub fn register(
        &mut self,
        pattern: &str,
        kind: StepKind,
        example: &str,
    ) -> Result<(), RegistryError> {
        if self.entries.iter().any(|e| e.regex.as_str() == pattern) {
            return Err(RegistryError::Duplicate {
                pattern: pattern.to_string(),
            });
        }

        let regex = Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if !regex.is_match(example) {
            return Err(RegistryError::ExampleMismatch {
                pattern: pattern.to_string(),
                example: example.to_string(),
            });
        }

        let literal = literal_text(pattern);
        let specificity = literal.chars().count();
        for existing in &self.entries {
            if existing.specificity != specificity {
                continue;
            }
            let candidates = [
                example.to_string(),
                existing.example.clone(),
                format!("{}{}", existing.literal, literal),
                format!("{}{}", literal, existing.literal),
            ];
            if let Some(shared) = candidates
                .into_iter()
                .find(|c| regex.is_match(c) && existing.regex.is_match(c))
            {
                return Err(RegistryError::Ambiguous {
                    first: existing.regex.as_str().to_string(),
                    second: pattern.to_string(),
                    example: shared,
                });
            }
        }

        self.entries.push(Entry {
            regex,
            kind,
            example: example.to_string(),
            literal,
            specificity,
        });
        Ok(())
    }

    /// Match a sentence, returning the most specific invocation.
    ///
    /// Two matching patterns tied at the top specificity are reported as
    /// [`ResolveError::Ambiguous`] rather than broken by registration order.
    pub fn resolve(&self, sentence: &str) -> Result<StepInvocation, ResolveError> {
        let mut best: Option<(&Entry, regex::Captures<'_>)> = None;
        let mut tied: Option<&Entry> = None;
        for entry in &self.entries {
            let Some(captures) = entry.regex.captures(sentence) else {
                continue;
            };
            trace!(pattern = entry.regex.as_str(), "pattern matched");
            let rank = best
                .as_ref()
                .map(|(current, _)| entry.specificity.cmp(&current.specificity));
            match rank {
                Some(Ordering::Less) => {}
                Some(Ordering::Equal) => tied = Some(entry),
                _ => {
                    best = Some((entry, captures));
                    tied = None;
                }
            }
        }

        let Some((entry, captures)) = best else {
            return Err(ResolveError::NoMatch {
                sentence: sentence.to_string(),
            });
        };
        if let Some(other) = tied {
            return Err(ResolveError::Ambiguous {
                sentence: sentence.to_string(),
                first: entry.regex.as_str().to_string(),
                second: other.regex.as_str().to_string(),
            });
        }
        Ok(StepInvocation {
            kind: entry.kind,
            args: captures
                .iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
            pattern: entry.regex.as_str().to_string(),
        })
    }

    /// Whether the sentence resolves to exactly one pattern
    pub fn is_resolvable(&self, sentence: &str) -> bool {
        self.resolve(sentence).is_ok()
    }

    /// Registered `(pattern, kind, example)` triples, in registration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, StepKind, &str)> + '_ {
        self.entries
            .iter()
            .map(|e| (e.regex.as_str(), e.kind, e.example.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Literal characters outside groups, classes, and operators; its length is
/// the pattern's specificity
fn literal_text(pattern: &str) -> String {
    let mut literal = String::new();
    let mut depth = 0usize;
    let mut in_class = false;
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next();
                if depth == 0 && !in_class {
                    literal.extend(escaped);
                }
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            _ if in_class => {}
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '^' | '$' | '*' | '+' | '?' | '{' | '}' | '|' | '.' => {}
            _ if depth == 0 => literal.push(c),
            _ => {}
        }
    }
    literal
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
