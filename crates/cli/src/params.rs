// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario-scoped named values.

use crate::error::StepError;
use std::collections::HashMap;

/// Named values captured during (or seeded before) a scenario run.
///
/// No name validation, last write wins. The store lives inside the scenario
/// context and is dropped with it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterStore {
    values: HashMap<String, String>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded from configuration
    pub fn seeded<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a value, silently replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Result<&str, StepError> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| StepError::UnknownParameter {
                name: name.to_string(),
            })
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Concatenate tokens, substituting each one that names a stored
    /// parameter and using the others verbatim.
    pub fn compose<'a, I>(&self, tokens: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens
            .into_iter()
            .map(|token| self.values.get(token).map_or(token, String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
