// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Step values passed between the feature parser, registry, and executor.

use std::collections::HashMap;
use std::fmt;

/// Gherkin keyword a step was written (or expanded) with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Keyword {
    #[default]
    Given,
    When,
    Then,
    And,
    But,
    /// `*` bullet
    Star,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
            Self::Star => "*",
        }
    }

    /// Parse the keyword at the start of a step line
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "Given" => Some(Self::Given),
            "When" => Some(Self::When),
            "Then" => Some(Self::Then),
            "And" => Some(Self::And),
            "But" => Some(Self::But),
            "*" => Some(Self::Star),
            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data table attached to a step; the first row is the header
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepTable {
    rows: Vec<Vec<String>>,
}

impl StepTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn headers(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Body rows keyed by header, in row order
    pub fn hashes(&self) -> Vec<HashMap<&str, &str>> {
        let headers = self.headers();
        self.rows
            .iter()
            .skip(1)
            .map(|row| {
                headers
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect()
            })
            .collect()
    }

    /// Values of one column, in row order; `None` if the header is missing
    pub fn column(&self, header: &str) -> Option<Vec<&str>> {
        let index = self.headers().iter().position(|h| h == header)?;
        Some(
            self.rows
                .iter()
                .skip(1)
                .map(|row| row.get(index).map_or("", String::as_str))
                .collect(),
        )
    }
}

/// A sentence to execute, with its keyword and optional table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub keyword: Keyword,
    pub text: String,
    pub table: Option<StepTable>,
}

impl Step {
    pub fn new(keyword: Keyword, text: impl Into<String>) -> Self {
        Self {
            keyword,
            text: text.into(),
            table: None,
        }
    }

    pub fn given(text: impl Into<String>) -> Self {
        Self::new(Keyword::Given, text)
    }

    pub fn when(text: impl Into<String>) -> Self {
        Self::new(Keyword::When, text)
    }

    pub fn then(text: impl Into<String>) -> Self {
        Self::new(Keyword::Then, text)
    }

    pub fn with_table(mut self, table: StepTable) -> Self {
        self.table = Some(table);
        self
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyword, self.text)
    }
}

/// Outcome of a handler: done, or further steps to run in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Side effect already applied
    Done,
    /// One deferred step
    Next(Step),
    /// Deferred steps, executed strictly in order
    Sequence(Vec<Step>),
}

impl StepResult {
    /// Deferred steps in execution order (empty for `Done`)
    pub fn into_steps(self) -> Vec<Step> {
        match self {
            Self::Done => Vec::new(),
            Self::Next(step) => vec![step],
            Self::Sequence(steps) => steps,
        }
    }
}

/// Quote a value for embedding in a generated sentence
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Reverse [`quote`] escaping on a captured argument
pub fn unquote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped @ ('"' | '\\')) => out.push(escaped),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
