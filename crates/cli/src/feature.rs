// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Feature file parser.
//!
//! Parses the Gherkin subset scenarios are written in:
//!   Feature: Checkout
//!     Background:
//!       Given I am on "/login"
//!     @smoke
//!     Scenario: Pay by card
//!       When I press "Pay"
//!       * I am on url composed by
//!         | parameters |
//!         | base       |
//!
//! `#` comments and blank lines are ignored. Free text is allowed between
//! the `Feature:` line and the first section.

use crate::step::{Keyword, Step, StepTable};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a feature file
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Failed to read feature file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// A parsed feature file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    /// Steps prepended to every scenario
    pub background: Vec<Step>,
    pub scenarios: Vec<Scenario>,
}

/// One scenario; `steps` already include the background
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    /// 1-based line of the `Scenario:` header
    pub line: usize,
    pub tags: Vec<String>,
    pub steps: Vec<Step>,
}

enum Section {
    Preamble,
    Background,
    Scenario,
}

/// Load and parse a feature file
pub fn load(path: &Path) -> Result<Feature, FeatureError> {
    let source = std::fs::read_to_string(path)?;
    parse(&source)
}

/// Parse feature source text
pub fn parse(source: &str) -> Result<Feature, FeatureError> {
    let mut feature = Feature::default();
    let mut seen_feature = false;
    let mut section = Section::Preamble;
    let mut pending_tags: Vec<String> = Vec::new();
    let mut table_rows: Vec<Vec<String>> = Vec::new();

    for (lineno, raw) in source.lines().enumerate() {
        let line = raw.trim();
        let lineno = lineno + 1;
        let syntax = |message: String| FeatureError::Syntax {
            line: lineno,
            message,
        };

        if line.starts_with('|') {
            if last_step(&mut feature, &section).is_none() {
                return Err(syntax("table row without a step".to_string()));
            }
            table_rows.push(parse_row(line).map_err(syntax)?);
            continue;
        }
        // Blank lines and comments may sit inside a table.
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        attach_table(&mut feature, &section, &mut table_rows);

        if line.starts_with('@') {
            pending_tags.extend(line.split_whitespace().map(|t| t.trim_start_matches('@').to_string()));
            continue;
        }

        if let Some(name) = line.strip_prefix("Feature:") {
            if seen_feature {
                return Err(syntax("only one Feature is allowed per file".to_string()));
            }
            seen_feature = true;
            feature.name = name.trim().to_string();
            pending_tags.clear();
            continue;
        }

        if line.starts_with("Background:") {
            if !seen_feature {
                return Err(syntax("Background before Feature".to_string()));
            }
            if !feature.scenarios.is_empty() || !feature.background.is_empty() {
                return Err(syntax(
                    "Background must come once, before the first Scenario".to_string(),
                ));
            }
            section = Section::Background;
            continue;
        }

        if line.starts_with("Scenario Outline:") || line.starts_with("Examples:") {
            return Err(syntax("Scenario Outline is not supported".to_string()));
        }

        if let Some(name) = line.strip_prefix("Scenario:") {
            if !seen_feature {
                return Err(syntax("Scenario before Feature".to_string()));
            }
            feature.scenarios.push(Scenario {
                name: name.trim().to_string(),
                line: lineno,
                tags: std::mem::take(&mut pending_tags),
                steps: Vec::new(),
            });
            section = Section::Scenario;
            continue;
        }

        if line.starts_with("\"\"\"") {
            return Err(syntax("doc strings are not supported".to_string()));
        }

        match parse_step(line) {
            Some(step) => match section {
                Section::Preamble => {
                    return Err(syntax(format!("step outside of a scenario: {}", line)));
                }
                Section::Background => feature.background.push(step),
                Section::Scenario => {
                    if let Some(scenario) = feature.scenarios.last_mut() {
                        scenario.steps.push(step);
                    }
                }
            },
            // Free-form description, only allowed before the first section
            None if matches!(section, Section::Preamble) && seen_feature => {}
            None => return Err(syntax(format!("unexpected line: {}", line))),
        }
    }
    attach_table(&mut feature, &section, &mut table_rows);

    if !seen_feature {
        return Err(FeatureError::Syntax {
            line: 1,
            message: "missing Feature: header".to_string(),
        });
    }

    for scenario in &mut feature.scenarios {
        let mut steps = feature.background.clone();
        steps.append(&mut scenario.steps);
        scenario.steps = steps;
    }
    Ok(feature)
}

fn parse_step(line: &str) -> Option<Step> {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let keyword = Keyword::parse(word)?;
    if rest.is_empty() {
        return None;
    }
    Some(Step::new(keyword, rest))
}

fn last_step<'a>(feature: &'a mut Feature, section: &Section) -> Option<&'a mut Step> {
    match section {
        Section::Preamble => None,
        Section::Background => feature.background.last_mut(),
        Section::Scenario => feature.scenarios.last_mut()?.steps.last_mut(),
    }
}

fn attach_table(feature: &mut Feature, section: &Section, rows: &mut Vec<Vec<String>>) {
    if rows.is_empty() {
        return;
    }
    let mut rows = std::mem::take(rows);
    if let Some(step) = last_step(feature, section) {
        if let Some(existing) = step.table.take() {
            let mut merged = existing.rows().to_vec();
            merged.append(&mut rows);
            rows = merged;
        }
        step.table = Some(StepTable::new(rows));
    }
}

/// Split `| a | b\|c |` into cells; `\|` escapes a pipe inside a cell
fn parse_row(line: &str) -> Result<Vec<String>, String> {
    let inner = line
        .strip_prefix('|')
        .and_then(|l| l.strip_suffix('|'))
        .ok_or_else(|| "table row must start and end with '|'".to_string())?;

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('|') => cell.push('|'),
                Some(other) => {
                    cell.push('\\');
                    cell.push(other);
                }
                None => cell.push('\\'),
            },
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    Ok(cells)
}

#[cfg(test)]
#[path = "feature_tests.rs"]
mod tests;
