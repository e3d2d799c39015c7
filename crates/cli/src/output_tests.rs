// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::browser::BrowserError;
use crate::error::StepError;
use crate::scenario::{ScenarioStatus, StepFailure};
use crate::step::Step;
use crate::steps::default_registry;
use std::time::Duration;

fn render<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
    let mut buf = Vec::new();
    f(&mut buf);
    String::from_utf8(buf).unwrap()
}

fn report(failure: Option<StepFailure>, stop_error: Option<BrowserError>) -> ScenarioReport {
    ScenarioReport {
        name: "checkout".to_string(),
        status: if failure.is_some() {
            ScenarioStatus::Failed
        } else {
            ScenarioStatus::Passed
        },
        steps_run: 2,
        steps_total: 3,
        failure,
        stop_error,
        duration: Duration::from_millis(12),
    }
}

#[yare::parameterized(
    error_plain = { Tone::Error, false, "Error: boom\n" },
    error_tty = { Tone::Error, true, "\x1b[31mError: boom\x1b[0m\n" },
    warning_plain = { Tone::Warning, false, "Warning: boom\n" },
    warning_tty = { Tone::Warning, true, "\x1b[33mWarning: boom\x1b[0m\n" },
)]
fn test_diagnostic_coloring(tone: Tone, is_terminal: bool, expected: &str) {
    let out = render(|buf| write_diagnostic(buf, tone, "boom", is_terminal));
    assert_eq!(out, expected);
}

#[test]
fn test_write_error_and_warning_are_plain_off_terminal() {
    let out = render(|buf| {
        write_error(buf, "bad site", false);
        write_warning(buf, "no scenarios", false);
    });
    assert_eq!(out, "Error: bad site\nWarning: no scenarios\n");
}

#[test]
fn test_feature_header() {
    let feature = Feature {
        name: "Orders".to_string(),
        ..Feature::default()
    };
    let out = render(|buf| write_feature_header(buf, &feature, Path::new("orders.feature")).unwrap());
    assert_eq!(out, "Feature: Orders (orders.feature)\n");

    let out = render(|buf| {
        write_feature_header(buf, &Feature::default(), Path::new("x.feature")).unwrap()
    });
    assert_eq!(out, "Feature: (x.feature)\n");
}

#[test]
fn test_passed_report_is_one_line() {
    let out = render(|buf| write_report(buf, &report(None, None)).unwrap());
    assert_eq!(out, "  passed  checkout (2/3 steps, 12 ms)\n");
}

#[test]
fn test_failed_report_names_step_and_error() {
    let failure = StepFailure {
        step: Step::then(r#"I should see "Paid""#),
        index: 2,
        error: StepError::UnknownParameter {
            name: "order".to_string(),
        },
    };
    let out = render(|buf| {
        write_report(buf, &report(Some(failure), Some(BrowserError::Stopped))).unwrap()
    });
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "  FAILED  checkout (2/3 steps, 12 ms)");
    assert_eq!(lines[1], r#"    step 2: Then I should see "Paid""#);
    assert!(lines[2].starts_with("    Error: "), "{}", lines[2]);
    assert!(lines[2].contains("order"));
    assert!(lines[3].starts_with("    Warning: failed to stop browser session"));
}

#[yare::parameterized(
    empty = { 0, 0, "0 scenarios: 0 passed, 0 failed\n" },
    single = { 1, 0, "1 scenario: 1 passed, 0 failed\n" },
    mixed = { 3, 2, "5 scenarios: 3 passed, 2 failed\n" },
)]
fn test_summary(passed: usize, failed: usize, expected: &str) {
    let out = render(|buf| write_summary(buf, &RunSummary { passed, failed }).unwrap());
    assert_eq!(out, expected);
}

#[test]
fn test_step_catalog_lists_every_entry() {
    let registry = default_registry().unwrap();
    let out = render(|buf| write_step_catalog(buf, &registry).unwrap());
    assert_eq!(out.lines().count(), registry.len());
    assert!(out.lines().any(|l| l.starts_with("visit ")));
    assert!(out.contains(r#"I am on "/login""#));
}
