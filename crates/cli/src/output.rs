// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable run output and diagnostics.
//!
//! Reports go to any writer so they can be asserted on; diagnostics go to
//! stderr with ANSI color when it is a terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::feature::Feature;
use crate::registry::PatternRegistry;
use crate::runtime::RunSummary;
use crate::scenario::ScenarioReport;

#[derive(Clone, Copy)]
enum Tone {
    Error,
    Warning,
}

impl Tone {
    fn label(self) -> &'static str {
        match self {
            Tone::Error => "Error",
            Tone::Warning => "Warning",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Tone::Error => "\x1b[31m",
            Tone::Warning => "\x1b[33m",
        }
    }
}

fn write_diagnostic<W: Write>(writer: &mut W, tone: Tone, msg: impl Display, is_terminal: bool) {
    let _ = if is_terminal {
        writeln!(writer, "{}{}: {}\x1b[0m", tone.color(), tone.label(), msg)
    } else {
        writeln!(writer, "{}: {}", tone.label(), msg)
    };
}

/// Print an error message to stderr.
///
/// Displays in red when stderr is a terminal, plain text otherwise.
pub fn print_error(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

fn write_error<W: Write>(writer: &mut W, msg: impl Display, is_terminal: bool) {
    write_diagnostic(writer, Tone::Error, msg, is_terminal);
}

/// Print a warning message to stderr.
///
/// Displays in yellow when stderr is a terminal, plain text otherwise.
pub fn print_warning(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr(), msg, is_tty);
}

fn write_warning<W: Write>(writer: &mut W, msg: impl Display, is_terminal: bool) {
    write_diagnostic(writer, Tone::Warning, msg, is_terminal);
}

pub fn write_feature_header<W: Write>(
    out: &mut W,
    feature: &Feature,
    path: &Path,
) -> io::Result<()> {
    if feature.name.is_empty() {
        writeln!(out, "Feature: ({})", path.display())
    } else {
        writeln!(out, "Feature: {} ({})", feature.name, path.display())
    }
}

/// One line per scenario; failures add the failing step and its error
pub fn write_report<W: Write>(out: &mut W, report: &ScenarioReport) -> io::Result<()> {
    let status = if report.passed() { "passed" } else { "FAILED" };
    writeln!(
        out,
        "  {status}  {} ({}/{} steps, {} ms)",
        report.name,
        report.steps_run,
        report.steps_total,
        report.duration.as_millis()
    )?;
    if let Some(failure) = &report.failure {
        writeln!(out, "    step {}: {}", failure.index, failure.step)?;
        write!(out, "    ")?;
        write_error(out, &failure.error, false);
    }
    if let Some(e) = &report.stop_error {
        write!(out, "    ")?;
        write_warning(out, format_args!("failed to stop browser session: {e}"), false);
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    let noun = if summary.total() == 1 {
        "scenario"
    } else {
        "scenarios"
    };
    writeln!(
        out,
        "{} {noun}: {} passed, {} failed",
        summary.total(),
        summary.passed,
        summary.failed
    )
}

/// List every registered sentence with an example
pub fn write_step_catalog<W: Write>(out: &mut W, registry: &PatternRegistry) -> io::Result<()> {
    for (_, kind, example) in registry.entries() {
        writeln!(out, "{:<24} {}", kind.as_str(), example)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
