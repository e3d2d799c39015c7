// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Browser Steps
//!
//! Runs browser acceptance scenarios written as plain English sentences.
//! Each sentence is matched against a catalog of step patterns and
//! dispatched to a handler that drives a [`browser::BrowserSession`].
//! Handlers may expand into further sentences ("composite" steps), which
//! are resolved and run through the same catalog.
//!
//! The crate ships a deterministic fixture browser driven by a TOML site
//! description, so feature files can be run without a real browser.
//!
#![doc = include_str!("../README.md")]

pub mod browser;
/// Re-exported capture types from browsersteps-capture crate.
pub mod capture {
    pub use browsersteps_capture::{CaptureLog, CapturedExecution, CapturedOutcome, CapturedStep};
}
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod feature;
pub mod locate;
pub mod output;
pub mod params;
pub mod registry;
pub mod retry;
pub mod runtime;
pub mod scenario;
pub mod step;
pub mod steps;
pub mod time;

#[cfg(test)]
mod test_support;
