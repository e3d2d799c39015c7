// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime module for running feature files from the command line.
//!
//! This module provides:
//! - [`RuntimeBuilder`] - Loads config, site fixture, features, and capture
//! - [`Runtime`] - Runs the loaded scenarios and reports them

mod builder;
mod core;

pub use builder::{RuntimeBuildError, RuntimeBuilder};
pub use core::{LoadedFeature, RunSummary, Runtime};
