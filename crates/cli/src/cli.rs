// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Run browser acceptance scenarios written as plain sentences
#[derive(Parser, Debug, Clone)]
#[command(
    name = "browsersteps",
    version,
    about = "Run browser acceptance scenarios written as plain sentences"
)]
pub struct Cli {
    /// Feature files to run, in order
    #[arg(value_name = "FEATURE")]
    pub features: Vec<PathBuf>,

    /// Site fixture (TOML) the scenarios run against
    #[arg(long, env = "BROWSERSTEPS_SITE")]
    pub site: Option<PathBuf>,

    /// Run configuration (TOML)
    #[arg(long, env = "BROWSERSTEPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Default wait budget in seconds, overriding the config file
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Append every executed step to this JSONL file
    #[arg(long, env = "BROWSERSTEPS_CAPTURE")]
    pub capture: Option<PathBuf>,

    /// Only run scenarios whose name contains this text
    #[arg(long, value_name = "FILTER")]
    pub name: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the built-in step sentences and exit
    #[arg(long)]
    pub list_steps: bool,
}

impl Cli {
    /// Check argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.list_steps {
            return Ok(());
        }
        if self.features.is_empty() {
            return Err("at least one feature file is required");
        }
        if self.site.is_none() {
            return Err("--site is required to run features");
        }
        Ok(())
    }

    /// Default log filter for the verbosity level; `RUST_LOG` wins over it
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
