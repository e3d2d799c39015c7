// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Browser Steps binary entry point.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use browsersteps::cli::Cli;
use browsersteps::output::{print_error, print_warning, write_step_catalog};
use browsersteps::runtime::RuntimeBuilder;
use browsersteps::steps::default_registry;

/// Exit code for configuration, fixture, and feature loading errors
const EXIT_LOAD_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    if cli.list_steps {
        return list_steps();
    }

    let runtime = match RuntimeBuilder::new(cli).and_then(|builder| builder.build()) {
        Ok(runtime) => runtime,
        Err(e) => {
            print_error(e);
            return ExitCode::from(EXIT_LOAD_ERROR);
        }
    };

    if runtime.selected_count() == 0 {
        print_warning("no scenarios matched");
    }

    let mut stdout = io::stdout().lock();
    match runtime.run(&mut stdout) {
        Ok(summary) if summary.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            print_error(format_args!("failed to write report: {e}"));
            ExitCode::FAILURE
        }
    }
}

fn list_steps() -> ExitCode {
    let registry = match default_registry() {
        Ok(registry) => registry,
        Err(e) => {
            print_error(e);
            return ExitCode::from(EXIT_LOAD_ERROR);
        }
    };
    let mut stdout = io::stdout().lock();
    if let Err(e) = write_step_catalog(&mut stdout, &registry).and_then(|()| stdout.flush()) {
        print_error(e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
