// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario lifecycle: one browser session per scenario, stopped on every
//! exit path, first failure aborts.

use crate::browser::{BrowserError, BrowserSession};
use crate::config::RunConfig;
use crate::context::ScenarioContext;
use crate::error::StepError;
use crate::executor::StepExecutor;
use crate::feature::Scenario;
use crate::step::Step;
use crate::time::ClockHandle;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioStatus {
    Passed,
    Failed,
}

/// The step that aborted a scenario
#[derive(Debug)]
pub struct StepFailure {
    pub step: Step,
    /// 1-based index among the scenario's top-level steps
    pub index: usize,
    pub error: StepError,
}

/// Outcome of one scenario
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: String,
    pub status: ScenarioStatus,
    /// Top-level steps attempted, including the failing one
    pub steps_run: usize,
    pub steps_total: usize,
    pub failure: Option<StepFailure>,
    /// Stopping the session failed; does not change `status`
    pub stop_error: Option<BrowserError>,
    pub duration: Duration,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }
}

/// Runs scenarios against fresh browser sessions
#[derive(Debug)]
pub struct ScenarioRunner {
    executor: StepExecutor,
    config: Arc<RunConfig>,
    clock: ClockHandle,
}

impl ScenarioRunner {
    pub fn new(executor: StepExecutor, config: Arc<RunConfig>, clock: ClockHandle) -> Self {
        Self {
            executor,
            config,
            clock,
        }
    }

    pub fn executor(&self) -> &StepExecutor {
        &self.executor
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run every step in order on `browser`, then stop it
    pub fn run(&self, scenario: &Scenario, browser: Box<dyn BrowserSession>) -> ScenarioReport {
        let started = Instant::now();
        info!(scenario = %scenario.name, steps = scenario.steps.len(), "scenario started");

        let mut ctx = ScenarioContext::new(
            scenario.name.clone(),
            browser,
            self.clock.clone(),
            Arc::clone(&self.config),
        );

        let mut steps_run = 0;
        let mut failure = None;
        for (i, step) in scenario.steps.iter().enumerate() {
            steps_run += 1;
            if let Err(error) = self.executor.execute(step, &mut ctx) {
                failure = Some(StepFailure {
                    step: step.clone(),
                    index: i + 1,
                    error,
                });
                break;
            }
        }

        let stop_error = ctx.on_scenario_end().err();
        if let Some(e) = &stop_error {
            warn!(scenario = %scenario.name, error = %e, "failed to stop browser session");
        }

        let status = if failure.is_some() {
            ScenarioStatus::Failed
        } else {
            ScenarioStatus::Passed
        };
        info!(scenario = %scenario.name, ?status, steps_run, "scenario finished");

        ScenarioReport {
            name: scenario.name.clone(),
            status,
            steps_run,
            steps_total: scenario.steps.len(),
            failure,
            stop_error,
            duration: started.elapsed(),
        }
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
