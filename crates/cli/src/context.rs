// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-scenario state threaded through every step.
//!
//! The context owns the browser session and the parameter store for exactly
//! one scenario. The session is stopped once at scenario end: explicitly via
//! [`ScenarioContext::on_scenario_end`], or by `Drop` if the context goes
//! away first (early return, panic unwinding).

use crate::browser::{BrowserError, BrowserSession};
use crate::config::RunConfig;
use crate::params::ParameterStore;
use crate::time::ClockHandle;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ScenarioContext {
    name: String,
    params: ParameterStore,
    browser: Box<dyn BrowserSession>,
    clock: ClockHandle,
    config: Arc<RunConfig>,
    ended: bool,
}

impl ScenarioContext {
    /// Start a scenario; parameters are seeded from the run configuration
    pub fn new(
        name: impl Into<String>,
        browser: Box<dyn BrowserSession>,
        clock: ClockHandle,
        config: Arc<RunConfig>,
    ) -> Self {
        let params = ParameterStore::seeded(
            config
                .parameters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Self {
            name: name.into(),
            params,
            browser,
            clock,
            config,
            ended: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParameterStore {
        &mut self.params
    }

    pub fn browser(&mut self) -> &mut dyn BrowserSession {
        self.browser.as_mut()
    }

    pub fn clock(&self) -> &ClockHandle {
        &self.clock
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Browser and clock together, for steps that poll
    pub fn browser_and_clock(&mut self) -> (&mut dyn BrowserSession, &ClockHandle) {
        (self.browser.as_mut(), &self.clock)
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Stop the browser session. Only the first call reaches the driver.
    pub fn on_scenario_end(&mut self) -> Result<(), BrowserError> {
        if self.ended {
            return Ok(());
        }
        self.ended = true;
        debug!(scenario = %self.name, "stopping browser session");
        self.browser.stop()
    }
}

impl Drop for ScenarioContext {
    fn drop(&mut self) {
        if let Err(e) = self.on_scenario_end() {
            warn!(scenario = %self.name, error = %e, "failed to stop browser session");
        }
    }
}

impl std::fmt::Debug for ScenarioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioContext")
            .field("name", &self.name)
            .field("params", &self.params.len())
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
