// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! RuntimeBuilder for constructing Runtime with fluent API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use browsersteps_capture::CaptureLog;
use thiserror::Error;
use tracing::info;

use crate::browser::{FixtureError, SiteFixture};
use crate::cli::Cli;
use crate::config::{ConfigError, RunConfig};
use crate::executor::StepExecutor;
use crate::feature::{self, FeatureError};
use crate::registry::RegistryError;
use crate::scenario::ScenarioRunner;
use crate::steps::default_registry;
use crate::time::ClockHandle;

use super::core::{LoadedFeature, Runtime};

/// Errors raised while preparing a run; all are reported before any
/// scenario starts
#[derive(Debug, Error)]
pub enum RuntimeBuildError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Site(#[from] FixtureError),

    #[error("{}: {source}", .path.display())]
    Feature {
        path: PathBuf,
        #[source]
        source: FeatureError,
    },

    #[error("Failed to build step registry: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to open capture file {}: {source}", .path.display())]
    Capture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Builder for constructing Runtime instances.
///
/// ```ignore
/// let runtime = RuntimeBuilder::new(cli)?
///     .with_clock(ClockHandle::fake_at_epoch())
///     .build()?;
/// ```
pub struct RuntimeBuilder {
    cli: Cli,
    config: Option<RunConfig>,
    clock: ClockHandle,
}

impl RuntimeBuilder {
    /// Create a new builder from CLI args.
    ///
    /// Validates CLI arguments during construction.
    pub fn new(cli: Cli) -> Result<Self, RuntimeBuildError> {
        cli.validate()
            .map_err(|msg| RuntimeBuildError::Validation(msg.to_string()))?;
        Ok(Self {
            cli,
            config: None,
            clock: ClockHandle::system(),
        })
    }

    /// Use this configuration instead of `--config`
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_clock(mut self, clock: ClockHandle) -> Self {
        self.clock = clock;
        self
    }

    /// Build the Runtime.
    pub fn build(self) -> Result<Runtime, RuntimeBuildError> {
        let mut config = match (self.config, &self.cli.config) {
            (Some(config), _) => config,
            (None, Some(path)) => RunConfig::load(path)?,
            (None, None) => RunConfig::default(),
        };
        if let Some(timeout) = self.cli.timeout {
            config.wait_timeout_secs = timeout;
        }
        config.validate()?;

        let site_path = self
            .cli
            .site
            .as_deref()
            .ok_or_else(|| RuntimeBuildError::Validation("--site is required".to_string()))?;
        let site = Arc::new(SiteFixture::load(site_path)?);
        info!(site = %site.name, pages = site.pages.len(), "site fixture loaded");

        let features = self
            .cli
            .features
            .iter()
            .map(|path| load_feature(path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut executor = StepExecutor::new(Arc::new(default_registry()?))
            .with_max_depth(config.max_expansion_depth);
        if let Some(path) = &self.cli.capture {
            let capture = CaptureLog::with_file(path).map_err(|source| RuntimeBuildError::Capture {
                path: path.clone(),
                source,
            })?;
            executor = executor.with_capture(capture);
        }

        let runner = ScenarioRunner::new(executor, Arc::new(config), self.clock);
        Ok(Runtime::new(runner, site, features, self.cli.name))
    }
}

fn load_feature(path: &Path) -> Result<LoadedFeature, RuntimeBuildError> {
    let feature = feature::load(path).map_err(|source| RuntimeBuildError::Feature {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LoadedFeature {
        path: path.to_path_buf(),
        feature,
    })
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
