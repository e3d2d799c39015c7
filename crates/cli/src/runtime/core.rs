// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core Runtime struct for running loaded features.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::browser::{FixtureBrowser, SiteFixture};
use crate::feature::{Feature, Scenario};
use crate::output;
use crate::scenario::ScenarioRunner;

/// A parsed feature together with the file it came from
#[derive(Clone, Debug)]
pub struct LoadedFeature {
    pub path: PathBuf,
    pub feature: Feature,
}

/// Scenario counts for one run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// True when no scenario failed; an empty run counts as passing
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Core runtime for running scenarios.
///
/// Owns the scenario runner, the shared site fixture, and the loaded
/// features. Each scenario gets its own browser session over the site.
pub struct Runtime {
    runner: ScenarioRunner,
    site: Arc<SiteFixture>,
    features: Vec<LoadedFeature>,
    /// Substring filter on scenario names
    name_filter: Option<String>,
}

impl Runtime {
    pub fn new(
        runner: ScenarioRunner,
        site: Arc<SiteFixture>,
        features: Vec<LoadedFeature>,
        name_filter: Option<String>,
    ) -> Self {
        Self {
            runner,
            site,
            features,
            name_filter,
        }
    }

    pub fn runner(&self) -> &ScenarioRunner {
        &self.runner
    }

    pub fn features(&self) -> &[LoadedFeature] {
        &self.features
    }

    fn selected(&self, scenario: &Scenario) -> bool {
        match &self.name_filter {
            Some(filter) => scenario.name.contains(filter.as_str()),
            None => true,
        }
    }

    /// Number of scenarios the name filter lets through
    pub fn selected_count(&self) -> usize {
        self.features
            .iter()
            .flat_map(|loaded| &loaded.feature.scenarios)
            .filter(|s| self.selected(s))
            .count()
    }

    /// Run every selected scenario in file order, writing reports to `out`
    pub fn run(&self, out: &mut impl Write) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();
        for loaded in &self.features {
            let scenarios: Vec<&Scenario> = loaded
                .feature
                .scenarios
                .iter()
                .filter(|s| self.selected(s))
                .collect();
            if scenarios.is_empty() {
                debug!(path = %loaded.path.display(), "no scenarios selected");
                continue;
            }

            output::write_feature_header(out, &loaded.feature, &loaded.path)?;
            for scenario in scenarios {
                let browser = FixtureBrowser::new(Arc::clone(&self.site));
                let report = self.runner.run(scenario, Box::new(browser));
                output::write_report(out, &report)?;
                if report.passed() {
                    summary.passed += 1;
                } else {
                    summary.failed += 1;
                }
            }
        }

        info!(passed = summary.passed, failed = summary.failed, "run finished");
        if let Some(capture) = self.runner.executor().capture() {
            let failures = capture.file_write_failures();
            if failures > 0 {
                warn!(failures, "capture file writes failed");
            }
        }
        output::write_summary(out, &summary)?;
        Ok(summary)
    }
}
