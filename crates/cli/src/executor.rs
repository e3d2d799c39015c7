// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Step execution with composite expansion.
//!
//! A sentence resolves to a handler; the handler either finishes the step or
//! returns further steps. Those are checked against the registry up front
//! and then executed in order, recursively, stopping at the first failure.

use crate::context::ScenarioContext;
use crate::error::StepError;
use crate::registry::{PatternRegistry, StepInvocation};
use crate::step::Step;
use crate::steps;
use browsersteps_capture::{CaptureLog, CapturedOutcome, CapturedStep};
use std::sync::Arc;
use tracing::debug;

pub use crate::config::DEFAULT_MAX_EXPANSION_DEPTH;

/// Stateless across scenarios; per-scenario state lives in the context
#[derive(Clone, Debug)]
pub struct StepExecutor {
    registry: Arc<PatternRegistry>,
    max_depth: usize,
    capture: Option<CaptureLog>,
}

impl StepExecutor {
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_EXPANSION_DEPTH,
            capture: None,
        }
    }

    /// Limit how deeply composite steps may nest
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Record every executed step into `capture`
    pub fn with_capture(mut self, capture: CaptureLog) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn capture(&self) -> Option<&CaptureLog> {
        self.capture.as_ref()
    }

    /// Execute one top-level step
    pub fn execute(&self, step: &Step, ctx: &mut ScenarioContext) -> Result<(), StepError> {
        self.execute_at(step, ctx, 0)
    }

    fn execute_at(
        &self,
        step: &Step,
        ctx: &mut ScenarioContext,
        depth: usize,
    ) -> Result<(), StepError> {
        let invocation = match self.registry.resolve(&step.text) {
            Ok(invocation) => invocation,
            Err(unresolved) => {
                let error = StepError::from(unresolved);
                self.record(ctx, step, depth, failed(None, &error));
                return Err(error);
            }
        };

        let kind = invocation.kind.as_str().to_string();
        let result = self.dispatch(step, &invocation, ctx, depth);
        let outcome = match &result {
            Ok(0) => CapturedOutcome::Passed { kind },
            Ok(children) => CapturedOutcome::Expanded {
                kind,
                children: *children,
            },
            Err(error) => failed(Some(kind), error),
        };
        self.record(ctx, step, depth, outcome);
        result.map(|_| ())
    }

    /// Run the handler, then any steps it returned; yields the child count
    fn dispatch(
        &self,
        step: &Step,
        invocation: &StepInvocation,
        ctx: &mut ScenarioContext,
        depth: usize,
    ) -> Result<usize, StepError> {
        debug!(depth, kind = invocation.kind.as_str(), step = %step, "executing step");
        let children =
            steps::invoke(invocation.kind, &invocation.args, step.table.as_ref(), ctx)?
                .into_steps();
        if children.is_empty() {
            return Ok(0);
        }

        if depth >= self.max_depth {
            return Err(StepError::ExpansionTooDeep {
                sentence: step.text.clone(),
                limit: self.max_depth,
            });
        }
        // Reject the whole expansion before any child has side effects.
        if let Some(child) = children
            .iter()
            .find(|child| !self.registry.is_resolvable(&child.text))
        {
            return Err(StepError::Composition {
                parent: step.text.clone(),
                child: child.text.clone(),
            });
        }

        for child in &children {
            self.execute_at(child, ctx, depth + 1)?;
        }
        Ok(children.len())
    }

    fn record(&self, ctx: &ScenarioContext, step: &Step, depth: usize, outcome: CapturedOutcome) {
        if let Some(capture) = &self.capture {
            capture.record(
                CapturedStep::new(ctx.name(), depth, step.keyword.as_str(), &step.text),
                outcome,
            );
        }
    }
}

fn failed(kind: Option<String>, error: &StepError) -> CapturedOutcome {
    CapturedOutcome::Failed {
        kind,
        error: error.kind_name().to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
