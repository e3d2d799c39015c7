// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded polling for assertions against an eventually-consistent page.
//!
//! A budget of `N` seconds allows `max(N, 1)` attempts, one second apart.
//! The clock only sleeps between attempts, so a zero budget evaluates once
//! and returns without sleeping.

use crate::browser::BrowserSession;
use crate::error::StepError;
use crate::time::Clock;
use std::time::Duration;
use tracing::trace;

/// Fixed delay between attempts
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Total polling budget in whole seconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryBudget {
    timeout_secs: u64,
}

impl RetryBudget {
    pub fn seconds(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    /// Attempts allowed by this budget; never less than one
    pub fn max_attempts(&self) -> u64 {
        self.timeout_secs.max(1)
    }

    pub fn interval(&self) -> Duration {
        POLL_INTERVAL
    }
}

/// Where a retry assertion stands after its latest observation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollState {
    /// Not yet satisfied; another attempt is allowed
    Polling { attempts: u64 },
    /// The condition held on attempt `attempts`
    Satisfied { attempts: u64 },
    /// Budget exhausted; `last_observed` is from the final attempt
    TimedOut { attempts: u64, last_observed: String },
}

impl PollState {
    pub fn attempts(&self) -> u64 {
        match self {
            Self::Polling { attempts }
            | Self::Satisfied { attempts }
            | Self::TimedOut { attempts, .. } => *attempts,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Polling { .. })
    }
}

/// Polling state machine for one assertion
#[derive(Debug)]
pub struct RetryAssertion {
    budget: RetryBudget,
    state: PollState,
}

impl RetryAssertion {
    pub fn new(budget: RetryBudget) -> Self {
        Self {
            budget,
            state: PollState::Polling { attempts: 0 },
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Record one attempt and move to the next state.
    ///
    /// Terminal states absorb further observations.
    pub fn observe(&mut self, observed: String, satisfied: bool) -> &PollState {
        if let PollState::Polling { attempts } = self.state {
            let attempts = attempts + 1;
            trace!(attempts, satisfied, "poll attempt");
            self.state = if satisfied {
                PollState::Satisfied { attempts }
            } else if attempts >= self.budget.max_attempts() {
                PollState::TimedOut {
                    attempts,
                    last_observed: observed,
                }
            } else {
                PollState::Polling { attempts }
            };
        }
        &self.state
    }

    /// Poll `read` until `accept` holds or the budget runs out.
    ///
    /// Errors from `read` end polling immediately; only an unsatisfied
    /// observation is retried.
    pub fn run<C, R, A, E>(mut self, clock: &C, mut read: R, accept: A) -> Result<PollState, E>
    where
        C: Clock + ?Sized,
        R: FnMut() -> Result<String, E>,
        A: Fn(&str) -> bool,
    {
        loop {
            let observed = read()?;
            let satisfied = accept(&observed);
            if self.observe(observed, satisfied).is_terminal() {
                return Ok(self.state);
            }
            clock.sleep(self.budget.interval());
        }
    }
}

/// Wait until the page text contains `expected`; returns the attempt count
pub fn wait_until_contains(
    browser: &mut dyn BrowserSession,
    clock: &dyn Clock,
    expected: &str,
    budget: RetryBudget,
) -> Result<u64, StepError> {
    let state = RetryAssertion::new(budget).run(
        clock,
        || browser.page_text().map_err(StepError::from),
        |text| text.contains(expected),
    )?;

    match state {
        PollState::TimedOut {
            attempts,
            last_observed,
        } => Err(StepError::AssertionTimeout {
            expected: expected.to_string(),
            attempts,
            last_observed,
        }),
        other => Ok(other.attempts()),
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
