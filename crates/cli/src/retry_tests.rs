// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::browser::{BrowserError, FixtureBrowser, SiteFixture};
use crate::time::FakeClock;
use std::sync::Arc;

/// Page whose "Ready" text shows up on read `appears_on`
fn browser(appears_on: u32) -> FixtureBrowser {
    let site = SiteFixture::from_toml_str(&format!(
        r#"
        [[pages]]
        url = "/"
        text = "Loading"
        [[pages.delayed_text]]
        text = "Ready"
        appears_on_read = {}
        "#,
        appears_on
    ))
    .unwrap();
    let mut browser = FixtureBrowser::new(Arc::new(site));
    browser.visit("/").unwrap();
    browser
}

#[test]
fn test_budget_attempts() {
    assert_eq!(RetryBudget::seconds(0).max_attempts(), 1);
    assert_eq!(RetryBudget::seconds(1).max_attempts(), 1);
    assert_eq!(RetryBudget::seconds(5).max_attempts(), 5);
    assert_eq!(RetryBudget::seconds(5).interval(), Duration::from_secs(1));
}

#[yare::parameterized(
    first_poll = { 1, 1 },
    exact_budget = { 3, 3 },
    spare_budget = { 3, 10 },
    zero_budget_first_poll = { 1, 0 },
)]
fn test_text_on_poll_n_succeeds_when_budget_covers_it(appears_on: u32, timeout: u64) {
    let mut browser = browser(appears_on);
    let clock = FakeClock::at_epoch();

    let attempts =
        wait_until_contains(&mut browser, &clock, "Ready", RetryBudget::seconds(timeout)).unwrap();

    assert_eq!(attempts, u64::from(appears_on));
    assert_eq!(clock.sleep_count(), u64::from(appears_on) - 1);
    assert_eq!(browser.journal().page_reads(), appears_on as usize);
}

#[yare::parameterized(
    one_short = { 4, 3 },
    far_short = { 10, 2 },
    zero_budget = { 2, 0 },
)]
fn test_text_after_budget_times_out(appears_on: u32, timeout: u64) {
    let mut browser = browser(appears_on);
    let clock = FakeClock::at_epoch();

    let err = wait_until_contains(&mut browser, &clock, "Ready", RetryBudget::seconds(timeout))
        .unwrap_err();

    let budget = timeout.max(1);
    match err {
        StepError::AssertionTimeout {
            expected,
            attempts,
            last_observed,
        } => {
            assert_eq!(expected, "Ready");
            assert_eq!(attempts, budget);
            assert_eq!(last_observed, "Loading");
        }
        other => panic!("expected AssertionTimeout, got {:?}", other),
    }
    assert_eq!(clock.sleep_count(), budget - 1);
}

#[test]
fn test_zero_timeout_evaluates_once_without_sleeping() {
    let mut browser = browser(1);
    let clock = FakeClock::at_epoch();

    wait_until_contains(&mut browser, &clock, "Ready", RetryBudget::seconds(0)).unwrap();

    assert_eq!(browser.journal().page_reads(), 1);
    assert_eq!(clock.sleep_count(), 0);
    assert_eq!(clock.now_millis(), 0);
}

#[test]
fn test_sleeps_advance_virtual_time_by_interval() {
    let mut browser = browser(3);
    let clock = FakeClock::at_epoch();

    wait_until_contains(&mut browser, &clock, "Ready", RetryBudget::seconds(5)).unwrap();

    assert_eq!(clock.now_millis(), 2_000);
}

#[test]
fn test_browser_error_is_not_retried() {
    let mut browser = browser(3);
    browser.stop().unwrap();
    let clock = FakeClock::at_epoch();

    let err = wait_until_contains(&mut browser, &clock, "Ready", RetryBudget::seconds(5))
        .unwrap_err();

    assert!(matches!(err, StepError::Browser(BrowserError::Stopped)));
    assert_eq!(clock.sleep_count(), 0);
}

#[test]
fn test_state_machine_transitions() {
    let mut assertion = RetryAssertion::new(RetryBudget::seconds(2));
    assert_eq!(assertion.state(), &PollState::Polling { attempts: 0 });

    assert_eq!(
        assertion.observe("a".to_string(), false),
        &PollState::Polling { attempts: 1 }
    );
    assert_eq!(
        assertion.observe("b".to_string(), false),
        &PollState::TimedOut {
            attempts: 2,
            last_observed: "b".to_string()
        }
    );
    // Terminal states absorb later observations.
    assert!(assertion.observe("c".to_string(), true).is_terminal());
    assert_eq!(assertion.state().attempts(), 2);
}

#[test]
fn test_run_with_custom_predicate() {
    let clock = FakeClock::at_epoch();
    let mut reads = 0;
    let state = RetryAssertion::new(RetryBudget::seconds(5))
        .run(
            &clock,
            || {
                reads += 1;
                Ok::<_, StepError>(reads.to_string())
            },
            |text| text == "4",
        )
        .unwrap();
    assert_eq!(state, PollState::Satisfied { attempts: 4 });
    assert_eq!(clock.sleep_count(), 3);
}
