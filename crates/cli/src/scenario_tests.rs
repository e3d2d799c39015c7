// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::browser::{ActionJournal, BrowserAction, FixtureBrowser};
use crate::test_support::{executor, shop};
use rstest::rstest;

fn runner() -> ScenarioRunner {
    ScenarioRunner::new(
        executor(),
        Arc::new(RunConfig::default()),
        ClockHandle::fake_at_epoch(),
    )
}

fn scenario(steps: &[&str]) -> Scenario {
    Scenario {
        name: "orders".to_string(),
        line: 1,
        tags: Vec::new(),
        steps: steps.iter().map(|s| Step::given(*s)).collect(),
    }
}

fn browser() -> (Box<dyn BrowserSession>, ActionJournal) {
    let journal = ActionJournal::new();
    let browser = FixtureBrowser::with_journal(shop(), journal.clone());
    (Box::new(browser), journal)
}

#[test]
fn test_passing_scenario_stops_once() {
    let (browser, journal) = browser();
    let report = runner().run(
        &scenario(&[r#"I am on "/account""#, r#"I should see "Welcome back""#]),
        browser,
    );

    assert!(report.passed());
    assert_eq!(report.steps_run, 2);
    assert_eq!(report.steps_total, 2);
    assert!(report.failure.is_none());
    assert!(report.stop_error.is_none());
    assert_eq!(journal.stops(), 1);
    assert_eq!(journal.actions().last(), Some(&BrowserAction::Stop));
}

#[rstest]
#[case::unresolved(&[r#"I am on "/account""#, "I dance", r#"I press "export""#], 2, "unresolved_step")]
#[case::assertion(&[r#"I am on "/account""#, r#"I should see "Nope""#, r#"I press "export""#], 2, "assertion_failed")]
#[case::not_found(&[r#"I am on "/account""#, r#"I follow the 5th "Edit" link"#], 2, "element_not_found")]
#[case::browser(&[r#"I am on "/missing""#, r#"I press "export""#], 1, "browser")]
#[case::parameter(&[r#"I should see the "ghost" parameter"#], 1, "unknown_parameter")]
fn test_failure_aborts_and_still_stops_once(
    #[case] steps: &[&str],
    #[case] failing_index: usize,
    #[case] kind: &str,
) {
    let (browser, journal) = browser();
    let report = runner().run(&scenario(steps), browser);

    assert_eq!(report.status, ScenarioStatus::Failed);
    assert_eq!(report.steps_run, failing_index);
    let failure = report.failure.unwrap();
    assert_eq!(failure.index, failing_index);
    assert_eq!(failure.step.text, steps[failing_index - 1]);
    assert_eq!(failure.error.kind_name(), kind);

    // Nothing after the failing step touched the page.
    assert_eq!(
        journal.count(|a| matches!(a, BrowserAction::Click { .. })),
        0
    );
    assert_eq!(journal.stops(), 1);
}

#[test]
fn test_each_scenario_gets_fresh_parameters() {
    let runner = runner();
    let (first, _) = browser();
    let report = runner.run(
        &scenario(&[
            r#"I am on "/account""#,
            r#"I save the value of "order_id" in the "order" parameter"#,
            r#"I should see the "order" parameter"#,
        ]),
        first,
    );
    // The saved value is not on the page text, so the last step fails.
    assert_eq!(report.failure.unwrap().error.kind_name(), "assertion_failed");

    let (second, _) = browser();
    let report = runner.run(&scenario(&[r#"I should see the "order" parameter"#]), second);
    assert_eq!(report.failure.unwrap().error.kind_name(), "unknown_parameter");
}

#[test]
fn test_empty_scenario_passes() {
    let (browser, journal) = browser();
    let report = runner().run(&scenario(&[]), browser);
    assert!(report.passed());
    assert_eq!(report.steps_run, 0);
    assert_eq!(journal.stops(), 1);
}
