// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assertion steps. All are single shot except the two waits.

use crate::browser::Locator;
use crate::context::ScenarioContext;
use crate::error::StepError;
use crate::locate::find_one;
use crate::retry::{wait_until_contains, RetryBudget};
use crate::step::{quote, Step, StepResult};

/// Longest page excerpt quoted in a failure message
const EXCERPT_CHARS: usize = 200;

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(EXCERPT_CHARS).collect();
        format!("{}...", head)
    }
}

pub(super) fn should_see(ctx: &mut ScenarioContext, text: &str) -> Result<StepResult, StepError> {
    let page = ctx.browser().page_text()?;
    if !page.contains(text) {
        return Err(StepError::assertion(
            "the page text",
            format!("to contain \"{}\"", text),
            format!("the page showed \"{}\"", excerpt(&page)),
        ));
    }
    Ok(StepResult::Done)
}

pub(super) fn should_not_see(ctx: &mut ScenarioContext, text: &str) -> Result<StepResult, StepError> {
    let page = ctx.browser().page_text()?;
    if page.contains(text) {
        return Err(StepError::assertion(
            "the page text",
            format!("not to contain \"{}\"", text),
            "it was present".to_string(),
        ));
    }
    Ok(StepResult::Done)
}

pub(super) fn wait_seconds_until_see(
    ctx: &mut ScenarioContext,
    seconds: &str,
    text: &str,
) -> Result<StepResult, StepError> {
    let timeout = seconds
        .trim()
        .parse::<u64>()
        .map_err(|_| StepError::invalid(format!("'{}' is not a number of seconds", seconds)))?;
    wait(ctx, text, RetryBudget::seconds(timeout))
}

pub(super) fn wait_until_see(ctx: &mut ScenarioContext, text: &str) -> Result<StepResult, StepError> {
    let budget = RetryBudget::seconds(ctx.config().wait_timeout_secs);
    wait(ctx, text, budget)
}

fn wait(ctx: &mut ScenarioContext, text: &str, budget: RetryBudget) -> Result<StepResult, StepError> {
    let (browser, clock) = ctx.browser_and_clock();
    wait_until_contains(browser, clock, text, budget)?;
    Ok(StepResult::Done)
}

pub(super) fn should_see_count(
    ctx: &mut ScenarioContext,
    count: &str,
    selector: &str,
) -> Result<StepResult, StepError> {
    let expected = count
        .parse::<usize>()
        .map_err(|_| StepError::invalid(format!("'{}' is not a valid element count", count)))?;
    let locator = Locator::css(selector);
    let found = ctx.browser().find_all(&locator)?.len();
    if found != expected {
        return Err(StepError::assertion(
            locator.to_string(),
            format!("{} matching element(s)", expected),
            format!("{} were found", found),
        ));
    }
    Ok(StepResult::Done)
}

pub(super) fn should_be_disabled(ctx: &mut ScenarioContext, selector: &str) -> Result<StepResult, StepError> {
    expect_disabled(ctx, selector, true)
}

pub(super) fn should_be_enabled(ctx: &mut ScenarioContext, selector: &str) -> Result<StepResult, StepError> {
    expect_disabled(ctx, selector, false)
}

/// Enabled and disabled are decided by the `disabled` attribute alone
fn expect_disabled(
    ctx: &mut ScenarioContext,
    selector: &str,
    disabled: bool,
) -> Result<StepResult, StepError> {
    let locator = Locator::css(selector);
    let browser = ctx.browser();
    let element = find_one(browser, &locator)?;
    let actual = browser.has_attribute(element, "disabled")?;
    if actual != disabled {
        let state = |d: bool| if d { "disabled" } else { "enabled" };
        return Err(StepError::assertion(
            locator.to_string(),
            format!("the element to be {}", state(disabled)),
            format!("it is {}", state(actual)),
        ));
    }
    Ok(StepResult::Done)
}

/// Re-issue the stored value as a plain text check
pub(super) fn should_see_parameter(
    ctx: &mut ScenarioContext,
    name: &str,
) -> Result<StepResult, StepError> {
    let value = ctx.params().get(name)?;
    Ok(StepResult::Next(Step::then(format!(
        "I should see {}",
        quote(value)
    ))))
}

/// Option membership is checked against the select box's text
pub(super) fn select_contains(
    ctx: &mut ScenarioContext,
    select: &str,
    option: &str,
    present: bool,
) -> Result<StepResult, StepError> {
    let locator = Locator::field(select);
    let browser = ctx.browser();
    let element = find_one(browser, &locator)?;
    let options = browser.text(element)?;
    if options.contains(option) != present {
        let verb = if present { "to contain" } else { "not to contain" };
        return Err(StepError::assertion(
            locator.to_string(),
            format!("{} option \"{}\"", verb, option),
            format!("its options were \"{}\"", excerpt(&options)),
        ));
    }
    Ok(StepResult::Done)
}

pub(super) fn should_be_visible(
    ctx: &mut ScenarioContext,
    selector: &str,
    visible: bool,
) -> Result<StepResult, StepError> {
    let locator = Locator::css(selector);
    let browser = ctx.browser();
    let element = find_one(browser, &locator)?;
    let actual = browser.is_visible(element)?;
    if actual != visible {
        let state = |v: bool| if v { "visible" } else { "hidden" };
        return Err(StepError::assertion(
            locator.to_string(),
            format!("the element to be {}", state(visible)),
            format!("it is {}", state(actual)),
        ));
    }
    Ok(StepResult::Done)
}
