// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Steps that act on the page or expand into other steps.

use super::date;
use crate::browser::Locator;
use crate::context::ScenarioContext;
use crate::error::StepError;
use crate::locate::{find_one, resolve_nth, Ordinal};
use crate::step::{quote, Step, StepResult, StepTable};
use crate::time::Clock;

pub(super) fn visit(ctx: &mut ScenarioContext, url: &str) -> Result<StepResult, StepError> {
    let url = ctx.config().resolve_url(url);
    ctx.browser().visit(&url)?;
    Ok(StepResult::Done)
}

pub(super) fn fill(ctx: &mut ScenarioContext, field: &str, value: &str) -> Result<StepResult, StepError> {
    let browser = ctx.browser();
    let element = find_one(browser, &Locator::field(field))?;
    browser.set_value(element, value)?;
    Ok(StepResult::Done)
}

pub(super) fn press(ctx: &mut ScenarioContext, button: &str) -> Result<StepResult, StepError> {
    let browser = ctx.browser();
    let element = find_one(browser, &Locator::button(button))?;
    browser.click(element)?;
    Ok(StepResult::Done)
}

pub(super) fn follow(ctx: &mut ScenarioContext, link: &str) -> Result<StepResult, StepError> {
    let browser = ctx.browser();
    let element = find_one(browser, &Locator::link(link))?;
    browser.click(element)?;
    Ok(StepResult::Done)
}

/// Login macro: open the page, fill both credentials, submit
pub(super) fn connected_as(
    ctx: &mut ScenarioContext,
    login: &str,
    url: &str,
) -> Result<StepResult, StepError> {
    let form = &ctx.config().login;
    let password = format!("{}{}", login, form.password_suffix);
    Ok(StepResult::Sequence(vec![
        Step::given(format!("I am on {}", quote(url))),
        Step::when(format!(
            "I fill in {} with {}",
            quote(&form.username_field),
            quote(login)
        )),
        Step::when(format!(
            "I fill in {} with {}",
            quote(&form.password_field),
            quote(&password)
        )),
        Step::when(format!("I press {}", quote(&form.submit_button))),
    ]))
}

/// Concatenate the `parameters` column, substituting stored values
pub(super) fn visit_composed_url(
    ctx: &mut ScenarioContext,
    table: Option<&StepTable>,
) -> Result<StepResult, StepError> {
    let tokens = table
        .and_then(|t| t.column("parameters"))
        .ok_or_else(|| StepError::invalid("expected a table with a \"parameters\" column"))?;
    let url = ctx.params().compose(tokens);
    Ok(StepResult::Next(Step::given(format!("I am on {}", quote(&url)))))
}

pub(super) fn click_nth(
    ctx: &mut ScenarioContext,
    ordinal: &str,
    selector: &str,
) -> Result<StepResult, StepError> {
    let ordinal = Ordinal::parse(ordinal)?;
    let browser = ctx.browser();
    let element = resolve_nth(browser, &Locator::css(selector), ordinal)?;
    browser.click(element)?;
    Ok(StepResult::Done)
}

pub(super) fn follow_nth(
    ctx: &mut ScenarioContext,
    ordinal: &str,
    link: &str,
) -> Result<StepResult, StepError> {
    let ordinal = Ordinal::parse(ordinal)?;
    let browser = ctx.browser();
    let element = resolve_nth(browser, &Locator::link(link), ordinal)?;
    browser.click(element)?;
    Ok(StepResult::Done)
}

/// Fill a field with the rendered current date
pub(super) fn fill_current_date(
    ctx: &mut ScenarioContext,
    field: &str,
    modifier: Option<&str>,
) -> Result<StepResult, StepError> {
    let config = ctx.config();
    let rendered = date::render(
        ctx.clock().now_utc(),
        config.utc_offset(),
        &config.date_format,
        modifier,
    )?;
    Ok(StepResult::Next(Step::when(format!(
        "I fill in {} with {}",
        quote(field),
        quote(&rendered)
    ))))
}

pub(super) fn hover(ctx: &mut ScenarioContext, selector: &str) -> Result<StepResult, StepError> {
    let browser = ctx.browser();
    let element = find_one(browser, &Locator::css(selector))?;
    browser.mouse_over(element)?;
    Ok(StepResult::Done)
}

/// Capture a field's live value into the parameter store
pub(super) fn save_value(
    ctx: &mut ScenarioContext,
    field: &str,
    name: &str,
) -> Result<StepResult, StepError> {
    let browser = ctx.browser();
    let element = find_one(browser, &Locator::field(field))?;
    let value = browser.value(element)?;
    ctx.params_mut().set(name, value);
    Ok(StepResult::Done)
}
