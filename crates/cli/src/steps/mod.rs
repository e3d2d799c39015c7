// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in step catalog.
//!
//! Every sentence template maps to one [`StepKind`]; [`invoke`] dispatches a
//! kind to its handler. Handlers either act on the browser and return
//! [`StepResult::Done`], or return further steps for the executor to run.

mod actions;
mod checks;
pub mod date;

use crate::context::ScenarioContext;
use crate::error::StepError;
use crate::registry::{PatternRegistry, RegistryError};
use crate::step::{unquote, StepResult, StepTable};

/// Quoted argument: any run of non-quote characters or backslash escapes.
macro_rules! quoted {
    () => {
        r#""((?:[^"\\]|\\.)*)""#
    };
}

/// Ordinal argument such as `2nd`; only the number is captured.
macro_rules! ordinal {
    () => {
        r"([0-9]+)(?:st|nd|rd|th)"
    };
}

/// Handler tag for every sentence template
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    Visit,
    Fill,
    Press,
    Follow,
    ShouldSee,
    ShouldNotSee,
    ConnectedAs,
    VisitComposedUrl,
    ClickNth,
    FollowNth,
    FillCurrentDate,
    FillDateWithModifier,
    Hover,
    SaveValue,
    WaitSecondsUntilSee,
    WaitUntilSee,
    ShouldSeeCount,
    ShouldBeDisabled,
    ShouldBeEnabled,
    ShouldSeeParameter,
    SelectContains,
    SelectNotContains,
    ShouldBeVisible,
    ShouldNotBeVisible,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visit => "visit",
            Self::Fill => "fill",
            Self::Press => "press",
            Self::Follow => "follow",
            Self::ShouldSee => "should_see",
            Self::ShouldNotSee => "should_not_see",
            Self::ConnectedAs => "connected_as",
            Self::VisitComposedUrl => "visit_composed_url",
            Self::ClickNth => "click_nth",
            Self::FollowNth => "follow_nth",
            Self::FillCurrentDate => "fill_current_date",
            Self::FillDateWithModifier => "fill_date_with_modifier",
            Self::Hover => "hover",
            Self::SaveValue => "save_value",
            Self::WaitSecondsUntilSee => "wait_seconds_until_see",
            Self::WaitUntilSee => "wait_until_see",
            Self::ShouldSeeCount => "should_see_count",
            Self::ShouldBeDisabled => "should_be_disabled",
            Self::ShouldBeEnabled => "should_be_enabled",
            Self::ShouldSeeParameter => "should_see_parameter",
            Self::SelectContains => "select_contains",
            Self::SelectNotContains => "select_not_contains",
            Self::ShouldBeVisible => "should_be_visible",
            Self::ShouldNotBeVisible => "should_not_be_visible",
        }
    }
}

/// `(kind, pattern, example)` for every built-in sentence
pub const CATALOG: &[(StepKind, &str, &str)] = &[
    (
        StepKind::Visit,
        concat!("^I am on ", quoted!(), "$"),
        r#"I am on "/login""#,
    ),
    (
        StepKind::Fill,
        concat!("^I fill in ", quoted!(), " with ", quoted!(), "$"),
        r#"I fill in "email" with "bob@example.com""#,
    ),
    (
        StepKind::Press,
        concat!("^I press ", quoted!(), "$"),
        r#"I press "Save""#,
    ),
    (
        StepKind::Follow,
        concat!("^I follow ", quoted!(), "$"),
        r#"I follow "Home""#,
    ),
    (
        StepKind::ShouldSee,
        concat!("^I should see ", quoted!(), "$"),
        r#"I should see "Welcome""#,
    ),
    (
        StepKind::ShouldNotSee,
        concat!("^I should not see ", quoted!(), "$"),
        r#"I should not see "Error""#,
    ),
    (
        StepKind::ConnectedAs,
        concat!("^I am connected with ", quoted!(), " on ", quoted!(), "$"),
        r#"I am connected with "bob" on "/login""#,
    ),
    (
        StepKind::VisitComposedUrl,
        "^I am on url composed by$",
        "I am on url composed by",
    ),
    (
        StepKind::ClickNth,
        concat!("^I click on the ", ordinal!(), " ", quoted!(), " element$"),
        r#"I click on the 2nd "button" element"#,
    ),
    (
        StepKind::FollowNth,
        concat!("^I follow the ", ordinal!(), " ", quoted!(), " link$"),
        r#"I follow the 3rd "Edit" link"#,
    ),
    (
        StepKind::FillCurrentDate,
        concat!("^I fill in ", quoted!(), " with the current date$"),
        r#"I fill in "start" with the current date"#,
    ),
    (
        StepKind::FillDateWithModifier,
        concat!(
            "^I fill in ",
            quoted!(),
            " with the current date and modifier ",
            quoted!(),
            "$"
        ),
        r#"I fill in "end" with the current date and modifier "+1 day""#,
    ),
    (
        StepKind::Hover,
        concat!("^I hover ", quoted!(), "$"),
        r##"I hover "#menu""##,
    ),
    (
        StepKind::SaveValue,
        concat!(
            "^I save the value of ",
            quoted!(),
            " in the ",
            quoted!(),
            " parameter$"
        ),
        r#"I save the value of "order_id" in the "order" parameter"#,
    ),
    (
        StepKind::WaitSecondsUntilSee,
        concat!("^I wait ", quoted!(), " seconds until I see ", quoted!(), "$"),
        r#"I wait "5" seconds until I see "Done""#,
    ),
    (
        StepKind::WaitUntilSee,
        concat!("^I wait until I see ", quoted!(), "$"),
        r#"I wait until I see "Done""#,
    ),
    (
        StepKind::ShouldSeeCount,
        concat!("^I should see ([0-9]+) ", quoted!(), " elements?$"),
        r#"I should see 3 "li.item" elements"#,
    ),
    (
        StepKind::ShouldBeDisabled,
        concat!("^the element ", quoted!(), " should be disabled$"),
        r##"the element "#submit" should be disabled"##,
    ),
    (
        StepKind::ShouldBeEnabled,
        concat!("^the element ", quoted!(), " should be enabled$"),
        r##"the element "#submit" should be enabled"##,
    ),
    (
        StepKind::ShouldSeeParameter,
        concat!("^I should see the ", quoted!(), " parameter$"),
        r#"I should see the "order" parameter"#,
    ),
    (
        StepKind::SelectContains,
        concat!("^the ", quoted!(), " select box should contain ", quoted!(), "$"),
        r#"the "country" select box should contain "France""#,
    ),
    (
        StepKind::SelectNotContains,
        concat!(
            "^the ",
            quoted!(),
            " select box should not contain ",
            quoted!(),
            "$"
        ),
        r#"the "country" select box should not contain "Atlantis""#,
    ),
    (
        StepKind::ShouldBeVisible,
        concat!("^the ", quoted!(), " element should be visible$"),
        r##"the "#flash" element should be visible"##,
    ),
    (
        StepKind::ShouldNotBeVisible,
        concat!("^the ", quoted!(), " element should not be visible$"),
        r##"the "#flash" element should not be visible"##,
    ),
];

/// Registry holding the whole built-in catalog
pub fn default_registry() -> Result<PatternRegistry, RegistryError> {
    let mut registry = PatternRegistry::new();
    for (kind, pattern, example) in CATALOG {
        registry.register(pattern, *kind, example)?;
    }
    Ok(registry)
}

/// Run the handler for `kind`
pub fn invoke(
    kind: StepKind,
    args: &[String],
    table: Option<&StepTable>,
    ctx: &mut ScenarioContext,
) -> Result<StepResult, StepError> {
    let a = Args(args);
    match kind {
        StepKind::Visit => actions::visit(ctx, &a.get(0)?),
        StepKind::Fill => actions::fill(ctx, &a.get(0)?, &a.get(1)?),
        StepKind::Press => actions::press(ctx, &a.get(0)?),
        StepKind::Follow => actions::follow(ctx, &a.get(0)?),
        StepKind::ShouldSee => checks::should_see(ctx, &a.get(0)?),
        StepKind::ShouldNotSee => checks::should_not_see(ctx, &a.get(0)?),
        StepKind::ConnectedAs => actions::connected_as(ctx, &a.get(0)?, &a.get(1)?),
        StepKind::VisitComposedUrl => actions::visit_composed_url(ctx, table),
        StepKind::ClickNth => actions::click_nth(ctx, &a.get(0)?, &a.get(1)?),
        StepKind::FollowNth => actions::follow_nth(ctx, &a.get(0)?, &a.get(1)?),
        StepKind::FillCurrentDate => actions::fill_current_date(ctx, &a.get(0)?, None),
        StepKind::FillDateWithModifier => {
            actions::fill_current_date(ctx, &a.get(0)?, Some(&a.get(1)?))
        }
        StepKind::Hover => actions::hover(ctx, &a.get(0)?),
        StepKind::SaveValue => actions::save_value(ctx, &a.get(0)?, &a.get(1)?),
        StepKind::WaitSecondsUntilSee => {
            checks::wait_seconds_until_see(ctx, &a.get(0)?, &a.get(1)?)
        }
        StepKind::WaitUntilSee => checks::wait_until_see(ctx, &a.get(0)?),
        StepKind::ShouldSeeCount => checks::should_see_count(ctx, &a.get(0)?, &a.get(1)?),
        StepKind::ShouldBeDisabled => checks::should_be_disabled(ctx, &a.get(0)?),
        StepKind::ShouldBeEnabled => checks::should_be_enabled(ctx, &a.get(0)?),
        StepKind::ShouldSeeParameter => checks::should_see_parameter(ctx, &a.get(0)?),
        StepKind::SelectContains => checks::select_contains(ctx, &a.get(0)?, &a.get(1)?, true),
        StepKind::SelectNotContains => {
            checks::select_contains(ctx, &a.get(0)?, &a.get(1)?, false)
        }
        StepKind::ShouldBeVisible => checks::should_be_visible(ctx, &a.get(0)?, true),
        StepKind::ShouldNotBeVisible => checks::should_be_visible(ctx, &a.get(0)?, false),
    }
}

/// Positional captures, unescaped on access
struct Args<'a>(&'a [String]);

impl Args<'_> {
    fn get(&self, index: usize) -> Result<String, StepError> {
        self.0
            .get(index)
            .map(|raw| unquote(raw))
            .ok_or_else(|| StepError::invalid(format!("missing argument {}", index + 1)))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
