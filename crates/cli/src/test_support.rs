// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::browser::{ActionJournal, FixtureBrowser, SiteFixture};
use crate::config::RunConfig;
use crate::context::ScenarioContext;
use crate::executor::StepExecutor;
use crate::steps::default_registry;
use crate::time::ClockHandle;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

pub const SHOP: &str = r##"
name = "shop"
base_url = "https://shop.test"

[[pages]]
url = "/login"
text = "Please sign in"

[[pages.elements]]
kind = "field"
names = ["signin_username"]

[[pages.elements]]
kind = "field"
names = ["signin_password"]

[[pages.elements]]
kind = "button"
names = ["connexion"]
text = "Sign in"
navigates_to = "/account"

[[pages]]
url = "/account"
text = "Welcome back"

[[pages.delayed_text]]
text = "Export ready"
appears_on_read = 3

[[pages.elements]]
selectors = ["li", "li.order"]
text = "Order 1"

[[pages.elements]]
selectors = ["li", "li.order"]
text = "Order 2"

[[pages.elements]]
selectors = ["li", "li.order"]
text = "Order 3"

[[pages.elements]]
kind = "link"
selectors = ["a"]
text = "Edit"
navigates_to = "/orders/1"

[[pages.elements]]
kind = "link"
selectors = ["a"]
text = "Edit"
navigates_to = "/orders/2"

[[pages.elements]]
kind = "field"
names = ["order_id"]
value = "A-42"

[[pages.elements]]
kind = "field"
names = ["due"]

[[pages.elements]]
kind = "field"
names = ["country"]
text = "France Germany Spain"

[[pages.elements]]
kind = "button"
selectors = ["#save"]
names = ["save"]
text = "Save"
attributes = ["disabled"]

[[pages.elements]]
kind = "button"
selectors = ["#export"]
names = ["export"]
text = "Export"

[[pages.elements]]
selectors = ["#flash"]
text = "Saved!"
visible = false

[[pages.elements]]
selectors = ["nav"]
reveals = ["#flash"]

[[pages]]
url = "/orders/1"
text = "Order 1 details"

[[pages]]
url = "/orders/2"
text = "Order 2 details"

[[pages]]
url = "/orders/A-42"
text = "Order A-42 details"
"##;

pub fn shop() -> Arc<SiteFixture> {
    Arc::new(SiteFixture::from_toml_str(SHOP).unwrap())
}

/// Context on the shop fixture with a fake clock at 2026-03-07 09:05 UTC
pub fn context_with(config: RunConfig) -> (ScenarioContext, ActionJournal) {
    let journal = ActionJournal::new();
    let browser = FixtureBrowser::with_journal(shop(), journal.clone());
    let clock = ClockHandle::Fake(crate::time::FakeClock::at(
        Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 0).unwrap(),
    ));
    let ctx = ScenarioContext::new("test scenario", Box::new(browser), clock, Arc::new(config));
    (ctx, journal)
}

pub fn context() -> (ScenarioContext, ActionJournal) {
    context_with(RunConfig {
        utc_offset_minutes: Some(0),
        ..RunConfig::default()
    })
}

pub fn executor() -> StepExecutor {
    StepExecutor::new(Arc::new(default_registry().unwrap()))
}
