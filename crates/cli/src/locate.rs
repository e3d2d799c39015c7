// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Element lookup with 1-based ordinal selection.

use crate::browser::{BrowserSession, ElementHandle, Locator};
use crate::error::StepError;
use std::fmt;
use std::num::NonZeroUsize;

/// 1-based position among the elements matching a locator
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ordinal(NonZeroUsize);

impl Ordinal {
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Rejects 0; ordinals count from 1
    pub fn new(n: usize) -> Result<Self, StepError> {
        NonZeroUsize::new(n)
            .map(Self)
            .ok_or_else(|| StepError::invalid("ordinals start at 1, got 0"))
    }

    /// Parse the digits captured from `2nd`, `13th`, ...
    pub fn parse(digits: &str) -> Result<Self, StepError> {
        let n = digits
            .parse::<usize>()
            .map_err(|_| StepError::invalid(format!("'{}' is not a valid ordinal", digits)))?;
        Self::new(n)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }

    /// 0-based offset into `find_all` results
    pub fn offset(&self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.get();
        let suffix = match (n % 10, n % 100) {
            (_, 11..=13) => "th",
            (1, _) => "st",
            (2, _) => "nd",
            (3, _) => "rd",
            _ => "th",
        };
        write!(f, "{}{}", n, suffix)
    }
}

/// The `ordinal`-th element matching `locator`, in document order.
///
/// Never clamps: asking for more elements than exist reports both numbers.
pub fn resolve_nth(
    browser: &dyn BrowserSession,
    locator: &Locator,
    ordinal: Ordinal,
) -> Result<ElementHandle, StepError> {
    let matches = browser.find_all(locator)?;
    let found = matches.len();
    matches
        .into_iter()
        .nth(ordinal.offset())
        .ok_or_else(|| StepError::ElementNotFound {
            locator: locator.to_string(),
            requested: Some(ordinal.get()),
            found,
        })
}

/// First element matching `locator`
pub fn find_one(browser: &dyn BrowserSession, locator: &Locator) -> Result<ElementHandle, StepError> {
    browser
        .find(locator)?
        .ok_or_else(|| StepError::not_found(locator))
}

#[cfg(test)]
#[path = "locate_tests.rs"]
mod tests;
