// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Browser session capability consumed by the step catalog.
//!
//! Steps only talk to the page through [`BrowserSession`]. Elements are
//! addressed by opaque [`ElementHandle`]s issued by `find_all`; a handle is
//! only valid until the next navigation.

mod fixture;

pub use fixture::{
    ActionJournal, BrowserAction, DelayedText, ElementFixture, ElementKind, FixtureBrowser,
    FixtureError, PageFixture, SiteFixture,
};

use std::fmt;
use thiserror::Error;

/// Errors reported by a browser driver
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrowserError {
    #[error("No page is available at \"{url}\"")]
    PageNotFound { url: String },

    #[error("No page has been opened yet")]
    NoPage,

    #[error("Element handle {0} is stale; the page changed since it was located")]
    StaleElement(usize),

    #[error("Element {element} cannot be interacted with: {reason}")]
    NotInteractable { element: String, reason: String },

    #[error("The browser session has been stopped")]
    Stopped,

    #[error("Driver error: {0}")]
    Driver(String),
}

/// Named selector families, resolved by the driver the way form helpers do
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedKind {
    /// Link by id, text, or title
    Link,
    /// Button by id, name, value, or text
    Button,
    /// Form field by id, name, label, or placeholder
    Field,
}

impl NamedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Button => "button",
            Self::Field => "field",
        }
    }
}

/// Element locator
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locator {
    /// CSS selector
    Css(String),
    /// Named-selector literal
    Named { kind: NamedKind, locator: String },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn link(locator: impl Into<String>) -> Self {
        Self::Named {
            kind: NamedKind::Link,
            locator: locator.into(),
        }
    }

    pub fn button(locator: impl Into<String>) -> Self {
        Self::Named {
            kind: NamedKind::Button,
            locator: locator.into(),
        }
    }

    pub fn field(locator: impl Into<String>) -> Self {
        Self::Named {
            kind: NamedKind::Field,
            locator: locator.into(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "css \"{}\"", selector),
            Self::Named { kind, locator } => write!(f, "{} \"{}\"", kind.as_str(), locator),
        }
    }
}

/// Opaque reference to a located element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    generation: u64,
    index: usize,
}

impl ElementHandle {
    /// Drivers mint handles; `generation` identifies the page load.
    pub fn new(generation: u64, index: usize) -> Self {
        Self { generation, index }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Page and DOM operations a step may perform
pub trait BrowserSession {
    /// Navigate to a URL
    fn visit(&mut self, url: &str) -> Result<(), BrowserError>;

    /// All elements matching a locator, in document order
    fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError>;

    /// First element matching a locator
    fn find(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError> {
        Ok(self.find_all(locator)?.into_iter().next())
    }

    fn click(&mut self, element: ElementHandle) -> Result<(), BrowserError>;

    fn mouse_over(&mut self, element: ElementHandle) -> Result<(), BrowserError>;

    /// Set the value of a form field
    fn set_value(&mut self, element: ElementHandle, value: &str) -> Result<(), BrowserError>;

    /// Visible text of an element
    fn text(&self, element: ElementHandle) -> Result<String, BrowserError>;

    /// Current value of a form field
    fn value(&self, element: ElementHandle) -> Result<String, BrowserError>;

    fn has_attribute(&self, element: ElementHandle, name: &str) -> Result<bool, BrowserError>;

    fn is_visible(&self, element: ElementHandle) -> Result<bool, BrowserError>;

    /// Full text of the current page. Takes `&mut self`: live pages change
    /// between reads.
    fn page_text(&mut self) -> Result<String, BrowserError>;

    /// URL of the current page, if any
    fn current_url(&self) -> Option<String>;

    /// End the session
    fn stop(&mut self) -> Result<(), BrowserError>;
}
