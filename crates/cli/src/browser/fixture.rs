// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory browser driven by a TOML site description.
//!
//! A site is a list of pages; each page has static text, text that only
//! appears after a number of reads (to model late-loading content), and a
//! flat list of elements in document order. Every operation is appended to
//! an [`ActionJournal`] that tests can inspect after the session is gone.

use super::{BrowserError, BrowserSession, ElementHandle, Locator, NamedKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when loading a site fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read site fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse site fixture: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid site fixture: {0}")]
    Validation(String),
}

/// Top-level site description
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteFixture {
    /// Name for logging
    #[serde(default)]
    pub name: String,

    /// Origin prepended to page paths starting with `/`
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub pages: Vec<PageFixture>,
}

/// One page of the site
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PageFixture {
    pub url: String,

    /// Static body text
    #[serde(default)]
    pub text: String,

    /// Text that shows up only after the page text has been read a few times
    #[serde(default)]
    pub delayed_text: Vec<DelayedText>,

    /// Elements in document order
    #[serde(default)]
    pub elements: Vec<ElementFixture>,
}

/// Late-loading page text
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DelayedText {
    pub text: String,
    /// 1-based page-text read on which the text first appears
    pub appears_on_read: u32,
}

/// Element families understood by named selectors
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    #[default]
    Generic,
    Link,
    Button,
    Field,
}

fn default_visible() -> bool {
    true
}

/// One element on a page
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ElementFixture {
    /// CSS selectors this element answers to
    #[serde(default)]
    pub selectors: Vec<String>,

    #[serde(default)]
    pub kind: ElementKind,

    /// Ids, names, labels, or titles for named lookup
    #[serde(default)]
    pub names: Vec<String>,

    #[serde(default)]
    pub text: String,

    /// Initial value (fields) or button value
    #[serde(default)]
    pub value: String,

    /// Boolean attributes present on the element (e.g. `disabled`)
    #[serde(default)]
    pub attributes: Vec<String>,

    #[serde(default = "default_visible")]
    pub visible: bool,

    /// URL to load when the element is clicked
    #[serde(default)]
    pub navigates_to: Option<String>,

    /// CSS selectors made visible when the element is hovered
    #[serde(default)]
    pub reveals: Vec<String>,
}

impl Default for ElementFixture {
    fn default() -> Self {
        Self {
            selectors: Vec::new(),
            kind: ElementKind::Generic,
            names: Vec::new(),
            text: String::new(),
            value: String::new(),
            attributes: Vec::new(),
            visible: true,
            navigates_to: None,
            reveals: Vec::new(),
        }
    }
}

impl ElementFixture {
    fn matches(&self, locator: &Locator) -> bool {
        match locator {
            Locator::Css(selector) => self.selectors.iter().any(|s| s == selector.trim()),
            Locator::Named { kind, locator } => {
                let named = self.names.iter().any(|n| n == locator);
                match kind {
                    NamedKind::Link => self.kind == ElementKind::Link && (named || self.text == *locator),
                    NamedKind::Button => {
                        self.kind == ElementKind::Button
                            && (named || self.text == *locator || self.value == *locator)
                    }
                    NamedKind::Field => self.kind == ElementKind::Field && named,
                }
            }
        }
    }

    fn describe(&self, index: usize) -> String {
        self.names
            .first()
            .or_else(|| self.selectors.first())
            .cloned()
            .unwrap_or_else(|| format!("element #{}", index))
    }
}

impl SiteFixture {
    /// Load a site from a TOML file
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a site from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, FixtureError> {
        let site: SiteFixture = toml::from_str(content)?;
        site.validate()?;
        Ok(site)
    }

    fn validate(&self) -> Result<(), FixtureError> {
        let mut seen = HashSet::new();
        for page in &self.pages {
            if !seen.insert(self.absolute(&page.url)) {
                return Err(FixtureError::Validation(format!(
                    "duplicate page url '{}'",
                    page.url
                )));
            }
            for delayed in &page.delayed_text {
                if delayed.appears_on_read == 0 {
                    return Err(FixtureError::Validation(format!(
                        "delayed text '{}' on '{}': appears_on_read is 1-based",
                        delayed.text, page.url
                    )));
                }
            }
        }
        Ok(())
    }

    fn absolute(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if url.starts_with('/') => format!("{}{}", base.trim_end_matches('/'), url),
            _ => url.to_string(),
        }
    }

    fn page_index(&self, url: &str) -> Option<usize> {
        let wanted = self.absolute(url);
        self.pages
            .iter()
            .position(|page| self.absolute(&page.url) == wanted)
    }
}

/// One recorded browser operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserAction {
    Visit { url: String },
    Click { element: String },
    Hover { element: String },
    SetValue { element: String, value: String },
    ReadPageText,
    Stop,
}

/// Shared record of browser operations; clones share storage
#[derive(Clone, Debug, Default)]
pub struct ActionJournal {
    actions: Arc<Mutex<Vec<BrowserAction>>>,
}

impl ActionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, action: BrowserAction) {
        self.actions.lock().push(action);
    }

    /// All actions in order
    pub fn actions(&self) -> Vec<BrowserAction> {
        self.actions.lock().clone()
    }

    /// Actions other than page-text reads, in order
    pub fn interactions(&self) -> Vec<BrowserAction> {
        self.actions
            .lock()
            .iter()
            .filter(|a| **a != BrowserAction::ReadPageText)
            .cloned()
            .collect()
    }

    /// Count actions matching a predicate
    pub fn count<F: Fn(&BrowserAction) -> bool>(&self, pred: F) -> usize {
        self.actions.lock().iter().filter(|a| pred(a)).count()
    }

    /// How many times the session was stopped
    pub fn stops(&self) -> usize {
        self.count(|a| *a == BrowserAction::Stop)
    }

    /// How many times the page text was read
    pub fn page_reads(&self) -> usize {
        self.count(|a| *a == BrowserAction::ReadPageText)
    }
}

#[derive(Debug)]
struct ElementState {
    value: String,
    visible: bool,
}

#[derive(Debug)]
struct LoadedPage {
    page: usize,
    url: String,
    elements: Vec<ElementState>,
    reads: u32,
}

/// [`BrowserSession`] backed by a [`SiteFixture`]
#[derive(Debug)]
pub struct FixtureBrowser {
    site: Arc<SiteFixture>,
    current: Option<LoadedPage>,
    generation: u64,
    stopped: bool,
    journal: ActionJournal,
}

impl FixtureBrowser {
    pub fn new(site: Arc<SiteFixture>) -> Self {
        Self::with_journal(site, ActionJournal::new())
    }

    /// Create a browser that records into an existing journal
    pub fn with_journal(site: Arc<SiteFixture>, journal: ActionJournal) -> Self {
        Self {
            site,
            current: None,
            generation: 0,
            stopped: false,
            journal,
        }
    }

    /// Handle to this browser's action journal
    pub fn journal(&self) -> ActionJournal {
        self.journal.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn ensure_running(&self) -> Result<(), BrowserError> {
        if self.stopped {
            Err(BrowserError::Stopped)
        } else {
            Ok(())
        }
    }

    fn loaded(&self) -> Result<&LoadedPage, BrowserError> {
        self.ensure_running()?;
        self.current.as_ref().ok_or(BrowserError::NoPage)
    }

    fn page(&self, loaded: &LoadedPage) -> Result<&PageFixture, BrowserError> {
        self.site
            .pages
            .get(loaded.page)
            .ok_or_else(|| BrowserError::Driver(format!("page index {} vanished", loaded.page)))
    }

    /// Resolve a handle to its fixture and live state index
    fn element(&self, handle: ElementHandle) -> Result<(&ElementFixture, usize), BrowserError> {
        let loaded = self.loaded()?;
        if handle.generation() != self.generation {
            return Err(BrowserError::StaleElement(handle.index()));
        }
        let page = self.page(loaded)?;
        page.elements
            .get(handle.index())
            .map(|fixture| (fixture, handle.index()))
            .ok_or(BrowserError::StaleElement(handle.index()))
    }

    fn state(&self, index: usize) -> Result<&ElementState, BrowserError> {
        self.loaded()?
            .elements
            .get(index)
            .ok_or(BrowserError::StaleElement(index))
    }

    fn state_mut(&mut self, index: usize) -> Result<&mut ElementState, BrowserError> {
        self.ensure_running()?;
        self.current
            .as_mut()
            .ok_or(BrowserError::NoPage)?
            .elements
            .get_mut(index)
            .ok_or(BrowserError::StaleElement(index))
    }
}

impl BrowserSession for FixtureBrowser {
    fn visit(&mut self, url: &str) -> Result<(), BrowserError> {
        self.ensure_running()?;
        self.journal.push(BrowserAction::Visit {
            url: url.to_string(),
        });

        let index = self
            .site
            .page_index(url)
            .ok_or_else(|| BrowserError::PageNotFound {
                url: url.to_string(),
            })?;
        let page = &self.site.pages[index];
        let elements = page
            .elements
            .iter()
            .map(|e| ElementState {
                value: e.value.clone(),
                visible: e.visible,
            })
            .collect();

        self.generation += 1;
        self.current = Some(LoadedPage {
            page: index,
            url: self.site.absolute(&page.url),
            elements,
            reads: 0,
        });
        Ok(())
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError> {
        let loaded = self.loaded()?;
        let page = self.page(loaded)?;
        Ok(page
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.matches(locator))
            .map(|(i, _)| ElementHandle::new(self.generation, i))
            .collect())
    }

    fn click(&mut self, element: ElementHandle) -> Result<(), BrowserError> {
        let (fixture, index) = self.element(element)?;
        let description = fixture.describe(index);
        let target = fixture.navigates_to.clone();

        if !self.state(index)?.visible {
            return Err(BrowserError::NotInteractable {
                element: description,
                reason: "element is not visible".to_string(),
            });
        }

        self.journal.push(BrowserAction::Click {
            element: description,
        });
        match target {
            Some(url) => self.visit(&url),
            None => Ok(()),
        }
    }

    fn mouse_over(&mut self, element: ElementHandle) -> Result<(), BrowserError> {
        let (fixture, index) = self.element(element)?;
        let description = fixture.describe(index);
        let revealed: Vec<ElementHandle> = fixture
            .reveals
            .iter()
            .map(|selector| self.find_all(&Locator::css(selector.as_str())))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect();

        self.journal.push(BrowserAction::Hover {
            element: description,
        });
        for handle in revealed {
            self.state_mut(handle.index())?.visible = true;
        }
        Ok(())
    }

    fn set_value(&mut self, element: ElementHandle, value: &str) -> Result<(), BrowserError> {
        let (fixture, index) = self.element(element)?;
        let description = fixture.describe(index);
        if fixture.kind != ElementKind::Field {
            return Err(BrowserError::NotInteractable {
                element: description,
                reason: "element is not a form field".to_string(),
            });
        }
        if fixture.attributes.iter().any(|a| a == "disabled") {
            return Err(BrowserError::NotInteractable {
                element: description,
                reason: "field is disabled".to_string(),
            });
        }

        self.journal.push(BrowserAction::SetValue {
            element: description,
            value: value.to_string(),
        });
        self.state_mut(index)?.value = value.to_string();
        Ok(())
    }

    fn text(&self, element: ElementHandle) -> Result<String, BrowserError> {
        let (fixture, _) = self.element(element)?;
        Ok(fixture.text.clone())
    }

    fn value(&self, element: ElementHandle) -> Result<String, BrowserError> {
        let (_, index) = self.element(element)?;
        Ok(self.state(index)?.value.clone())
    }

    fn has_attribute(&self, element: ElementHandle, name: &str) -> Result<bool, BrowserError> {
        let (fixture, _) = self.element(element)?;
        Ok(fixture.attributes.iter().any(|a| a == name))
    }

    fn is_visible(&self, element: ElementHandle) -> Result<bool, BrowserError> {
        let (_, index) = self.element(element)?;
        Ok(self.state(index)?.visible)
    }

    fn page_text(&mut self) -> Result<String, BrowserError> {
        self.ensure_running()?;
        let loaded = self.current.as_mut().ok_or(BrowserError::NoPage)?;
        loaded.reads += 1;
        let reads = loaded.reads;
        self.journal.push(BrowserAction::ReadPageText);

        let loaded = self.loaded()?;
        let page = self.page(loaded)?;
        let mut parts: Vec<&str> = vec![page.text.trim()];
        for (fixture, state) in page.elements.iter().zip(&loaded.elements) {
            if state.visible {
                parts.push(fixture.text.trim());
            }
        }
        for delayed in &page.delayed_text {
            if reads >= delayed.appears_on_read {
                parts.push(delayed.text.trim());
            }
        }

        Ok(parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn current_url(&self) -> Option<String> {
        self.current.as_ref().map(|page| page.url.clone())
    }

    fn stop(&mut self) -> Result<(), BrowserError> {
        self.journal.push(BrowserAction::Stop);
        self.stopped = true;
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
