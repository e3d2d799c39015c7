// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for binary-level tests.

#![allow(dead_code)]
#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Small shop used by the binary tests
pub const SITE: &str = r##"
name = "shop"

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

[[pages.elements]]
selectors = ["li", "li.order"]
text = "Order 1"

[[pages.elements]]
selectors = ["li", "li.order"]
text = "Order 2"

[[pages.elements]]
kind = "link"
selectors = ["a"]
text = "Edit"
navigates_to = "/orders/1"

[[pages]]
url = "/orders/1"
text = "Order 1 details"
"##;

/// A temp directory holding a site fixture plus whatever files a test adds
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let project = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        project.file("site.toml", SITE);
        project
    }

    /// Write a file into the project and return its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn site(&self) -> PathBuf {
        self.path("site.toml")
    }
}

/// The binary, isolated from any `BROWSERSTEPS_*` variables in the caller's
/// environment
pub fn browsersteps() -> Command {
    let mut cmd = Command::cargo_bin("browsersteps").unwrap();
    cmd.env_remove("BROWSERSTEPS_SITE")
        .env_remove("BROWSERSTEPS_CONFIG")
        .env_remove("BROWSERSTEPS_CAPTURE")
        .env_remove("RUST_LOG");
    cmd
}

pub fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}
