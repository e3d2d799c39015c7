// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Step execution capture and recording for test assertions.
//!
//! This crate records every step a browsersteps run executes, including the
//! steps produced by composite expansion, so runs can be inspected afterwards
//! or asserted against in tests.

mod duration_serde;
mod interaction;
mod log;

pub use interaction::{CapturedExecution, CapturedOutcome, CapturedStep};
pub use log::CaptureLog;
