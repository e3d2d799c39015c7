// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture log implementation.

use crate::interaction::{CapturedExecution, CapturedOutcome, CapturedStep};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Shared, append-only record of executed steps.
///
/// Clones share the same underlying storage, so a log handed to a runner can
/// be inspected from the outside once the run finishes.
pub struct CaptureLog {
    start: Instant,
    executions: Arc<Mutex<Vec<CapturedExecution>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
    write_failures: Arc<AtomicUsize>,
}

impl CaptureLog {
    /// Create a new in-memory capture log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            executions: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
            write_failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a capture log that also appends to a file (JSONL format)
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            start: Instant::now(),
            executions: Arc::new(Mutex::new(Vec::new())),
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
            write_failures: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Record a step outcome
    pub fn record(&self, step: CapturedStep, outcome: CapturedOutcome) {
        let mut executions = self.executions.lock();
        let execution = CapturedExecution {
            seq: executions.len() as u64,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            step,
            outcome,
        };

        if let Some(ref writer) = self.file_writer {
            let mut w = writer.lock();
            let written = serde_json::to_string(&execution)
                .map_err(std::io::Error::from)
                .and_then(|json| {
                    writeln!(w, "{}", json)?;
                    w.flush()
                });
            if written.is_err() {
                self.write_failures.fetch_add(1, Ordering::Relaxed);
            }
        }

        executions.push(execution);
    }

    /// Records that could not be appended to the capture file; they are
    /// still kept in memory
    pub fn file_write_failures(&self) -> usize {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Get all captured executions in recording order
    pub fn executions(&self) -> Vec<CapturedExecution> {
        self.executions.lock().clone()
    }

    /// Get the last N executions
    pub fn last(&self, n: usize) -> Vec<CapturedExecution> {
        let all = self.executions.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }

    /// Sentences of every recorded step, in recording order
    pub fn sentences(&self) -> Vec<String> {
        self.executions
            .lock()
            .iter()
            .map(|e| e.step.sentence.clone())
            .collect()
    }

    /// Count executions matching a predicate
    pub fn count<F: Fn(&CapturedExecution) -> bool>(&self, pred: F) -> usize {
        self.executions.lock().iter().filter(|e| pred(e)).count()
    }

    /// Find executions whose sentence contains a substring
    pub fn find_by_sentence(&self, pattern: &str) -> Vec<CapturedExecution> {
        self.executions
            .lock()
            .iter()
            .filter(|e| e.step.sentence.contains(pattern))
            .cloned()
            .collect()
    }

    /// Find executions belonging to a scenario
    pub fn for_scenario(&self, scenario: &str) -> Vec<CapturedExecution> {
        self.executions
            .lock()
            .iter()
            .filter(|e| e.step.scenario == scenario)
            .cloned()
            .collect()
    }

    /// Find failed executions
    pub fn find_failures(&self) -> Vec<CapturedExecution> {
        self.executions
            .lock()
            .iter()
            .filter(|e| e.outcome.is_failure())
            .cloned()
            .collect()
    }

    /// Get the total number of executions
    pub fn len(&self) -> usize {
        self.executions.lock().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.executions.lock().is_empty()
    }

    /// Clear all recorded executions
    pub fn clear(&self) {
        self.executions.lock().clear();
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CaptureLog {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            executions: Arc::clone(&self.executions),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
            write_failures: Arc::clone(&self.write_failures),
        }
    }
}

impl std::fmt::Debug for CaptureLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureLog")
            .field("len", &self.len())
            .field("to_file", &self.file_writer.is_some())
            .field("write_failures", &self.file_write_failures())
            .finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
