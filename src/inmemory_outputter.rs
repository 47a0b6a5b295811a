// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Outputter
//!
//! This module provides an in-memory outputter for testing and debugging purposes.
//! The `InMemoryOutputter` keeps every entry it receives instead of writing it
//! anywhere, making it ideal for:
//!
//! - Unit testing code that logs through modlog
//! - Asserting on module attribution and resolved thresholds, not just on text
//! - Capturing logs where stderr is redirected or unavailable
//!
//! Entries are stored behind a mutex, so one outputter can be shared across
//! threads and loggers.

use crate::entry::Entry;
use crate::outputter::Outputter;
use parking_lot::Mutex;

/// An outputter that stores entries in a `Vec<Entry>`.
///
/// # Example
///
/// ```rust
/// use modlog::{InMemoryOutputter, Logger, Severity, Unattributed};
/// use std::sync::Arc;
///
/// let memory = Arc::new(InMemoryOutputter::new());
/// let logger = Logger::builder()
///     .outputter(memory.clone())
///     .attribution(Arc::new(Unattributed))
///     .build();
///
/// logger.warn(format_args!("Something suspicious happened"));
/// logger.error(format_args!("An error occurred: {code}", code = 404));
///
/// let logs = memory.drain_logs();
/// assert!(logs.contains("warning: Something suspicious happened"));
/// assert!(logs.contains("error: An error occurred: 404"));
/// ```
#[derive(Debug)]
pub struct InMemoryOutputter {
    entries: Mutex<Vec<Entry>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: Derived for diagnostic purposes and required by Outputter
// - Default: Implemented with obvious zero-value (empty buffer)
// - Clone: NOT implemented - share it through Arc instead
// - PartialEq/Eq/Hash: NOT implemented - equality semantics unclear for sinks
// - Send/Sync: Automatically implemented due to Mutex usage

impl Default for InMemoryOutputter {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOutputter {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Drains all entries, rendered with their `Display` form and joined with newlines.
    ///
    /// Subsequent calls return an empty string until new entries arrive.
    pub fn drain_logs(&self) -> String {
        let mut entries = self.entries.lock();
        let result = entries
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        entries.clear();
        result
    }

    /// Drains all entries as they were received.
    pub fn drain_entries(&self) -> Vec<Entry> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Writes all entries to stderr, clearing the buffer.
    ///
    /// Useful when a test fails and you want to see what was logged.
    pub fn drain_to_console(&self) {
        for entry in self.drain_entries() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&entry.to_string().into());
            #[cfg(not(target_arch = "wasm32"))]
            eprintln!("{}", entry);
        }
    }
}

impl Outputter for InMemoryOutputter {
    fn output(&self, entry: &Entry) {
        self.entries.lock().push(entry.clone());
    }
}
