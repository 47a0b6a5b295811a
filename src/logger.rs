// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`Logger`] aggregate.
//!
//! A logger owns a [`Registry`] of thresholds, the current [`Outputter`] and an
//! [`Attribution`] strategy.  Registry and outputter share a single mutex; the
//! attribution strategy is fixed at construction.
//!
//! # Call depth
//!
//! Attribution steps over the logger's own frames (the level methods, the
//! global free functions, [`LogWriter`]'s `write` and the internal dispatch)
//! and attributes the first frame beyond them, so the result does not depend
//! on which of those frames the optimizer kept.  Adapters that add frames of
//! their own pass a `skip` to [`Logger::new_entry`] to reach further up.
//!
//! # Example
//!
//! ```
//! use modlog::{InMemoryOutputter, Logger, Severity};
//! use std::sync::Arc;
//!
//! let memory = Arc::new(InMemoryOutputter::new());
//! let logger = Logger::builder()
//!     .default_threshold(Severity::Warn)
//!     .outputter(memory.clone())
//!     .build();
//!
//! logger.set_module_threshold("storage::cache", Severity::Debug);
//! assert_eq!(logger.resolve("app::storage::cache"), Severity::Debug);
//! assert_eq!(logger.resolve("app::net"), Severity::Warn);
//!
//! logger.info(format_args!("filtered out unless this module is overridden"));
//! logger.error(format_args!("always shown at the default threshold"));
//! assert!(memory.drain_logs().contains("error: always shown"));
//! ```

use crate::caller::{Attribution, default_attribution};
use crate::config::Config;
use crate::entry::PendingEntry;
use crate::outputter::Outputter;
use crate::registry::Registry;
use crate::severity::Severity;
use crate::sys::SystemTime;
use crate::writer::LogWriter;
use crate::writer_outputter::WriterOutputter;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Arguments;
use std::sync::Arc;

#[derive(Debug)]
struct Shared {
    registry: Registry,
    outputter: Arc<dyn Outputter>,
}

/**
Filters log calls by a per-module threshold and forwards the survivors to an [`Outputter`].

Every method takes `&self`; a logger can be shared freely between threads.
See [`crate::standard_logger`] for the process-wide instance.
*/
#[derive(Debug)]
pub struct Logger {
    shared: Mutex<Shared>,
    attribution: Arc<dyn Attribution>,
}

/// Builds a [`Logger`].
#[derive(Debug)]
pub struct LoggerBuilder {
    default_threshold: Severity,
    outputter: Option<Arc<dyn Outputter>>,
    attribution: Option<Arc<dyn Attribution>>,
}

impl LoggerBuilder {
    pub fn default_threshold(mut self, threshold: Severity) -> Self {
        self.default_threshold = threshold;
        self
    }

    pub fn outputter(mut self, outputter: Arc<dyn Outputter>) -> Self {
        self.outputter = Some(outputter);
        self
    }

    /// Replaces the platform's default attribution strategy.
    pub fn attribution(mut self, attribution: Arc<dyn Attribution>) -> Self {
        self.attribution = Some(attribution);
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            shared: Mutex::new(Shared {
                registry: Registry::new(self.default_threshold),
                outputter: self
                    .outputter
                    .unwrap_or_else(|| Arc::new(WriterOutputter::stderr())),
            }),
            attribution: self.attribution.unwrap_or_else(default_attribution),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            default_threshold: Severity::Warn,
            outputter: None,
            attribution: None,
        }
    }
}

impl Logger {
    /// A logger with default threshold [`Severity::Warn`], writing to stderr.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    // ------------------------------------------------------------------
    // registration
    // ------------------------------------------------------------------

    pub fn set_default_threshold(&self, threshold: Severity) {
        self.shared.lock().registry.set_default_threshold(threshold);
    }

    pub fn default_threshold(&self) -> Severity {
        self.shared.lock().registry.default_threshold()
    }

    /**
    Sets the threshold for every module whose identifier ends with `pattern`.

    Patterns are scanned in registration order and the first match wins.
    Modules that already resolved keep their cached threshold.
    */
    pub fn set_module_threshold(&self, pattern: impl Into<String>, threshold: Severity) {
        self.shared
            .lock()
            .registry
            .set_module_threshold(pattern, threshold);
    }

    /// Snapshot of the override table in scan order.
    pub fn module_thresholds(&self) -> Vec<(String, Severity)> {
        self.shared.lock().registry.module_thresholds().to_vec()
    }

    pub fn set_outputter(&self, outputter: Arc<dyn Outputter>) {
        self.shared.lock().outputter = outputter;
    }

    pub fn outputter(&self) -> Arc<dyn Outputter> {
        self.shared.lock().outputter.clone()
    }

    pub fn attribution(&self) -> &Arc<dyn Attribution> {
        &self.attribution
    }

    /// Applies a parsed [`Config`]: its default (if any), then its overrides in order.
    pub fn apply(&self, config: &Config) {
        let mut shared = self.shared.lock();
        if let Some(default) = config.default_threshold() {
            shared.registry.set_default_threshold(default);
        }
        for (pattern, threshold) in config.module_thresholds() {
            shared
                .registry
                .set_module_threshold(pattern.as_str(), *threshold);
        }
    }

    // ------------------------------------------------------------------
    // resolution
    // ------------------------------------------------------------------

    /// Resolves the effective threshold for a module identifier, populating the cache on a match.
    pub fn resolve(&self, module_id: &str) -> Severity {
        self.shared.lock().registry.resolve(module_id)
    }

    /// Snapshot of the resolution cache.
    pub fn cached_thresholds(&self) -> HashMap<String, Severity> {
        self.shared.lock().registry.cached_thresholds().clone()
    }

    /// Forgets every cached resolution, so later overrides apply to modules seen before.
    pub fn clear_cache(&self) {
        self.shared.lock().registry.clear_cache();
    }

    /**
    Starts a log call: captures the time, attributes the caller and resolves its threshold.

    `skip` selects the frame to attribute, counted past the logger's own
    frames: 0 is normally the function calling `new_entry`, 1 is its caller,
    and so on.  When attribution fails the entry carries an
    empty call site and the default threshold.
    */
    #[inline(never)]
    pub fn new_entry(&self, skip: usize) -> PendingEntry<'_> {
        let time = SystemTime::now();
        let caller = self.attribution.attribute(skip).unwrap_or_default();
        let threshold = self.resolve(&caller.module);
        PendingEntry::new(self, time, threshold, caller)
    }

    #[inline(never)]
    pub(crate) fn dispatch(&self, severity: Severity, args: Arguments<'_>, skip: usize) {
        let pending = self.new_entry(skip);
        if pending.enabled(severity) {
            pending.emit(severity, args);
        }
    }

    // ------------------------------------------------------------------
    // logging
    // ------------------------------------------------------------------

    /// Logs at an explicit severity.  Never terminates, even for `Fatal` and `Panic`.
    #[inline(never)]
    pub fn log(&self, severity: Severity, args: Arguments<'_>) {
        self.dispatch(severity, args, 0);
    }

    #[inline(never)]
    pub fn debug(&self, args: Arguments<'_>) {
        self.dispatch(Severity::Debug, args, 0);
    }

    #[inline(never)]
    pub fn info(&self, args: Arguments<'_>) {
        self.dispatch(Severity::Info, args, 0);
    }

    /// Same as [`Logger::info`].
    #[inline(never)]
    pub fn printf(&self, args: Arguments<'_>) {
        self.dispatch(Severity::Info, args, 0);
    }

    #[inline(never)]
    pub fn warn(&self, args: Arguments<'_>) {
        self.dispatch(Severity::Warn, args, 0);
    }

    #[inline(never)]
    pub fn error(&self, args: Arguments<'_>) {
        self.dispatch(Severity::Error, args, 0);
    }

    /**
    Logs at [`Severity::Fatal`], then exits the process with status 1.

    The process exits even when the message was filtered out.  The outputter
    gets a chance to flush via [`Outputter::prepare_to_die`].
    */
    #[inline(never)]
    pub fn fatal(&self, args: Arguments<'_>) -> ! {
        self.dispatch(Severity::Fatal, args, 0);
        self.outputter().prepare_to_die();
        std::process::exit(1)
    }

    /**
    Logs at [`Severity::Panic`], then panics with the message.

    Panics even when the message was filtered out.
    */
    #[inline(never)]
    pub fn panic(&self, args: Arguments<'_>) -> ! {
        let message = args.to_string();
        self.dispatch(Severity::Panic, format_args!("{message}"), 0);
        panic!("{message}")
    }

    /// An [`std::io::Write`] adapter that logs every write at [`Severity::Info`].
    pub fn writer(&self) -> LogWriter<'_> {
        LogWriter::new(self)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/*
Boilerplate notes.

Clone: no.  Two handles to the same registry is what Arc<Logger> is for, and
cloning the registry would make overrides silently diverge.
PartialEq/Hash: no meaningful notion.
Send/Sync: automatic; the mutex guards everything mutable.
*/
