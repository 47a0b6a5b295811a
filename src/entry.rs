// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log entries and output dispatch.
//!
//! A log call goes through two stages:
//!
//! 1. [`Logger::new_entry`] captures the time, attributes the call site and
//!    resolves the threshold for its module.  The result is a [`PendingEntry`].
//! 2. [`PendingEntry::emit`] checks the requested severity against the resolved
//!    threshold, formats the message and hands a finished [`Entry`] to the
//!    logger's [`Outputter`](crate::Outputter).
//!
//! The level methods on [`Logger`] check [`PendingEntry::enabled`] before
//! formatting anything.  `emit` repeats the check so adapters that drive the
//! two stages by hand cannot bypass the filter.
//!
//! ```
//! use modlog::{InMemoryOutputter, Logger, Severity, Unattributed};
//! use std::sync::Arc;
//!
//! let memory = Arc::new(InMemoryOutputter::new());
//! let logger = Logger::builder()
//!     .default_threshold(Severity::Info)
//!     .outputter(memory.clone())
//!     .attribution(Arc::new(Unattributed))
//!     .build();
//!
//! let pending = logger.new_entry(0);
//! assert_eq!(pending.threshold(), Severity::Info);
//! pending.emit(Severity::Info, format_args!("ready after {} ms", 12));
//! assert_eq!(memory.drain_logs(), "info: ready after 12 ms");
//! ```

use crate::caller::CallSite;
use crate::logger::Logger;
use crate::severity::Severity;
use crate::sys::SystemTime;
use std::fmt::{Arguments, Display, Formatter};

/**
One log event, as seen by an [`Outputter`](crate::Outputter).

An entry carries both the threshold its module resolved to and the severity
the message was logged at.  The two are distinct fields; outputters typically
print the requested severity.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    time: SystemTime,
    resolved_threshold: Severity,
    requested_severity: Severity,
    message: String,
    caller: CallSite,
}

impl Entry {
    /// Builds an entry stamped with the current time and no call site.
    pub fn new(
        resolved_threshold: Severity,
        requested_severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            time: SystemTime::now(),
            resolved_threshold,
            requested_severity,
            message: message.into(),
            caller: CallSite::default(),
        }
    }

    pub fn with_caller(mut self, caller: CallSite) -> Self {
        self.caller = caller;
        self
    }

    pub fn with_time(mut self, time: SystemTime) -> Self {
        self.time = time;
        self
    }

    pub fn time(&self) -> SystemTime {
        self.time
    }

    /// The threshold the originating module resolved to.
    pub fn resolved_threshold(&self) -> Severity {
        self.resolved_threshold
    }

    /// The severity the message was logged at.
    pub fn requested_severity(&self) -> Severity {
        self.requested_severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn caller(&self) -> &CallSite {
        &self.caller
    }

    /// Shorthand for `caller().module`.
    pub fn module(&self) -> &str {
        &self.caller.module
    }
}

impl Display for Entry {
    /// `<severity>: <message>`, without a timestamp.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.requested_severity, self.message)
    }
}

/*
Boilerplate notes for Entry:

- Clone: outputters that keep entries (InMemoryOutputter) need it.
- PartialEq/Eq: handy in tests.  Hash is skipped since SystemTime on wasm is not Hash.
- Default: no; an entry without severities is meaningless.
- Entries are Send but are never shared between threads by the core.
*/

/**
A log call whose caller and threshold have been resolved but which has no
message yet.

Created by [`Logger::new_entry`] and consumed by [`PendingEntry::emit`].
*/
#[derive(Debug)]
#[must_use = "a pending entry does nothing until emitted"]
pub struct PendingEntry<'l> {
    logger: &'l Logger,
    time: SystemTime,
    threshold: Severity,
    caller: CallSite,
}

impl<'l> PendingEntry<'l> {
    pub(crate) fn new(logger: &'l Logger, time: SystemTime, threshold: Severity, caller: CallSite) -> Self {
        Self {
            logger,
            time,
            threshold,
            caller,
        }
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn caller(&self) -> &CallSite {
        &self.caller
    }

    /// Whether a message at `requested` would be emitted.
    pub fn enabled(&self, requested: Severity) -> bool {
        self.threshold.permits(requested)
    }

    /**
    Formats the message and forwards the entry to the logger's outputter.

    Nothing is formatted and nothing is output unless the resolved threshold
    permits `requested`.  The outputter runs synchronously on the calling
    thread, outside the logger's lock.
    */
    pub fn emit(self, requested: Severity, args: Arguments<'_>) {
        if !self.enabled(requested) {
            return;
        }
        let entry = Entry {
            time: self.time,
            resolved_threshold: self.threshold,
            requested_severity: requested,
            message: args.to_string(),
            caller: self.caller,
        };
        self.logger.outputter().output(&entry);
    }
}
