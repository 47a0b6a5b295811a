// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bridges byte-stream writers into a [`Logger`].
//!
//! [`LogWriter`] implements [`std::io::Write`].  Every call to `write` becomes
//! one log call at a fixed severity, attributed like any other call.  This lets
//! code that only knows how to write to an `io::Write` (child process output,
//! third-party libraries) take part in per-module filtering.

use crate::logger::Logger;
use crate::severity::Severity;
use std::io;

/**
An [`io::Write`] that logs each write as one message.

By default the attributed frame is the direct caller of `write`.  When the
writer is driven through helpers such as `write_all` or `writeln!`, those
helpers are the direct caller; raise the skip with [`LogWriter::with_skip`] to
reach further up.

A single trailing newline is trimmed.  Invalid UTF-8 is replaced.  `write`
always reports the whole buffer as written.

```
use modlog::{InMemoryOutputter, Logger, Severity, Unattributed};
use std::io::Write;
use std::sync::Arc;

let memory = Arc::new(InMemoryOutputter::new());
let logger = Logger::builder()
    .default_threshold(Severity::Info)
    .outputter(memory.clone())
    .attribution(Arc::new(Unattributed))
    .build();

let mut writer = logger.writer();
writer.write_all(b"child exited\n").unwrap();
assert_eq!(memory.drain_logs(), "info: child exited");
```
*/
#[derive(Debug, Clone)]
pub struct LogWriter<'l> {
    logger: &'l Logger,
    severity: Severity,
    skip: usize,
}

impl<'l> LogWriter<'l> {
    pub fn new(logger: &'l Logger) -> Self {
        Self {
            logger,
            severity: Severity::Info,
            skip: 0,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Attributes writes to a frame `skip` levels above the direct caller of `write`.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl io::Write for LogWriter<'_> {
    #[inline(never)]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let message = text.strip_suffix('\n').unwrap_or(&*text);
        self.logger
            .dispatch(self.severity, format_args!("{message}"), self.skip);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
