// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::entry::Entry;
use crate::outputter::Outputter;
use crate::sys::UNIX_EPOCH;
use parking_lot::Mutex;
use std::io::Write;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]/[month padding:zero]/[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]"
);

enum Destination {
    Stderr,
    Stdout,
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl std::fmt::Debug for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Stderr => f.write_str("Stderr"),
            Destination::Stdout => f.write_str("Stdout"),
            Destination::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/**
The reference outputter.  Writes one line per entry:

```text
2024/05/01 12:00:00 warning: disk almost full
```

The timestamp is UTC and can be turned off with [`WriterOutputter::without_timestamps`].
Write errors are ignored.
*/
#[derive(Debug)]
pub struct WriterOutputter {
    destination: Destination,
    timestamps: bool,
}

impl WriterOutputter {
    /// Writes to stderr.  On wasm, writes to the browser console.
    pub const fn stderr() -> Self {
        Self {
            destination: Destination::Stderr,
            timestamps: true,
        }
    }

    pub const fn stdout() -> Self {
        Self {
            destination: Destination::Stdout,
            timestamps: true,
        }
    }

    /// Writes to an arbitrary destination.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            destination: Destination::Writer(Mutex::new(Box::new(writer))),
            timestamps: true,
        }
    }

    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    /// Renders `entry` the way this outputter writes it, including the newline.
    pub fn format_entry(&self, entry: &Entry) -> String {
        let mut line = String::new();
        if self.timestamps {
            line.push_str(&format_timestamp(entry));
            line.push(' ');
        }
        line.push_str(&entry.to_string());
        line.push('\n');
        line
    }
}

fn format_timestamp(entry: &Entry) -> String {
    let since_epoch = entry.time().duration_since(UNIX_EPOCH).unwrap_or_default();
    time::Duration::try_from(since_epoch)
        .ok()
        .and_then(|offset| OffsetDateTime::UNIX_EPOCH.checked_add(offset))
        .and_then(|moment| moment.format(TIMESTAMP_FORMAT).ok())
        .unwrap_or_else(|| "1970/01/01 00:00:00".to_string())
}

impl Default for WriterOutputter {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Outputter for WriterOutputter {
    fn output(&self, entry: &Entry) {
        let line = self.format_entry(entry);
        match &self.destination {
            #[cfg(not(target_arch = "wasm32"))]
            Destination::Stderr => {
                let _ = std::io::stderr().lock().write_all(line.as_bytes());
            }
            #[cfg(not(target_arch = "wasm32"))]
            Destination::Stdout => {
                let _ = std::io::stdout().lock().write_all(line.as_bytes());
            }
            #[cfg(target_arch = "wasm32")]
            Destination::Stderr | Destination::Stdout => {
                use crate::Severity;
                let msg = line.trim_end().to_string();
                match entry.requested_severity() {
                    Severity::Debug => web_sys::console::debug_1(&msg.into()),
                    Severity::Info => web_sys::console::info_1(&msg.into()),
                    Severity::Warn => web_sys::console::warn_1(&msg.into()),
                    Severity::Error | Severity::Fatal | Severity::Panic => {
                        web_sys::console::error_1(&msg.into())
                    }
                }
            }
            Destination::Writer(writer) => {
                let _ = writer.lock().write_all(line.as_bytes());
            }
        }
    }

    fn prepare_to_die(&self) {
        match &self.destination {
            #[cfg(not(target_arch = "wasm32"))]
            Destination::Stderr => {
                let _ = std::io::stderr().flush();
            }
            #[cfg(not(target_arch = "wasm32"))]
            Destination::Stdout => {
                let _ = std::io::stdout().flush();
            }
            #[cfg(target_arch = "wasm32")]
            Destination::Stderr | Destination::Stdout => {}
            Destination::Writer(writer) => {
                let _ = writer.lock().flush();
            }
        }
    }
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: Derived (Destination hides the boxed writer)
// - Default: Implemented - stderr with timestamps
// - Clone/Copy: NOT implemented - a boxed writer can't be duplicated
// - PartialEq/Eq/Hash: NOT implemented - no meaningful equality for a sink
// - Send/Sync: Automatic - the writer is Send and guarded by a Mutex
