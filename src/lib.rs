//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# modlog

modlog is a logging library where every message is filtered by a severity threshold that can be
overridden per module.  The module is worked out from the call site, not passed as an argument.

# The problem

A single global log level is either too quiet or too loud.  Turning on `debug` to look at one
subsystem floods the output with every other subsystem's chatter.  Target strings help, but
only if every call site remembers to pass one.

# The levels

| Name    | Rank | Notes                                               |
|---------|------|-----------------------------------------------------|
| panic   | 0    | [`Logger::panic`] panics after logging              |
| fatal   | 1    | [`Logger::fatal`] exits the process after logging   |
| error   | 2    |                                                     |
| warning | 3    | the default threshold; `warn` parses as well        |
| info    | 4    |                                                     |
| debug   | 5    |                                                     |

A threshold lets a message through when the threshold's rank is at least the message's rank.

# How a threshold is picked

1.  The call site is attributed by walking the stack (see [`StackWalker`]).  The enclosing
    function's module path becomes the *module identifier*, e.g. `myapp::storage::cache`.
2.  If that identifier was resolved before, the cached threshold is used.
3.  Otherwise the overrides are scanned in the order they were registered, and the first pattern
    that is a **suffix** of the identifier wins.  Matches are cached.
4.  If nothing matches, the current default threshold applies.  This is not cached, so changing
    the default affects every module without an override.

Cached matches are never invalidated implicitly.  Overrides should be registered before the
modules they target start logging, or followed by [`Logger::clear_cache`].

# The API

```
use modlog::Severity;

modlog::set_default_threshold(Severity::Warn);
modlog::set_module_threshold("storage::cache", Severity::Debug);

modlog::debug!("only shown when called from a module ending in storage::cache");
modlog::error!("shown from anywhere");
```

Independent loggers can be built with [`Logger::builder`]; the free functions and macros use
the [`standard_logger`].

# Configuration

Thresholds can be read from a directive string such as `warn,storage=debug`, see [`Config`].

# Outputs

Entries that pass are handed to an [`Outputter`].  [`WriterOutputter`] writes one line per entry
to stderr or any `io::Write`; [`InMemoryOutputter`] keeps entries for tests.  Byte-oriented
producers can log through [`LogWriter`].
*/

mod caller;
mod config;
mod entry;
pub mod global_logger;
mod inmemory_outputter;
mod logger;
mod macros;
mod outputter;
mod registry;
mod severity;
mod sys;
mod writer;
mod writer_outputter;

pub use caller::{
    Attribution, AttributionError, CallSite, Unattributed, derive_module_id, is_logger_frame,
};
#[cfg(not(target_arch = "wasm32"))]
pub use caller::StackWalker;
pub use config::{Config, ConfigError};
pub use entry::{Entry, PendingEntry};
pub use global_logger::{
    debug, error, fatal, info, log, panic, printf, set_default_threshold, set_module_threshold,
    set_outputter, standard_logger, warn, writer,
};
pub use inmemory_outputter::InMemoryOutputter;
pub use logger::{Logger, LoggerBuilder};
pub use outputter::Outputter;
pub use registry::Registry;
pub use severity::{ParseSeverityError, Severity};
pub use sys::SystemTime;
pub use writer::LogWriter;
pub use writer_outputter::WriterOutputter;
