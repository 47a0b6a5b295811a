// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide logger.
//!
//! The standard logger is created on first use with:
//!
//! - default threshold [`Severity::Warn`],
//! - no module overrides and an empty cache,
//! - a [`WriterOutputter`](crate::WriterOutputter) on stderr (the browser console on wasm),
//! - the platform's default attribution strategy.
//!
//! It lives for the rest of the process; there is no teardown.  The free
//! functions in this module (re-exported at the crate root) and the logging
//! macros all go through it.
//!
//! Code that needs isolation, such as tests, should construct its own
//! [`Logger`] instead.
//!
//! # Examples
//!
//! ```
//! use modlog::Severity;
//!
//! modlog::set_default_threshold(Severity::Info);
//! modlog::set_module_threshold("noisy::dependency", Severity::Error);
//!
//! modlog::info(format_args!("service started on port {}", 8080));
//! ```
//!
//! # Thread Safety
//!
//! All functions are thread-safe.  Initialization uses `OnceLock`, so
//! concurrent first uses observe a single logger.

use crate::logger::Logger;
use crate::outputter::Outputter;
use crate::severity::Severity;
use crate::writer::LogWriter;
use std::fmt::Arguments;
use std::sync::{Arc, OnceLock};

static STANDARD_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger, initialized on first use.
pub fn standard_logger() -> &'static Logger {
    STANDARD_LOGGER.get_or_init(Logger::new)
}

/// Sets the default threshold of the standard logger.
pub fn set_default_threshold(threshold: Severity) {
    standard_logger().set_default_threshold(threshold);
}

/// Sets a module override on the standard logger.  See [`Logger::set_module_threshold`].
pub fn set_module_threshold(pattern: impl Into<String>, threshold: Severity) {
    standard_logger().set_module_threshold(pattern, threshold);
}

/// Replaces the standard logger's outputter.
pub fn set_outputter(outputter: Arc<dyn Outputter>) {
    standard_logger().set_outputter(outputter);
}

/// An [`std::io::Write`] adapter over the standard logger.
pub fn writer() -> LogWriter<'static> {
    standard_logger().writer()
}

#[inline(never)]
pub fn log(severity: Severity, args: Arguments<'_>) {
    standard_logger().dispatch(severity, args, 0);
}

#[inline(never)]
pub fn debug(args: Arguments<'_>) {
    standard_logger().dispatch(Severity::Debug, args, 0);
}

#[inline(never)]
pub fn info(args: Arguments<'_>) {
    standard_logger().dispatch(Severity::Info, args, 0);
}

/// Same as [`info`].
#[inline(never)]
pub fn printf(args: Arguments<'_>) {
    standard_logger().dispatch(Severity::Info, args, 0);
}

#[inline(never)]
pub fn warn(args: Arguments<'_>) {
    standard_logger().dispatch(Severity::Warn, args, 0);
}

#[inline(never)]
pub fn error(args: Arguments<'_>) {
    standard_logger().dispatch(Severity::Error, args, 0);
}

/// Logs at [`Severity::Fatal`] and exits with status 1.  See [`Logger::fatal`].
#[inline(never)]
pub fn fatal(args: Arguments<'_>) -> ! {
    let logger = standard_logger();
    logger.dispatch(Severity::Fatal, args, 0);
    logger.outputter().prepare_to_die();
    std::process::exit(1)
}

/// Logs at [`Severity::Panic`] and panics.  See [`Logger::panic`].
#[inline(never)]
pub fn panic(args: Arguments<'_>) -> ! {
    let message = args.to_string();
    standard_logger().dispatch(Severity::Panic, format_args!("{message}"), 0);
    panic!("{message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_outputter::InMemoryOutputter;
    use crate::writer_outputter::WriterOutputter;
    use std::sync::Mutex;

    static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn standard_logger_is_a_singleton() {
        assert!(std::ptr::eq(standard_logger(), standard_logger()));
    }

    #[test]
    fn free_functions_reach_the_standard_logger() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let memory = Arc::new(InMemoryOutputter::new());
        set_outputter(memory.clone());
        set_default_threshold(Severity::Info);

        info(format_args!("hello {}", "world"));
        debug(format_args!("not shown"));
        error(format_args!("shown"));

        let logs = memory.drain_logs();
        assert!(logs.contains("info: hello world"), "{logs}");
        assert!(logs.contains("error: shown"), "{logs}");
        assert!(!logs.contains("not shown"), "{logs}");

        set_default_threshold(Severity::Warn);
        set_outputter(Arc::new(WriterOutputter::stderr()));
    }

    mod overridden {
        #[inline(never)]
        pub fn log_debug() {
            crate::global_logger::debug(format_args!("debug from an overridden module"));
            std::hint::black_box(());
        }
    }

    #[test]
    fn module_override_on_the_standard_logger() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let memory = Arc::new(InMemoryOutputter::new());
        set_outputter(memory.clone());
        set_default_threshold(Severity::Warn);
        set_module_threshold("tests::overridden", Severity::Debug);

        overridden::log_debug();

        let entries = memory.drain_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].module().ends_with("global_logger::tests::overridden"));

        set_outputter(Arc::new(WriterOutputter::stderr()));
    }
}
