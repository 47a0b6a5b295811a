// SPDX-License-Identifier: MIT OR Apache-2.0

//! Formatting macros over the standard logger.
//!
//! Each macro takes `format!`-style arguments and calls the matching free
//! function, e.g. [`info!`](crate::info!) calls [`crate::info`].  Macros expand
//! in place, so the attributed frame is the function containing the macro
//! call.
//!
//! Formatting is lazy: arguments are only rendered when the caller's module
//! threshold permits the message.
//!
//! ```
//! # let port = 8080;
//! modlog::set_default_threshold(modlog::Severity::Info);
//! modlog::info!("listening on {port}");
//! modlog::warn!("{} retries left", 3);
//! modlog::log!(modlog::Severity::Error, "explicit severity");
//! ```
//!
//! The panic-level macro is named [`log_panic!`](crate::log_panic!) so it does
//! not shadow `std::panic!`.

/// Logs at an explicit [`Severity`](crate::Severity).  Never terminates.
#[macro_export]
macro_rules! log {
    ($severity:expr, $($arg:tt)+) => {
        $crate::log($severity, format_args!($($arg)+))
    };
}

/// Logs at [`Severity::Debug`](crate::Severity::Debug).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::debug(format_args!($($arg)+))
    };
}

/// Logs at [`Severity::Info`](crate::Severity::Info).
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::info(format_args!($($arg)+))
    };
}

/// Logs at [`Severity::Info`](crate::Severity::Info), like [`info!`](crate::info!).
#[macro_export]
macro_rules! printf {
    ($($arg:tt)+) => {
        $crate::printf(format_args!($($arg)+))
    };
}

/// Logs at [`Severity::Warn`](crate::Severity::Warn).
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::warn(format_args!($($arg)+))
    };
}

/// Logs at [`Severity::Error`](crate::Severity::Error).
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::error(format_args!($($arg)+))
    };
}

/// Logs at [`Severity::Fatal`](crate::Severity::Fatal), then exits with status 1.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::fatal(format_args!($($arg)+))
    };
}

/// Logs at [`Severity::Panic`](crate::Severity::Panic), then panics with the message.
#[macro_export]
macro_rules! log_panic {
    ($($arg:tt)+) => {
        $crate::panic(format_args!($($arg)+))
    };
}
