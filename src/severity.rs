// SPDX-License-Identifier: MIT OR Apache-2.0

//! The six-step severity scale.
//!
//! Severities are ranked from most severe (and least verbose) to least severe
//! (and most verbose):
//!
//! | Severity | Rank |
//! |----------|------|
//! | panic    | 0    |
//! | fatal    | 1    |
//! | error    | 2    |
//! | warning  | 3    |
//! | info     | 4    |
//! | debug    | 5    |
//!
//! The same type is used for the severity of a message and for the threshold
//! configured on a module.  A threshold permits a message when the threshold is
//! at least as verbose as the message, see [`Severity::permits`].
//!
//! ```
//! use modlog::Severity;
//!
//! let threshold: Severity = "warning".parse().unwrap();
//! assert!(threshold.permits(Severity::Error));
//! assert!(!threshold.permits(Severity::Info));
//! assert_eq!(threshold.to_string(), "warning");
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Severity {
    /// Programmer error.  [`crate::Logger::panic`] panics after logging.
    Panic = 0,
    /// Unrecoverable error.  [`crate::Logger::fatal`] exits the process after logging.
    Fatal = 1,
    /// Runtime error that should definitely be noted.
    Error = 2,
    /// Non-critical condition that deserves eyes.
    #[cfg_attr(feature = "serde", serde(rename = "warning", alias = "warn"))]
    Warn = 3,
    /// General operational messages.
    Info = 4,
    /// Very verbose, usually only enabled while debugging.
    Debug = 5,
}

impl Severity {
    /// Every severity, ordered by rank.
    pub const ALL: [Severity; 6] = [
        Severity::Panic,
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    /// The verbosity rank.  Higher is more verbose.
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /**
    Whether a threshold of `self` lets a message of severity `requested` through.

    This holds when `self.rank() >= requested.rank()`.
    */
    #[inline]
    pub const fn permits(self, requested: Severity) -> bool {
        self.rank() >= requested.rank()
    }

    /// The canonical lower-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warn => "warning",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }
}

/// A level name that is not one of the recognized severities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid log level: {name:?}")]
pub struct ParseSeverityError {
    name: String,
}

impl ParseSeverityError {
    /// The rejected text.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Names are case-sensitive.  `warn` and `warning` are synonyms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "panic" => Ok(Severity::Panic),
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => Err(ParseSeverityError {
                name: s.to_string(),
            }),
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/*
Boilerplate notes.

Severity is a fieldless enum, so Copy/Eq/Hash are free.
Ord follows the rank, so `Severity::Panic < Severity::Debug`.  Note this is the
opposite of "how bad is it"; use `permits` for filtering instead of raw comparisons.
Default is deliberately not implemented: the logger's default threshold lives on
the logger, and a type-level default would suggest otherwise.
*/
