// SPDX-License-Identifier: MIT OR Apache-2.0

//! Threshold configuration from directive strings.
//!
//! A directive string is a comma-separated list.  Each item is either a bare
//! level name, which sets the default threshold, or `pattern=level`, which adds
//! a module override:
//!
//! ```text
//! warn,storage=debug,net::tls=error
//! ```
//!
//! Overrides keep their order, which matters because the first matching
//! pattern wins.  Whitespace around items is ignored and empty items are
//! skipped.
//!
//! ```
//! use modlog::{Config, Logger, Severity};
//!
//! let config: Config = "info, storage=debug".parse().unwrap();
//! let logger = Logger::new();
//! logger.apply(&config);
//! assert_eq!(logger.default_threshold(), Severity::Info);
//! assert_eq!(logger.resolve("app::storage"), Severity::Debug);
//! ```

use crate::severity::{ParseSeverityError, Severity};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid level in directive {directive:?}")]
    InvalidLevel {
        directive: String,
        #[source]
        source: ParseSeverityError,
    },
    #[error("empty module pattern in directive {directive:?}")]
    EmptyPattern { directive: String },
    #[error("environment variable {var} is not valid unicode")]
    NotUnicode { var: String },
}

/// A parsed set of thresholds, ready to [`apply`](crate::Logger::apply).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    #[cfg_attr(feature = "serde", serde(default))]
    default: Option<Severity>,
    #[cfg_attr(feature = "serde", serde(default))]
    modules: Vec<(String, Severity)>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, threshold: Severity) -> Self {
        self.default = Some(threshold);
        self
    }

    /// Appends an override.  A repeated pattern replaces the earlier threshold in place.
    pub fn with_module(mut self, pattern: impl Into<String>, threshold: Severity) -> Self {
        self.push_module(pattern.into(), threshold);
        self
    }

    pub fn default_threshold(&self) -> Option<Severity> {
        self.default
    }

    pub fn module_thresholds(&self) -> &[(String, Severity)] {
        &self.modules
    }

    /**
    Reads directives from the environment variable `var`.

    Returns `Ok(None)` when the variable is not set.
    */
    pub fn from_env(var: &str) -> Result<Option<Self>, ConfigError> {
        match std::env::var(var) {
            Ok(value) => value.parse().map(Some),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                var: var.to_string(),
            }),
        }
    }

    fn push_module(&mut self, pattern: String, threshold: Severity) {
        match self.modules.iter_mut().find(|(p, _)| *p == pattern) {
            Some((_, existing)) => *existing = threshold,
            None => self.modules.push((pattern, threshold)),
        }
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Config::default();
        for directive in s.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let invalid = |source: ParseSeverityError| ConfigError::InvalidLevel {
                directive: directive.to_string(),
                source,
            };
            match directive.split_once('=') {
                None => config.default = Some(directive.parse().map_err(invalid)?),
                Some((pattern, level)) => {
                    let pattern = pattern.trim();
                    if pattern.is_empty() {
                        return Err(ConfigError::EmptyPattern {
                            directive: directive.to_string(),
                        });
                    }
                    let threshold = level.trim().parse().map_err(invalid)?;
                    config.push_module(pattern.to_string(), threshold);
                }
            }
        }
        Ok(config)
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        if let Some(default) = self.default {
            write!(f, "{default}")?;
            first = false;
        }
        for (pattern, threshold) in &self.modules {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{pattern}={threshold}")?;
            first = false;
        }
        Ok(())
    }
}
