// SPDX-License-Identifier: MIT OR Apache-2.0

//! Threshold registry and the resolution algorithm.
//!
//! A [`Registry`] holds three things:
//!
//! 1. the default threshold,
//! 2. an ordered table of module overrides, `(pattern, threshold)`,
//! 3. a cache from concrete module identifier to resolved threshold.
//!
//! Resolution consults the cache first.  On a miss it scans the overrides in
//! registration order and the **first** pattern that is a suffix of the module
//! identifier wins.  This is first-match, not longest-match: registering
//! `world` before `hello/world` means `foo/hello/world` resolves to the
//! threshold of `world`.
//!
//! Matched results are cached and never invalidated implicitly, so changing an
//! override after a module has been seen has no effect on that module until
//! [`Registry::clear_cache`] is called.  Unmatched modules are never cached and
//! always track the current default.
//!
//! The registry itself is not synchronized.  [`crate::Logger`] keeps it behind
//! its single mutex.

use crate::severity::Severity;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    default: Severity,
    overrides: Vec<(String, Severity)>,
    cache: HashMap<String, Severity>,
}

impl Registry {
    /// An empty registry with the given default threshold.
    pub fn new(default: Severity) -> Self {
        Self {
            default,
            overrides: Vec::new(),
            cache: HashMap::new(),
        }
    }

    pub fn default_threshold(&self) -> Severity {
        self.default
    }

    pub fn set_default_threshold(&mut self, threshold: Severity) {
        self.default = threshold;
    }

    /**
    Sets the threshold for modules whose identifier ends with `pattern`.

    A pattern that was registered before keeps its position in the scan order;
    new patterns go to the end.  The cache is left alone.
    */
    pub fn set_module_threshold(&mut self, pattern: impl Into<String>, threshold: Severity) {
        let pattern = pattern.into();
        match self.overrides.iter_mut().find(|(p, _)| *p == pattern) {
            Some((_, existing)) => *existing = threshold,
            None => self.overrides.push((pattern, threshold)),
        }
    }

    /// The override table in scan order.
    pub fn module_thresholds(&self) -> &[(String, Severity)] {
        &self.overrides
    }

    /// Resolves the effective threshold for `module_id`.
    pub fn resolve(&mut self, module_id: &str) -> Severity {
        // unattributed calls have nothing to match or cache
        if module_id.is_empty() {
            return self.default;
        }
        if let Some(cached) = self.cache.get(module_id) {
            return *cached;
        }
        let matched = self
            .overrides
            .iter()
            .find(|(pattern, _)| module_id.ends_with(pattern.as_str()))
            .map(|(_, threshold)| *threshold);
        match matched {
            Some(threshold) => {
                self.cache.insert(module_id.to_string(), threshold);
                threshold
            }
            None => self.default,
        }
    }

    pub fn cached(&self, module_id: &str) -> Option<Severity> {
        self.cache.get(module_id).copied()
    }

    pub fn cached_thresholds(&self) -> &HashMap<String, Severity> {
        &self.cache
    }

    /// Forgets every cached resolution.  Nothing calls this implicitly.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for Registry {
    /// Default threshold [`Severity::Warn`], no overrides.
    fn default() -> Self {
        Self::new(Severity::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn suffix_match_resolves_override() {
        let mut registry = Registry::new(Severity::Warn);
        registry.set_module_threshold("net", Severity::Debug);
        assert_eq!(registry.resolve("app::net"), Severity::Debug);
        assert_eq!(registry.resolve("app::db"), Severity::Warn);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn first_registered_match_wins() {
        let mut registry = Registry::new(Severity::Warn);
        registry.set_module_threshold("world", Severity::Error);
        registry.set_module_threshold("hello/world", Severity::Debug);
        assert_eq!(registry.resolve("foo/hello/world"), Severity::Error);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn upsert_keeps_position() {
        let mut registry = Registry::new(Severity::Warn);
        registry.set_module_threshold("world", Severity::Error);
        registry.set_module_threshold("hello/world", Severity::Debug);
        registry.set_module_threshold("world", Severity::Info);
        assert_eq!(
            registry.module_thresholds(),
            &[
                ("world".to_string(), Severity::Info),
                ("hello/world".to_string(), Severity::Debug)
            ]
        );
        assert_eq!(registry.resolve("foo/hello/world"), Severity::Info);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn cache_hit_ignores_later_overrides() {
        let mut registry = Registry::new(Severity::Warn);
        registry.set_module_threshold("db", Severity::Debug);
        assert_eq!(registry.resolve("app::db"), Severity::Debug);

        registry.set_module_threshold("db", Severity::Panic);
        registry.set_default_threshold(Severity::Error);
        assert_eq!(registry.resolve("app::db"), Severity::Debug);
        assert_eq!(registry.cached("app::db"), Some(Severity::Debug));

        registry.clear_cache();
        assert_eq!(registry.resolve("app::db"), Severity::Panic);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn unmatched_tracks_current_default() {
        let mut registry = Registry::new(Severity::Warn);
        registry.set_module_threshold("db", Severity::Debug);
        assert_eq!(registry.resolve("app::ui"), Severity::Warn);
        registry.set_default_threshold(Severity::Info);
        assert_eq!(registry.resolve("app::ui"), Severity::Info);
        assert!(registry.cached("app::ui").is_none());
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn suffix_match_is_lossy() {
        let mut registry = Registry::new(Severity::Warn);
        registry.set_module_threshold("main", Severity::Panic);
        assert_eq!(registry.resolve("/foo/hello/world/fakemain"), Severity::Panic);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn empty_module_uses_default() {
        let mut registry = Registry::new(Severity::Info);
        registry.set_module_threshold("", Severity::Debug);
        assert_eq!(registry.resolve(""), Severity::Info);
        assert!(registry.cached_thresholds().is_empty());
    }
}
