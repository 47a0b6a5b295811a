// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call-site attribution.
//!
//! Every log call is attributed to the code that made it: the source file, the
//! line, the qualified name of the enclosing function and a *module identifier*
//! derived from them.  The module identifier is what per-module thresholds are
//! matched against.
//!
//! Attribution is pluggable through the [`Attribution`] trait.  Two strategies
//! ship with the crate:
//!
//! * [`StackWalker`] walks the live call stack.  This is the default on native
//!   targets.
//! * [`Unattributed`] never attributes anything, so every call resolves against
//!   the default threshold.  This is the default on `wasm32`, where the stack
//!   cannot be walked.
//!
//! # Module identifiers are approximate
//!
//! [`derive_module_id`] takes the module path of the enclosing function, or the
//! directory of the source file when the function lives at the root of the
//! program's entry crate.  The derivation is lossy:
//!
//! * calls from closures carry `{{closure}}` segments,
//! * calls from trait impls carry `<Type as Trait>` segments,
//! * thresholds are later matched as suffixes, so a pattern like `main` also
//!   matches an identifier like `src/bin/fakemain`.
//!
//! These quirks are part of the observable behavior; patterns should be
//! chosen with them in mind.

use std::fmt::Debug;
use std::path::Path;
use thiserror::Error;

/// Where a log call came from.
///
/// The default value is the empty site used when attribution fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Source file path, as recorded in debug info.
    pub file: String,
    /// Line number, 0 when unknown.
    pub line: u32,
    /// Qualified name of the enclosing function, without the symbol hash.
    pub function: String,
    /// Module identifier derived from `function` and `file`.
    pub module: String,
}

impl CallSite {
    /// Whether this site carries any attribution at all.
    pub fn is_empty(&self) -> bool {
        self.module.is_empty() && self.function.is_empty() && self.file.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributionError {
    /// The stack ended before the requested frame.
    #[error("no stack frame {skip} levels above the caller")]
    FrameUnavailable { skip: usize },
    /// Symbols could not be resolved, e.g. stripped binaries or unsupported targets.
    #[error("stack symbols are unavailable")]
    SymbolUnresolved,
}

/**
A strategy for attributing log calls to call sites.

`skip` counts stack frames above the logging machinery.  The logger's own
entry points (see [`is_logger_frame`]) are stepped over first; 0 is then the
nearest remaining frame, normally the code that called into the logger or
called `attribute` directly, 1 is its caller, and so on.

Failures are never fatal to a log call; the logger falls back to
[`CallSite::default`] and the default threshold.
*/
pub trait Attribution: Debug + Send + Sync {
    fn attribute(&self, skip: usize) -> Result<CallSite, AttributionError>;
}

/// Derives a module identifier from a qualified function name and its source file.
///
/// The function name is split at its last `::`.  The leading part (the module
/// path) is the identifier, unless it equals `entry_module`, in which case the
/// directory of `file` is used instead.
///
/// ```
/// use modlog::derive_module_id;
///
/// assert_eq!(
///     derive_module_id("server::net::connect", "src/net.rs", "server_bin"),
///     "server::net"
/// );
/// // functions at the root of the entry crate fall back to their directory
/// assert_eq!(derive_module_id("server_bin::main", "src/bin/server.rs", "server_bin"), "src/bin");
/// ```
pub fn derive_module_id(function: &str, file: &str, entry_module: &str) -> String {
    let module = match function.rsplit_once("::") {
        Some((module, _)) => module,
        None => function,
    };
    if !module.is_empty() && module != entry_module {
        return module.to_string();
    }
    let directory = directory_of(file);
    if !directory.is_empty() {
        return directory;
    }
    entry_module.to_string()
}

fn directory_of(file: &str) -> String {
    Path::new(file)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Attributes nothing.  Every call resolves against the default threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unattributed;

impl Attribution for Unattributed {
    fn attribute(&self, _skip: usize) -> Result<CallSite, AttributionError> {
        Err(AttributionError::SymbolUnresolved)
    }
}

/// Types and modules whose functions are the logger's own entry points.
const LOGGER_PATHS: &[&str] = &[
    concat!(env!("CARGO_CRATE_NAME"), "::logger::Logger"),
    concat!(env!("CARGO_CRATE_NAME"), "::global_logger"),
    concat!(env!("CARGO_CRATE_NAME"), "::writer::LogWriter"),
    concat!(env!("CARGO_CRATE_NAME"), "::caller::StackWalker"),
];

/// Whether `function`, a demangled name without its hash, is one of the logger's entry points.
///
/// Stack walks step over these frames before counting `skip`, so attribution
/// does not depend on how many of them survive optimization.  Only items
/// directly on [`crate::Logger`], [`crate::LogWriter`], [`StackWalker`] or in
/// the global logger module count; a nested module such as a test module
/// inside `global_logger` is ordinary user code.
///
/// ```
/// use modlog::is_logger_frame;
///
/// assert!(is_logger_frame("modlog::logger::Logger::info"));
/// assert!(is_logger_frame("<modlog::writer::LogWriter as std::io::Write>::write"));
/// assert!(!is_logger_frame("myapp::storage::flush"));
/// ```
pub fn is_logger_frame(function: &str) -> bool {
    let Some((owner, _item)) = function.rsplit_once("::") else {
        return false;
    };
    // `<Type as Trait>` and `<Type>` name the type
    let owner = match owner.strip_prefix('<') {
        Some(qualified) => qualified.split(" as ").next().unwrap_or(qualified),
        None => owner,
    };
    let owner = owner.split('<').next().unwrap_or(owner).trim_end_matches('>');
    LOGGER_PATHS.contains(&owner)
}

/// Attributes calls by walking the live call stack.
///
/// Requires symbol information; in stripped binaries every call comes back as
/// [`AttributionError::SymbolUnresolved`].  File and line need debug info as
/// well; without it they are empty and the module comes from the function
/// name alone.
///
/// Inlined calls are reported as separate frames when debug info describes
/// them.  A function whose last action is a log call may still be turned into
/// a tail call by the optimizer, in which case its caller is attributed.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackWalker {
    entry_module: String,
}

#[cfg(not(target_arch = "wasm32"))]
const WALK_MARKER: &str = "StackWalker::walk";

#[cfg(not(target_arch = "wasm32"))]
impl StackWalker {
    /**
    Uses the running executable's name as the entry module.

    The name is the file stem with `-` mapped to `_`.  The `-<hash>` suffix
    Cargo appends to test binaries is dropped first, so functions at the root
    of an integration test also fall back to their directory.
    */
    pub fn new() -> Self {
        let entry_module = std::env::current_exe()
            .ok()
            .and_then(|path| {
                path.file_stem()
                    .map(|stem| entry_module_name(&stem.to_string_lossy()))
            })
            .unwrap_or_else(|| "main".to_string());
        Self { entry_module }
    }

    /// Overrides the name of the program's entry module.
    pub fn with_entry_module(mut self, entry_module: impl Into<String>) -> Self {
        self.entry_module = entry_module.into();
        self
    }

    pub fn entry_module(&self) -> &str {
        &self.entry_module
    }

    // Must stay a distinct frame: the walk locates itself by name.
    #[inline(never)]
    fn walk(&self, skip: usize) -> Result<CallSite, AttributionError> {
        let mut seen_marker = false;
        let mut past_logger = false;
        let mut remaining = skip;
        let mut site = None;
        backtrace::trace(|frame| {
            // one physical frame holds a symbol per inlined call, innermost first
            backtrace::resolve_frame(frame, |symbol| {
                if site.is_some() {
                    return;
                }
                let function = symbol
                    .name()
                    .map(|name| format!("{name:#}"))
                    .unwrap_or_default();
                if !seen_marker {
                    seen_marker = function.ends_with(WALK_MARKER);
                    return;
                }
                if !past_logger {
                    if is_logger_frame(&function) {
                        return;
                    }
                    past_logger = true;
                }
                if remaining > 0 {
                    remaining -= 1;
                    return;
                }
                site = Some(self.describe(function, symbol));
            });
            site.is_none()
        });
        if !seen_marker {
            return Err(AttributionError::SymbolUnresolved);
        }
        site.ok_or(AttributionError::FrameUnavailable { skip })
    }

    fn describe(&self, function: String, symbol: &backtrace::Symbol) -> CallSite {
        let file = symbol
            .filename()
            .map(|file| file.to_string_lossy().into_owned())
            .unwrap_or_default();
        let module = if function.is_empty() && file.is_empty() {
            String::new()
        } else {
            derive_module_id(&function, &file, &self.entry_module)
        };
        CallSite {
            line: symbol.lineno().unwrap_or(0),
            file,
            function,
            module,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for StackWalker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Attribution for StackWalker {
    fn attribute(&self, skip: usize) -> Result<CallSite, AttributionError> {
        self.walk(skip)
    }
}

/// `server-7f3a9c01d2e4b856` → `server`, `my-tool` → `my_tool`.
#[cfg(not(target_arch = "wasm32"))]
fn entry_module_name(stem: &str) -> String {
    let name = match stem.rsplit_once('-') {
        Some((name, hash))
            if !name.is_empty()
                && hash.len() == 16
                && hash.bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            name
        }
        _ => stem,
    };
    name.replace('-', "_")
}

/// The strategy used when none is configured.
pub(crate) fn default_attribution() -> std::sync::Arc<dyn Attribution> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::sync::Arc::new(StackWalker::new())
    }
    #[cfg(target_arch = "wasm32")]
    {
        std::sync::Arc::new(Unattributed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn module_path_is_leading_part() {
        assert_eq!(
            derive_module_id("app::db::pool::checkout", "src/db/pool.rs", "app_bin"),
            "app::db::pool"
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn entry_module_falls_back_to_directory() {
        assert_eq!(
            derive_module_id("demo::main", "/work/demo/src/main.rs", "demo"),
            "/work/demo/src"
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn unqualified_names_use_the_whole_name() {
        assert_eq!(derive_module_id("helper", "src/lib.rs", "demo"), "helper");
        assert_eq!(derive_module_id("demo", "src/main.rs", "demo"), "src");
        assert_eq!(derive_module_id("", "", "demo"), "demo");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn lossy_segments_are_preserved() {
        assert_eq!(
            derive_module_id("app::worker::run::{{closure}}", "src/worker.rs", "demo"),
            "app::worker::run"
        );
        assert_eq!(
            derive_module_id("<app::Thing as core::fmt::Display>::fmt", "src/thing.rs", "demo"),
            "<app::Thing as core::fmt::Display>"
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn unattributed_always_fails() {
        assert_eq!(
            Unattributed.attribute(0),
            Err(AttributionError::SymbolUnresolved)
        );
        assert!(CallSite::default().is_empty());
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn logger_frames_are_recognized() {
        for name in [
            "modlog::logger::Logger::info",
            "modlog::logger::Logger::dispatch",
            "<modlog::logger::Logger>::new_entry",
            "modlog::global_logger::debug",
            "<modlog::writer::LogWriter as std::io::Write>::write",
            "<modlog::writer::LogWriter<'_> as std::io::Write>::write",
            "<modlog::caller::StackWalker as modlog::caller::Attribution>::attribute",
        ] {
            assert!(is_logger_frame(name), "{name}");
        }
        for name in [
            "modlog::global_logger::tests::overridden::log_debug",
            "modlog::logger::tests::log_from_this_function",
            "modlog::logger::Logger::info::{{closure}}",
            "std::io::Write::write_all",
            "app::logger::Logger::info",
            "main",
            "",
        ] {
            assert!(!is_logger_frame(name), "{name}");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn entry_module_drops_cargo_hash() {
        assert_eq!(entry_module_name("module_thresholds-1a2b3c4d5e6f7a8b"), "module_thresholds");
        assert_eq!(entry_module_name("my-tool"), "my_tool");
        assert_eq!(entry_module_name("my-tool-0123456789abcdef"), "my_tool");
        assert_eq!(entry_module_name("server-v2"), "server_v2");
        assert_eq!(entry_module_name("-0123456789abcdef"), "_0123456789abcdef");
    }

    // black_box keeps these frames from becoming tail calls in optimized builds
    #[cfg(not(target_arch = "wasm32"))]
    #[inline(never)]
    fn attribute_from_here(walker: &StackWalker) -> Result<CallSite, AttributionError> {
        std::hint::black_box(walker.attribute(0))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[inline(never)]
    fn attribute_one_up(walker: &StackWalker) -> Result<CallSite, AttributionError> {
        std::hint::black_box(walker.attribute(1))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[inline(never)]
    fn call_attribute_one_up(walker: &StackWalker) -> Result<CallSite, AttributionError> {
        std::hint::black_box(attribute_one_up(walker))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn stack_walker_finds_direct_caller() {
        let walker = StackWalker::new().with_entry_module("not_this_crate");
        let site = attribute_from_here(&walker).expect("test binaries carry symbols");
        assert!(
            site.function.ends_with("attribute_from_here"),
            "unexpected function {:?}",
            site.function
        );
        assert!(site.module.ends_with("caller::tests"), "{:?}", site.module);
        if cfg!(debug_assertions) {
            assert!(site.file.ends_with("caller.rs"), "{:?}", site.file);
            assert!(site.line > 0);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn stack_walker_skips_further_up() {
        let walker = StackWalker::new();
        let site = call_attribute_one_up(&walker).expect("test binaries carry symbols");
        assert!(
            site.function.ends_with("call_attribute_one_up"),
            "unexpected function {:?}",
            site.function
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn stack_walker_reports_exhausted_stack() {
        let walker = StackWalker::new();
        assert_eq!(
            walker.attribute(100_000),
            Err(AttributionError::FrameUnavailable { skip: 100_000 })
        );
    }
}
