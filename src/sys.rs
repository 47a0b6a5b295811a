// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-specific wall-clock types.
//!
//! On native platforms these come from `std::time`, while on WASM they come
//! from `web_time`, since `std::time::SystemTime::now` panics there.
//!
//! [`SystemTime`] is re-exported at the crate root as the type of
//! [`Entry::time`](crate::Entry::time).

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
pub use web_time::{SystemTime, UNIX_EPOCH};
