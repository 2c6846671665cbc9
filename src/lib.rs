//! Scrollbars - custom scrollbars for natively scrolling views
//!
//! Re-exports the host-agnostic widget from `scrollbars_core` and adds a
//! versioned configuration file and, on WASM, the browser embedding.

pub mod config;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use config::{CONFIG_VERSION, ConfigError, ConfigFile, LogLevel};
pub use scrollbars_core::*;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
