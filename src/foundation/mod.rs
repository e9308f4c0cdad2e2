//! Shared value types, errors, math helpers, configuration and logging setup.

/// Process configuration (JSON file + environment overrides).
pub mod config;
/// Canvas and color value types.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Tracing subscriber setup.
pub mod logging;
pub(crate) mod math;
