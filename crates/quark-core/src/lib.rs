//! # quark-core
//!
//! Core types, settings, and error types for the quark framework.
//! This crate has zero framework dependencies and provides the foundation for all other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Framework settings
//! - [`settings_loader`] - Loading settings from TOML
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{NameFormatError, QuarkError, QuarkResult};
pub use settings::Settings;
