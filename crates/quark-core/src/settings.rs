//! Settings for the quark framework.
//!
//! [`Settings`] holds all process-level configuration. It is constructed once
//! during start-up (usually via [`settings_loader`](crate::settings_loader))
//! and handed by reference to the application builder; there is no global
//! mutable settings instance.

use serde::{Deserialize, Serialize};

/// The complete set of framework settings.
///
/// # Examples
///
/// ```
/// use quark_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.root_service, "root");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// The address the server binds to (e.g. "127.0.0.1:11019").
    pub bind_address: String,

    // ── Routing ──────────────────────────────────────────────────────

    /// Name of the fallback service tried with the full path when the
    /// leading segment does not select a service.
    pub root_service: String,
    /// Leading path segments stripped from every request before service
    /// selection (e.g. `["api", "v1"]`).
    pub path_prefix: Vec<String>,
    /// When set, two procedures compiling to the same path and verb fail
    /// registration instead of the later one silently winning.
    pub strict_routes: bool,

    // ── Requests ─────────────────────────────────────────────────────

    /// Maximum accepted request body size, in bytes.
    pub max_body_size: usize,
    /// Whether response bodies are pretty-printed JSON.
    pub pretty_json: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level / filter directive (e.g. "info", "quark_http=debug").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            bind_address: "127.0.0.1:11019".to_string(),
            root_service: "root".to_string(),
            path_prefix: Vec::new(),
            strict_routes: false,
            max_body_size: 2 * 1024 * 1024,
            pretty_json: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Returns the path prefix as a list of non-empty segments.
    ///
    /// Entries may be written either as single segments or as slash-joined
    /// paths, so `["api/v1"]` and `["api", "v1"]` are equivalent.
    pub fn prefix_segments(&self) -> Vec<String> {
        self.path_prefix
            .iter()
            .flat_map(|p| p.split('/'))
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}
