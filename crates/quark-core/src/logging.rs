//! Logging integration for the quark framework.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-request spans.

use crate::settings::Settings;

/// Directives appended in debug mode unless `log_level` already names a
/// quark crate, so route registration and dispatch misses are visible.
const DEBUG_DIRECTIVES: &str = "quark_http=debug,quark_server=debug";

/// Sets up the global tracing subscriber based on the given settings.
///
/// `RUST_LOG` wins when set. Otherwise the filter comes from
/// `settings.log_level` (e.g. "warn", "quark_http=trace,info"), widened for
/// quark's own crates in debug mode. Debug mode prints pretty output with
/// span timings; otherwise each event is a JSON line carrying its request
/// span.
///
/// Installing a subscriber twice is a no-op, so tests and embedders may call
/// this freely.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(settings)))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    if settings.debug {
        builder
            .pretty()
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .ok();
    } else {
        builder.json().with_current_span(true).try_init().ok();
    }
}

fn filter_directives(settings: &Settings) -> String {
    let level = match settings.log_level.trim() {
        "" => "info",
        level => level,
    };
    if settings.debug && !level.contains("quark_") {
        format!("{level},{DEBUG_DIRECTIVES}")
    } else {
        level.to_string()
    }
}

/// Creates a tracing span for one dispatched request.
///
/// # Examples
///
/// ```
/// use quark_core::logging::request_span;
///
/// let span = request_span("GET", "/vehicle/42");
/// let _guard = span.enter();
/// tracing::info!("handling request");
/// ```
pub fn request_span(method: &str, path: &str) -> tracing::Span {
    tracing::info_span!("request", method = method, path = path)
}
