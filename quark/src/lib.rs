//! # quark
//!
//! Convention-routed HTTP procedures. A procedure named
//! `GET_Vehicle_groupId_vin` with an integer and a string parameter serves
//! `GET /vehicle/{i}/{s}`; the name is the route.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `quark` for the whole framework, or on the individual
//! crates for finer-grained control.
//!
//! ```no_run
//! use quark::prelude::*;
//!
//! # async fn example() -> QuarkResult<()> {
//! QuarkApp::new(Settings::default())
//!     .service(
//!         "root",
//!         vec![Procedure::new("Hello_World", |console: Console| async move {
//!             console.json("hello")
//!         })],
//!     )?
//!     .run("127.0.0.1:11019")
//!     .await
//! # }
//! ```

/// Error types, settings, and logging setup.
pub use quark_core as core;

/// Routing, procedures, request and response types, and the registry.
pub use quark_http as http;

/// axum integration and the runnable server.
#[cfg(feature = "server")]
pub use quark_server as server;

// Third-party crates handlers commonly need.
pub use axum;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
pub use tracing_subscriber;

/// The types most applications touch.
pub mod prelude {
    pub use quark_core::logging::setup_logging;
    pub use quark_core::{QuarkError, QuarkResult, Settings};
    pub use quark_http::{Console, HttpResponse, ParamKind, PathValue, Procedure, Quark};

    #[cfg(feature = "server")]
    pub use quark_server::QuarkApp;
}
