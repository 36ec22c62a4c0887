//! HTTP server integration for quark.
//!
//! This module provides [`QuarkApp`], the application builder that combines
//! settings and registered services into an axum router or a running server.
//!
//! # Examples
//!
//! ```no_run
//! use quark_core::Settings;
//! use quark_http::{Console, ParamKind, Procedure};
//! use quark_server::QuarkApp;
//!
//! # async fn example() -> Result<(), quark_core::QuarkError> {
//! let app = QuarkApp::new(Settings::default()).service(
//!     "root",
//!     vec![Procedure::new("GET_Vehicle_id", |console: Console| async move {
//!         let id = console.args().int(0)?;
//!         console.json(&id)
//!     })
//!     .param(ParamKind::Integer)],
//! )?;
//!
//! app.run("127.0.0.1:11019").await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use axum::extract::Request;
use axum::routing::any;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use quark_core::{QuarkError, QuarkResult, Settings};
use quark_http::{Procedure, Quark};

use crate::handler;

/// The main application type.
pub struct QuarkApp {
    quark: Arc<Quark>,
    settings: Settings,
}

impl QuarkApp {
    /// Creates an application with no services.
    pub fn new(settings: Settings) -> Self {
        Self {
            quark: Arc::new(Quark::new(&settings)),
            settings,
        }
    }

    /// Registers a service.
    ///
    /// # Errors
    ///
    /// Returns the registration error; see
    /// [`Quark::register_service`].
    pub fn service(self, name: &str, procedures: Vec<Procedure>) -> QuarkResult<Self> {
        self.quark.register_service(name, procedures)?;
        Ok(self)
    }

    /// Returns the shared registry handle.
    ///
    /// Services registered through a clone of it after the router is built
    /// are served from the next request on.
    pub const fn quark(&self) -> &Arc<Quark> {
        &self.quark
    }

    /// Returns a reference to the application settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Lists every registered route as `(service, route leaf, procedure name)`.
    pub fn routes(&self) -> Vec<(String, String, String)> {
        let snapshot = self.quark.snapshot();
        snapshot
            .services()
            .flat_map(|service| {
                service.dump_paths().into_iter().map(move |(path, index)| {
                    let name = service
                        .procedure(index)
                        .map_or_else(String::new, |p| p.name().to_string());
                    (service.name().to_string(), path, name)
                })
            })
            .collect()
    }

    /// Converts the application into an axum router.
    ///
    /// Every path and verb goes through [`handler::handle`]. Panics inside
    /// a handler become 500 responses.
    pub fn into_axum_router(self) -> axum::Router {
        let quark = self.quark;
        let max_body_size = self.settings.max_body_size;

        let serve_request = move |req: Request| {
            let quark = Arc::clone(&quark);
            handler::handle(quark, max_body_size, req)
        };

        axum::Router::new()
            .route("/{*path}", any(serve_request.clone()))
            .route("/", any(serve_request))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CatchPanicLayer::new()),
            )
    }

    /// Binds `addr` and serves until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns [`QuarkError::ConfigurationError`] if the address cannot be
    /// bound, or an I/O error if serving fails.
    pub async fn run(self, addr: &str) -> QuarkResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| QuarkError::ConfigurationError(format!("Failed to bind to {addr}: {e}")))?;
        self.serve(listener).await
    }

    /// Serves on an already-bound listener until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if serving fails.
    pub async fn serve(self, listener: TcpListener) -> QuarkResult<()> {
        let addr = listener.local_addr()?;
        if self.settings.debug {
            tracing::info!("Starting development server at http://{addr}/");
        } else {
            tracing::info!(address = %addr, "HTTP server starting");
        }

        axum::serve(listener, self.into_axum_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

impl std::fmt::Debug for QuarkApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuarkApp")
            .field("quark", &self.quark)
            .field("debug", &self.settings.debug)
            .finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
