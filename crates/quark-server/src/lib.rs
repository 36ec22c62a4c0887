//! # quark-server
//!
//! axum/tower integration for the quark framework: [`QuarkApp`] turns
//! registered services into a router, and [`handler`] holds the request
//! pipeline (body read, namespace dispatch, path binding, halt handling).

pub mod handler;
pub mod server;

pub use server::QuarkApp;
