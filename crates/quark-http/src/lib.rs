//! # quark-http
//!
//! HTTP layer for the quark framework. Procedures are described by a name and
//! an ordered list of scalar parameter kinds; the name alone decides the URL
//! path (`GET_Vehicle_groupId_vin` serves `GET /vehicle/{i}/{s}`). This crate
//! compiles those names, indexes them in a trie, dispatches concrete request
//! paths back to procedures, and provides the per-request context handlers
//! work with.
//!
//! ## Modules
//!
//! - [`trie`] - Generic string-keyed prefix tree
//! - [`urls`] - Pattern compiler, segment classifier, route table, dispatcher
//! - [`procedure`] - Procedure descriptors and verb prefixes
//! - [`binder`] - Typed path-argument binding
//! - [`codec`] - Pluggable body encoding
//! - [`querydict`] - Multi-value query-string dictionary
//! - [`request`] - The request type handlers see
//! - [`response`] - The response type handlers return
//! - [`console`] - Per-invocation handler context
//! - [`service`] - A named group of compiled procedures
//! - [`registry`] - Immutable registry snapshots and the process-wide handle

use std::future::Future;
use std::pin::Pin;

pub mod binder;
pub mod codec;
pub mod console;
pub mod procedure;
pub mod querydict;
pub mod registry;
pub mod request;
pub mod response;
pub mod service;
pub mod trie;
pub mod urls;

pub use binder::{PathArgs, PathValue};
pub use codec::{Codec, JsonCodec, PrettyJsonCodec};
pub use console::Console;
pub use procedure::{CompiledProcedure, Handler, Procedure};
pub use querydict::QueryDict;
pub use registry::{Dispatch, Quark, Registry};
pub use request::QuarkRequest;
pub use response::HttpResponse;
pub use service::Service;
pub use urls::kind::ParamKind;

/// The boxed future every procedure handler resolves to.
pub type BoxFuture = Pin<Box<dyn Future<Output = quark_core::QuarkResult<HttpResponse>> + Send>>;
