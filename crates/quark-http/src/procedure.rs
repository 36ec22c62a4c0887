//! Procedure descriptors.
//!
//! A [`Procedure`] is the registration-time description of one handler: its
//! name (which doubles as its route), the ordered kinds of its scalar path
//! parameters, whether it takes a request body, and the async function that
//! serves it. [`Procedure::compile`] turns it into a [`CompiledProcedure`],
//! which carries the path pattern, typed slots, and pinned verb.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use http::Method;
use quark_core::{NameFormatError, QuarkResult};

use crate::console::Console;
use crate::response::HttpResponse;
use crate::urls::compiler::{compile, CompiledPattern, PatternSlot};
use crate::urls::kind::ParamKind;
use crate::BoxFuture;

/// Name prefixes that pin a procedure to one HTTP verb.
pub const VERB_PREFIXES: [&str; 7] = ["GET", "POST", "PATCH", "DELETE", "PUT", "OPTIONS", "HEAD"];

/// A type-erased procedure handler.
pub type Handler = Arc<dyn Fn(Console) -> BoxFuture + Send + Sync>;

/// Splits a leading verb token off a procedure name.
///
/// Only the token before the first `_` is considered, and only the verbs in
/// [`VERB_PREFIXES`] are recognized. Without a recognized prefix the full name
/// is returned and the procedure serves any verb.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use quark_http::procedure::split_verb;
///
/// assert_eq!(split_verb("GET_Vehicle_vin"), (Some(Method::GET), "Vehicle_vin"));
/// assert_eq!(split_verb("Hello_World"), (None, "Hello_World"));
/// assert_eq!(split_verb("Get_Vehicle"), (None, "Get_Vehicle"));
/// ```
pub fn split_verb(name: &str) -> (Option<Method>, &str) {
    if let Some((head, rest)) = name.split_once('_') {
        if VERB_PREFIXES.contains(&head) {
            if let Ok(method) = Method::from_bytes(head.as_bytes()) {
                return (Some(method), rest);
            }
        }
    }
    (None, name)
}

/// The registration-time description of a procedure.
///
/// # Examples
///
/// ```
/// use quark_http::{Console, HttpResponse, ParamKind, Procedure};
///
/// let proc = Procedure::new("GET_Vehicle_groupId_vin", |console: Console| async move {
///     let group = console.args().int(0)?;
///     let vin = console.args().str(1)?.to_string();
///     console.json(&(group, vin))
/// })
/// .param(ParamKind::Integer)
/// .param(ParamKind::String);
///
/// let compiled = proc.compile().unwrap();
/// assert_eq!(compiled.path(), "/vehicle/{i}/{s}");
/// assert_eq!(compiled.doc_path(), "/vehicle/{group_id}/{vin}");
/// ```
#[derive(Clone)]
pub struct Procedure {
    name: String,
    params: Vec<ParamKind>,
    accepts_body: bool,
    handler: Handler,
}

impl Procedure {
    /// Creates a descriptor for `name` served by `handler`.
    pub fn new<F, Fut>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Console) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = QuarkResult<HttpResponse>> + Send + 'static,
    {
        Self {
            name: name.into(),
            params: Vec::new(),
            accepts_body: false,
            handler: Arc::new(move |console| Box::pin(handler(console))),
        }
    }

    /// Declares the next scalar path parameter.
    #[must_use]
    pub fn param(mut self, kind: ParamKind) -> Self {
        self.params.push(kind);
        self
    }

    /// Declares several scalar path parameters at once.
    #[must_use]
    pub fn params(mut self, kinds: &[ParamKind]) -> Self {
        self.params.extend_from_slice(kinds);
        self
    }

    /// Declares that the procedure decodes a request body.
    #[must_use]
    pub const fn with_body(mut self) -> Self {
        self.accepts_body = true;
        self
    }

    /// Returns the full procedure name, verb prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared scalar parameter kinds.
    pub fn param_kinds(&self) -> &[ParamKind] {
        &self.params
    }

    /// Returns `true` if the procedure decodes a request body.
    pub const fn accepts_body(&self) -> bool {
        self.accepts_body
    }

    /// Compiles the name into a path pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`NameFormatError`] if the name (after the verb prefix) has an
    /// empty token or disagrees with the declared parameters.
    pub fn compile(self) -> Result<CompiledProcedure, NameFormatError> {
        let (verb, rest) = split_verb(&self.name);
        let pattern = compile(rest, &self.params).map_err(|e| NameFormatError::new(&self.name, e.reason))?;
        Ok(CompiledProcedure {
            verb,
            pattern,
            procedure: self,
        })
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("accepts_body", &self.accepts_body)
            .finish_non_exhaustive()
    }
}

/// A procedure whose name has been compiled into a route.
#[derive(Clone)]
pub struct CompiledProcedure {
    procedure: Procedure,
    verb: Option<Method>,
    pattern: CompiledPattern,
}

impl CompiledProcedure {
    /// Returns the full procedure name.
    pub fn name(&self) -> &str {
        self.procedure.name()
    }

    /// Returns the path pattern, e.g. `/vehicle/{i}/{s}`.
    pub fn path(&self) -> &str {
        &self.pattern.path
    }

    /// Returns the compiled pattern.
    pub const fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Returns the typed path slots in token order.
    pub fn slots(&self) -> &[PatternSlot] {
        &self.pattern.slots
    }

    /// Returns the pinned verb, or `None` if any verb is served.
    pub const fn verb(&self) -> Option<&Method> {
        self.verb.as_ref()
    }

    /// Returns `true` if the procedure decodes a request body.
    pub const fn accepts_body(&self) -> bool {
        self.procedure.accepts_body()
    }

    /// Returns the documentation path, e.g. `/vehicle/{group_id}/{vin}`.
    pub fn doc_path(&self) -> String {
        self.pattern.doc_path()
    }

    /// Returns the verb to document.
    ///
    /// The pinned verb if there is one, otherwise `POST` for procedures that
    /// take a body and `GET` for the rest.
    pub fn doc_method(&self) -> Method {
        match &self.verb {
            Some(verb) => verb.clone(),
            None if self.accepts_body() => Method::POST,
            None => Method::GET,
        }
    }

    /// Runs the handler.
    pub fn invoke(&self, console: Console) -> BoxFuture {
        (self.procedure.handler)(console)
    }
}

impl fmt::Debug for CompiledProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledProcedure")
            .field("name", &self.name())
            .field("verb", &self.verb)
            .field("path", &self.pattern.path)
            .finish_non_exhaustive()
    }
}
