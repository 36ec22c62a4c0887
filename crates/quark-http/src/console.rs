//! Per-invocation handler context.
//!
//! Every handler receives a [`Console`] holding the request, the bound path
//! arguments, and the codec of the owning [`Quark`](crate::registry::Quark).
//! The helpers cover the common handler moves: decode the body, encode a
//! response, or stop early with a halt.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use quark_core::{QuarkError, QuarkResult};

use crate::binder::PathArgs;
use crate::codec::{self, Codec};
use crate::request::QuarkRequest;
use crate::response::HttpResponse;

/// The context passed to a procedure handler.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use quark_http::{Console, JsonCodec, PathArgs, QuarkRequest};
///
/// let console = Console::new(QuarkRequest::builder().build(), PathArgs::default(), Arc::new(JsonCodec));
/// let response = console.json(&vec![1, 2, 3]).unwrap();
/// assert_eq!(response.body(), b"[1,2,3]");
///
/// let halt = console.halt(403, &"no entry");
/// assert!(halt.is_halt());
/// ```
#[derive(Clone)]
pub struct Console {
    request: QuarkRequest,
    args: PathArgs,
    codec: Arc<dyn Codec>,
}

impl Console {
    /// Creates a console for one invocation.
    pub fn new(request: QuarkRequest, args: PathArgs, codec: Arc<dyn Codec>) -> Self {
        Self { request, args, codec }
    }

    /// Returns the request.
    pub const fn request(&self) -> &QuarkRequest {
        &self.request
    }

    /// Returns the bound path arguments.
    pub const fn args(&self) -> &PathArgs {
        &self.args
    }

    /// Returns the codec.
    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// Returns the raw request body.
    pub fn body(&self) -> &[u8] {
        self.request.body()
    }

    /// Decodes the request body.
    ///
    /// An empty body yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`QuarkError::SerializationError`] (400) if the body is
    /// malformed.
    pub fn json_body<T: DeserializeOwned + Default>(&self) -> QuarkResult<T> {
        if self.body().is_empty() {
            return Ok(T::default());
        }
        codec::decode(self.codec(), self.body())
    }

    /// Encodes `value` into a 200 response.
    ///
    /// # Errors
    ///
    /// Returns [`QuarkError::InternalServerError`] if the value cannot be
    /// encoded.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> QuarkResult<HttpResponse> {
        let body = codec::encode(self.codec(), value)?;
        Ok(HttpResponse::json_bytes(body, self.codec.content_type()))
    }

    /// Builds a halt that responds with `status` and the encoded `payload`.
    ///
    /// Return it as the handler's error: `return Err(console.halt(404, &msg))`.
    /// If the payload cannot be encoded the result is a 500 instead.
    pub fn halt<T: Serialize + ?Sized>(&self, status: u16, payload: &T) -> QuarkError {
        match codec::encode(self.codec(), payload) {
            Ok(body) => QuarkError::Halt { status, body },
            Err(e) => e,
        }
    }

    /// Builds a halt with an empty body.
    pub const fn halt_empty(status: u16) -> QuarkError {
        QuarkError::Halt {
            status,
            body: Vec::new(),
        }
    }

    /// Builds a halt whose body is the text of `error`.
    pub fn halt_error(status: u16, error: impl fmt::Display) -> QuarkError {
        QuarkError::Halt {
            status,
            body: error.to_string().into_bytes(),
        }
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("method", self.request.method())
            .field("path", &self.request.path())
            .field("args", &self.args)
            .field("codec", &self.codec)
            .finish()
    }
}
