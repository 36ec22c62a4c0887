//! HTTP response type.
//!
//! [`HttpResponse`] is what procedures return. It converts into an axum
//! response via [`IntoResponse`], and [`HttpResponse::from_error`] renders
//! any [`QuarkError`], including the verbatim status and body of a halt.

use axum::response::IntoResponse;
use http::{HeaderMap, HeaderValue, StatusCode};

use quark_core::QuarkError;

/// An HTTP response.
///
/// # Examples
///
/// ```
/// use quark_http::HttpResponse;
///
/// let response = HttpResponse::ok("Hello, World!");
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(response.body(), b"Hello, World!");
/// ```
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with the given status and body and no content type.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            content_type: None,
            body: body.into(),
        }
    }

    /// Creates a 200 OK plain-text response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, body).with_content_type("text/plain; charset=utf-8")
    }

    /// Creates a 200 OK response from already-encoded bytes.
    pub fn json_bytes(body: Vec<u8>, content_type: &str) -> Self {
        Self::new(StatusCode::OK, body).with_content_type(content_type)
    }

    /// Creates a 200 OK response with an empty body.
    pub fn empty() -> Self {
        Self::new(StatusCode::OK, Vec::new())
    }

    /// Renders an error.
    ///
    /// A [`QuarkError::Halt`] writes its status and body verbatim; every other
    /// error writes its [`status_code`](QuarkError::status_code) and message.
    pub fn from_error(error: &QuarkError) -> Self {
        match error {
            QuarkError::Halt { status, body } => {
                let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                Self::new(status, body.clone())
            }
            other => {
                let status =
                    StatusCode::from_u16(other.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                Self::new(status, other.to_string()).with_content_type("text/plain; charset=utf-8")
            }
        }
    }

    /// Replaces the status code.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Sets the `Content-Type`.
    #[must_use]
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: http::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns the status code.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the extra headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the content type, if set.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();
        // The tuple impl sets application/octet-stream for Vec<u8>.
        headers.remove(http::header::CONTENT_TYPE);
        if let Some(ct) = self
            .content_type
            .as_deref()
            .and_then(|ct| HeaderValue::from_str(ct).ok())
        {
            headers.insert(http::header::CONTENT_TYPE, ct);
        }
        for (key, value) in &self.headers {
            headers.insert(key, value.clone());
        }
        response
    }
}

impl From<QuarkError> for HttpResponse {
    fn from(error: QuarkError) -> Self {
        Self::from_error(&error)
    }
}
