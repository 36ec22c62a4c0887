//! The request type handlers see.
//!
//! [`QuarkRequest`] carries the method, path, query dictionary, headers, and
//! the already-read body of an incoming request. It is built from axum
//! request parts by [`QuarkRequest::from_parts`], or with
//! [`QuarkRequest::builder`] in tests.

use http::{HeaderMap, Method};

use crate::querydict::QueryDict;

/// An incoming HTTP request.
///
/// # Examples
///
/// ```
/// use quark_http::QuarkRequest;
///
/// let request = QuarkRequest::builder()
///     .method(http::Method::GET)
///     .path("/vehicle/17/WVW%201")
///     .query_string("verbose=1")
///     .build();
///
/// assert_eq!(request.segments(), vec!["vehicle", "17", "WVW 1"]);
/// assert_eq!(request.query().get("verbose"), Some("1"));
/// ```
#[derive(Debug, Clone)]
pub struct QuarkRequest {
    method: Method,
    path: String,
    query_string: String,
    query: QueryDict,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl QuarkRequest {
    /// Creates a new [`QuarkRequestBuilder`].
    pub fn builder() -> QuarkRequestBuilder {
        QuarkRequestBuilder::default()
    }

    /// Creates a request from axum request parts and the body bytes.
    pub fn from_parts(parts: http::request::Parts, body: Vec<u8>) -> Self {
        let query_string = parts.uri.query().unwrap_or("").to_string();
        Self {
            query: QueryDict::parse(&query_string),
            method: parts.method,
            path: parts.uri.path().to_string(),
            query_string,
            headers: parts.headers,
            body,
        }
    }

    /// Returns the HTTP method.
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the raw request path, without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path split into percent-decoded segments.
    ///
    /// Exactly one leading `/` is removed before splitting, so `/` yields a
    /// single empty segment and `/a/` yields `["a", ""]`.
    pub fn segments(&self) -> Vec<String> {
        split_path(&self.path)
    }

    /// Returns the raw query string (without the leading `?`).
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Returns the parsed query parameters.
    pub const fn query(&self) -> &QueryDict {
        &self.query
    }

    /// Returns the request headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the request body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Splits a URL path into percent-decoded segments.
///
/// # Examples
///
/// ```
/// use quark_http::request::split_path;
///
/// assert_eq!(split_path("/hello/world"), vec!["hello", "world"]);
/// assert_eq!(split_path("/a%2Fb"), vec!["a/b"]);
/// ```
pub fn split_path(path: &str) -> Vec<String> {
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .map(|segment| {
            percent_encoding::percent_decode_str(segment)
                .decode_utf8_lossy()
                .into_owned()
        })
        .collect()
}

/// A builder for [`QuarkRequest`].
#[derive(Debug)]
pub struct QuarkRequestBuilder {
    method: Method,
    path: String,
    query_string: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Default for QuarkRequestBuilder {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query_string: String::new(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }
}

impl QuarkRequestBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Sets the query string (without leading `?`).
    #[must_use]
    pub fn query_string(mut self, qs: &str) -> Self {
        self.query_string = qs.to_string();
        self
    }

    /// Adds a header. Invalid names or values are ignored.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::header::HeaderName::from_bytes(name.as_bytes()),
            http::header::HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the [`QuarkRequest`].
    pub fn build(self) -> QuarkRequest {
        QuarkRequest {
            query: QueryDict::parse(&self.query_string),
            method: self.method,
            path: self.path,
            query_string: self.query_string,
            headers: self.headers,
            body: self.body,
        }
    }
}
