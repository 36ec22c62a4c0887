//! Core error types for the quark framework.
//!
//! This module provides the error enum [`QuarkError`] covering registration
//! failures (malformed procedure names, ambiguous routes), request errors,
//! configuration errors, serialization errors, and the explicit early-exit
//! [`QuarkError::Halt`] outcome that procedures return to short-circuit
//! normal response writing.
//!
//! Note that "no route found" is deliberately absent: dispatch reports a miss
//! as `None`, never as an error.

use std::fmt;

use thiserror::Error;

/// Raised when a procedure name cannot be compiled into a path pattern.
///
/// The most common cause is an arity mismatch between the lower-case
/// (variable) tokens of the name and the declared scalar parameters.
///
/// # Examples
///
/// ```
/// use quark_core::error::NameFormatError;
///
/// let err = NameFormatError::new("Vehicle_vin", "name has 1 path variables but 0 parameters are declared");
/// assert_eq!(err.name, "Vehicle_vin");
/// assert!(err.to_string().contains("Vehicle_vin"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFormatError {
    /// The procedure name as it was handed to the compiler.
    pub name: String,
    /// Human-readable description of what is wrong with the name.
    pub reason: String,
}

impl NameFormatError {
    /// Creates a new `NameFormatError` for the given procedure name.
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for NameFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "procedure '{}': {}", self.name, self.reason)
    }
}

impl std::error::Error for NameFormatError {}

/// The primary error type for the quark framework.
///
/// Each variant maps to an HTTP status code via [`QuarkError::status_code`].
#[derive(Error, Debug)]
pub enum QuarkError {
    // ── HTTP errors ──────────────────────────────────────────────────

    /// HTTP 400 Bad Request (e.g. a path variable that does not parse).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// HTTP 404 Not Found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 410 Gone. Returned when no registered procedure matches a path.
    #[error("Gone: {0}")]
    Gone(String),

    /// HTTP 500 Internal Server Error.
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    /// An early, successful-or-not termination requested by a procedure.
    ///
    /// The status and body are written to the client verbatim.
    #[error("Halted with status {status}")]
    Halt {
        /// The HTTP status code to respond with.
        status: u16,
        /// The already-encoded response body.
        body: Vec<u8>,
    },

    // ── Registration ─────────────────────────────────────────────────

    /// A procedure name does not agree with its declared parameters.
    #[error("Name format error: {0}")]
    NameFormat(#[from] NameFormatError),

    /// Two procedures compiled to the same path and verb.
    #[error("Ambiguous route: {path} is registered twice for verb '{verb}'")]
    AmbiguousRoute {
        /// The compiled path pattern.
        path: String,
        /// The verb, or an empty string for "any verb".
        verb: String,
    },

    /// A service definition is invalid (empty or duplicate name, etc.).
    #[error("Invalid service: {0}")]
    InvalidService(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl QuarkError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `BadRequest`, `SerializationError` -> 400
    /// - `NotFound` -> 404
    /// - `Gone` -> 410
    /// - `Halt` -> its own status
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) | Self::SerializationError(_) => 400,
            Self::NotFound(_) => 404,
            Self::Gone(_) => 410,
            Self::Halt { status, .. } => *status,
            Self::InternalServerError(_)
            | Self::NameFormat(_)
            | Self::AmbiguousRoute { .. }
            | Self::InvalidService(_)
            | Self::ConfigurationError(_)
            | Self::IoError(_) => 500,
        }
    }

    /// Returns `true` if this error is a [`QuarkError::Halt`].
    pub const fn is_halt(&self) -> bool {
        matches!(self, Self::Halt { .. })
    }
}

/// A convenience type alias for `Result<T, QuarkError>`.
pub type QuarkResult<T> = Result<T, QuarkError>;
