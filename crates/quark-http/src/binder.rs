//! Typed path-argument binding.
//!
//! After dispatch picks a procedure, [`bind`] reads the segments at each
//! slot position and parses them according to the slot's kind. The
//! dispatcher only guarantees that a segment *looks* compatible (`99999999999999999999`
//! passes as an integer candidate), so overflow and similar parse failures
//! surface here as `400 Bad Request`.

use std::fmt;

use quark_core::{QuarkError, QuarkResult};

use crate::urls::compiler::PatternSlot;
use crate::urls::kind::ParamKind;

/// One bound path argument.
#[derive(Debug, Clone, PartialEq)]
pub enum PathValue {
    /// From an `{i}` slot.
    Int(i64),
    /// From an `{f}` slot.
    Float(f64),
    /// From an `{s}` slot, verbatim.
    Str(String),
}

impl PathValue {
    /// Returns the kind this value was bound as.
    pub const fn kind(&self) -> ParamKind {
        match self {
            Self::Int(_) => ParamKind::Integer,
            Self::Float(_) => ParamKind::Float,
            Self::Str(_) => ParamKind::String,
        }
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

/// The bound path arguments of one invocation, in slot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathArgs {
    values: Vec<(String, PathValue)>,
}

impl PathArgs {
    /// Returns the value bound to the variable `name` (`group_id`, without
    /// the kind tag).
    pub fn get(&self, name: &str) -> Option<&PathValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns the value at `index`.
    pub fn value(&self, index: usize) -> Option<&PathValue> {
        self.values.get(index).map(|(_, v)| v)
    }

    /// Returns the integer at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`QuarkError::InternalServerError`] if there is no integer at
    /// `index`; this is a mismatch between the handler and its declaration.
    pub fn int(&self, index: usize) -> QuarkResult<i64> {
        match self.value(index) {
            Some(PathValue::Int(v)) => Ok(*v),
            other => Err(mismatch(index, ParamKind::Integer, other)),
        }
    }

    /// Returns the float at `index`.
    ///
    /// # Errors
    ///
    /// See [`PathArgs::int`].
    pub fn float(&self, index: usize) -> QuarkResult<f64> {
        match self.value(index) {
            Some(PathValue::Float(v)) => Ok(*v),
            other => Err(mismatch(index, ParamKind::Float, other)),
        }
    }

    /// Returns the string at `index`.
    ///
    /// # Errors
    ///
    /// See [`PathArgs::int`].
    pub fn str(&self, index: usize) -> QuarkResult<&str> {
        match self.value(index) {
            Some(PathValue::Str(v)) => Ok(v),
            other => Err(mismatch(index, ParamKind::String, other)),
        }
    }

    /// Returns the number of bound arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no arguments were bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(name, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

fn mismatch(index: usize, wanted: ParamKind, found: Option<&PathValue>) -> QuarkError {
    let found = found.map_or("nothing", |v| v.kind().type_name());
    QuarkError::InternalServerError(format!(
        "path argument {index} is {found}, handler asked for {wanted}"
    ))
}

/// Parses the segments at each slot position into typed values.
///
/// # Errors
///
/// Returns [`QuarkError::BadRequest`] if a segment does not parse as its
/// slot's kind, or if a slot points past the end of `segments`.
///
/// # Examples
///
/// ```
/// use quark_http::binder::{bind, PathValue};
/// use quark_http::urls::compiler::compile;
/// use quark_http::urls::kind::ParamKind;
///
/// let pattern = compile("Vehicle_groupId_vin", &[ParamKind::Integer, ParamKind::String]).unwrap();
/// let args = bind(&pattern.slots, &["vehicle", "17", "WVW1"]).unwrap();
/// assert_eq!(args.get("group_id"), Some(&PathValue::Int(17)));
/// assert_eq!(args.str(1).unwrap(), "WVW1");
/// ```
pub fn bind<S: AsRef<str>>(slots: &[PatternSlot], segments: &[S]) -> QuarkResult<PathArgs> {
    let mut values = Vec::with_capacity(slots.len());
    for slot in slots {
        let raw = segments
            .get(slot.position)
            .map(|s| s.as_ref())
            .ok_or_else(|| {
                QuarkError::BadRequest(format!("missing path segment for '{}'", slot.var_name()))
            })?;
        let value = match slot.kind {
            ParamKind::Integer => raw.parse::<i64>().map(PathValue::Int).map_err(|e| {
                QuarkError::BadRequest(format!("invalid integer '{raw}' for '{}': {e}", slot.var_name()))
            })?,
            ParamKind::Float => raw.parse::<f64>().map(PathValue::Float).map_err(|e| {
                QuarkError::BadRequest(format!("invalid number '{raw}' for '{}': {e}", slot.var_name()))
            })?,
            ParamKind::String => PathValue::Str(raw.to_string()),
        };
        values.push((slot.var_name().to_string(), value));
    }
    Ok(PathArgs { values })
}
