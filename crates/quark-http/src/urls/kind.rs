//! Scalar kinds of path variables.

use std::fmt;

/// The kind of a typed path variable.
///
/// The variants are declared in dispatch priority order: when a concrete
/// segment is compatible with several wildcards, integer is tried before
/// float, and float before string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKind {
    /// A base-10 signed 64-bit integer, wildcard `{i}`.
    Integer,
    /// A 64-bit float, wildcard `{f}`.
    Float,
    /// A free-form string, wildcard `{s}`.
    String,
}

impl ParamKind {
    /// All kinds, in dispatch priority order.
    pub const ALL: [Self; 3] = [Self::Integer, Self::Float, Self::String];

    /// Returns the one-letter tag used in slot names (`i`, `f`, `s`).
    pub const fn tag(self) -> char {
        match self {
            Self::Integer => 'i',
            Self::Float => 'f',
            Self::String => 's',
        }
    }

    /// Returns the trie key used for this kind's wildcard segment.
    pub const fn wildcard(self) -> &'static str {
        match self {
            Self::Integer => "{i}",
            Self::Float => "{f}",
            Self::String => "{s}",
        }
    }

    /// Returns the documentation type name (`integer`, `number`, `string`).
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "number",
            Self::String => "string",
        }
    }

    /// Parses a one-letter tag back into a kind.
    pub const fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'i' => Some(Self::Integer),
            'f' => Some(Self::Float),
            's' => Some(Self::String),
            _ => None,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
