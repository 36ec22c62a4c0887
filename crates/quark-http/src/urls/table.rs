//! Per-service route table.
//!
//! A [`RouteTable`] stores compiled patterns in a [`Trie`] keyed by path
//! segment: literal segments, `{i}`/`{f}`/`{s}` wildcards, and one final
//! synthetic verb segment (`":GET"`, `":POST"`, ... or `":"` for any verb).
//! The value of a verb leaf is the index of the procedure in the owning
//! service.
//!
//! Tables are built once and then only read. Concurrent publication is the
//! job of [`Quark`](crate::registry::Quark), which builds a fresh table off to
//! the side and swaps it in atomically.

use http::Method;

use super::compiler::pattern_segments;
use super::dispatcher;
use crate::trie::Trie;

/// Trie key of the leaf matching any verb.
pub const ANY_VERB_KEY: &str = ":";

/// Returns the trie key of the verb leaf for `verb` (`None` meaning any verb).
pub fn verb_key(verb: Option<&Method>) -> String {
    verb.map_or_else(|| ANY_VERB_KEY.to_string(), |m| format!(":{}", m.as_str()))
}

/// A trie of compiled patterns with a verb-keyed leaf layer.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use quark_http::urls::table::RouteTable;
///
/// let mut table = RouteTable::new();
/// table.register("/vehicle/{i}", Some(&Method::GET), 0);
/// table.register("/vehicle/{s}", None, 1);
///
/// assert_eq!(table.route(&["vehicle", "42"], &Method::GET), Some(0));
/// assert_eq!(table.route(&["vehicle", "abc"], &Method::DELETE), Some(1));
/// assert_eq!(table.route(&["vehicle", "42", "x"], &Method::GET), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    trie: Trie,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `pattern` for `verb` (`None` meaning any verb).
    ///
    /// An existing entry at the identical full path is overwritten; its
    /// previous value is returned so the caller can decide whether that is an
    /// error.
    pub fn register(&mut self, pattern: &str, verb: Option<&Method>, value: usize) -> Option<usize> {
        let key = verb_key(verb);
        let mut path = pattern_segments(pattern);
        path.push(key.as_str());
        self.trie.insert(&path, value)
    }

    /// Walks `segments` literally, without wildcard matching or backtracking.
    ///
    /// Useful for checking that a sub-path exists; request dispatch goes
    /// through [`RouteTable::route`] instead.
    pub fn find<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Trie> {
        self.trie.find(segments)
    }

    /// Dispatches a concrete request path and verb to a registered value.
    ///
    /// See [`dispatcher::route`] for the matching rules.
    pub fn route<S: AsRef<str>>(&self, segments: &[S], verb: &Method) -> Option<usize> {
        dispatcher::route(&self.trie, segments, verb)
    }

    /// Returns the underlying trie.
    pub const fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Lists every registered leaf as `("vehicle/{i}/:GET", value)`, sorted
    /// by path.
    pub fn entries(&self) -> Vec<(String, usize)> {
        self.trie.to_map().into_iter().collect()
    }
}
