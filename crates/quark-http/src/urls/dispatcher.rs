//! Backtracking dispatch over a route trie.
//!
//! For each request segment the candidates are tried in a fixed order:
//!
//! 1. the literal text of the segment,
//! 2. `{i}`, if the segment could be an integer,
//! 3. `{f}`, if the segment could be a float,
//! 4. `{s}`, always.
//!
//! The first candidate whose subtree consumes the whole path wins; remaining
//! candidates at that level are not explored. Only then is the verb leaf
//! looked up on that node, first for the request verb and then for "any
//! verb". A miss there is a miss for the whole request, even if another
//! branch would have had the verb. The fixed candidate order keeps the
//! result independent of trie iteration order.
//!
//! Request text that spells a reserved trie key (`{i}`, `{f}`, `{s}`, or
//! anything starting with `:`) is never matched as a literal.
//!
//! Worst case the search branches four ways per segment; in practice literal
//! matches dominate and it stays close to linear.

use http::Method;

use super::classifier::classify;
use super::kind::ParamKind;
use super::table::{verb_key, ANY_VERB_KEY};
use crate::trie::Trie;

/// Finds the value registered for `segments` and `verb` under `root`.
///
/// Returns `None` when no registered pattern matches; a miss is a normal
/// outcome, not an error.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use quark_http::trie::Trie;
/// use quark_http::urls::dispatcher::route;
///
/// let mut trie = Trie::new();
/// trie.insert(&["vehicle", "{i}", ":GET"], 0);
/// trie.insert(&["vehicle", "{s}", ":GET"], 1);
///
/// assert_eq!(route(&trie, &["vehicle", "42"], &Method::GET), Some(0));
/// assert_eq!(route(&trie, &["vehicle", "4.2"], &Method::GET), Some(1));
/// assert_eq!(route(&trie, &["vehicle", "42"], &Method::POST), None);
/// ```
pub fn route<S: AsRef<str>>(root: &Trie, segments: &[S], verb: &Method) -> Option<usize> {
    let node = search(root, segments)?;
    leaf_value(node, &verb_key(Some(verb)))
}

/// Returns the first node, in candidate order, that consumes all of
/// `segments`.
fn search<'t, S: AsRef<str>>(node: &'t Trie, segments: &[S]) -> Option<&'t Trie> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(node);
    };
    let head = head.as_ref();

    let literal = if is_reserved_key(head) {
        None
    } else {
        node.child(head).and_then(|child| search(child, rest))
    };

    literal.or_else(|| {
        classify(head)
            .iter()
            .find_map(|kind| node.child(kind.wildcard()).and_then(|child| search(child, rest)))
    })
}

fn is_reserved_key(segment: &str) -> bool {
    segment.starts_with(':') || ParamKind::ALL.iter().any(|kind| kind.wildcard() == segment)
}

/// Looks up the verb-specific leaf, falling back to the any-verb leaf.
///
/// A leaf without a value never counts as a match.
fn leaf_value(node: &Trie, verb_key: &str) -> Option<usize> {
    node.child(verb_key)
        .and_then(Trie::value)
        .or_else(|| node.child(ANY_VERB_KEY).and_then(Trie::value))
}
