//! A prefix tree keyed by string segments.
//!
//! [`Trie`] maps sequences of segments to an index into some external,
//! append-only items array (for routing, the procedure list of a service).
//! It distinguishes three outcomes for a lookup:
//!
//! - the path does not exist (`find` returns `None`),
//! - the path exists only as an intermediate prefix (`value()` is `None`),
//! - the path terminates a registered entry (`value()` is `Some`).
//!
//! Nodes are created lazily on insertion and are never removed.

use std::collections::BTreeMap;

/// One node of a segment trie.
///
/// # Examples
///
/// ```
/// use quark_http::trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert(&["hello", "world", "mary"], 1);
///
/// let prefix = trie.find(&["hello", "world"]).unwrap();
/// assert_eq!(prefix.value(), None);
/// assert_eq!(trie.find(&["hello", "world", "mary"]).unwrap().value(), Some(1));
/// assert!(trie.find(&["hello", "there"]).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trie {
    value: Option<usize>,
    children: BTreeMap<String, Trie>,
}

impl Trie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` at the end of `path`, creating intermediate nodes as
    /// needed.
    ///
    /// Returns the value previously stored at exactly this path, if any. The
    /// new value always replaces the old one.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], value: usize) -> Option<usize> {
        let mut node = self;
        for segment in path {
            node = node
                .children
                .entry(segment.as_ref().to_string())
                .or_default();
        }
        node.value.replace(value)
    }

    /// Returns the direct child stored under `key`.
    pub fn child(&self, key: &str) -> Option<&Self> {
        self.children.get(key)
    }

    /// Walks `path` from this node without backtracking.
    ///
    /// Returns `None` as soon as a segment is missing. An empty path returns
    /// this node.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&Self> {
        path.iter()
            .try_fold(self, |node, segment| node.child(segment.as_ref()))
    }

    /// Returns the value bound to this node, if it terminates an entry.
    pub const fn value(&self) -> Option<usize> {
        self.value
    }

    /// Returns `true` if this node terminates an entry.
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Returns `true` if this node has neither a value nor children.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Returns the keys of the direct children, sorted.
    pub fn keys(&self) -> Vec<&str> {
        self.children.keys().map(String::as_str).collect()
    }

    /// Visits every node that carries a value, depth first with children in
    /// key order.
    ///
    /// The callback receives the full path to the node and the node itself;
    /// returning `false` stops the traversal.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&[&str], &Self) -> bool,
    {
        let mut prefix = Vec::new();
        self.traverse_inner(&mut prefix, &mut visit);
    }

    fn traverse_inner<'a, F>(&'a self, prefix: &mut Vec<&'a str>, visit: &mut F) -> bool
    where
        F: FnMut(&[&str], &Self) -> bool,
    {
        if self.has_value() && !visit(prefix.as_slice(), self) {
            return false;
        }
        for (key, child) in &self.children {
            prefix.push(key);
            let keep_going = child.traverse_inner(prefix, visit);
            prefix.pop();
            if !keep_going {
                return false;
            }
        }
        true
    }

    /// Flattens the trie into `"a/b/c" -> value` pairs.
    pub fn to_map(&self) -> BTreeMap<String, usize> {
        let mut map = BTreeMap::new();
        self.traverse(|path, node| {
            if let Some(value) = node.value() {
                map.insert(path.join("/"), value);
            }
            true
        });
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_find() {
        let mut trie = Trie::new();
        trie.insert(&["hello", "world", "mary", "tony"], 1);
        trie.insert(&["hello", "world", "mary", "bob"], 2);

        assert_eq!(
            trie.find(&["hello", "world", "mary", "tony"]).and_then(Trie::value),
            Some(1)
        );
        assert_eq!(
            trie.find(&["hello", "world", "mary", "bob"]).and_then(Trie::value),
            Some(2)
        );
    }

    #[test]
    fn test_find_distinguishes_prefix_from_missing() {
        let mut trie = Trie::new();
        trie.insert(&["a", "b"], 7);

        let prefix = trie.find(&["a"]).unwrap();
        assert!(!prefix.has_value());
        assert!(trie.find(&["a", "c"]).is_none());
        assert!(trie.find(&["b"]).is_none());
    }

    #[test]
    fn test_find_empty_path_is_self() {
        let mut trie = Trie::new();
        trie.insert(&["y"], 1);
        trie.insert(&["x"], 0);
        let root = trie.find::<&str>(&[]).unwrap();
        assert_eq!(root.keys(), vec!["x", "y"]);
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut trie = Trie::new();
        assert_eq!(trie.insert(&["a"], 1), None);
        assert_eq!(trie.insert(&["a"], 2), Some(1));
        assert_eq!(trie.find(&["a"]).and_then(Trie::value), Some(2));
    }

    #[test]
    fn test_insert_intermediate_value_keeps_children() {
        let mut trie = Trie::new();
        trie.insert(&["a", "b"], 1);
        trie.insert(&["a"], 2);
        assert_eq!(trie.find(&["a"]).and_then(Trie::value), Some(2));
        assert_eq!(trie.find(&["a", "b"]).and_then(Trie::value), Some(1));
    }

    #[test]
    fn test_insert_owned_segments() {
        let mut trie = Trie::new();
        let path = vec!["x".to_string(), "y".to_string()];
        trie.insert(&path, 3);
        assert_eq!(trie.find(&path).and_then(Trie::value), Some(3));
    }

    #[test]
    fn test_to_map() {
        let mut trie = Trie::new();
        trie.insert(&["hello", "world", "mary", "tony"], 1);
        trie.insert(&["hello", "world", "mary", "bob"], 2);
        trie.insert(&["hello"], 3);

        let map = trie.to_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["hello/world/mary/tony"], 1);
        assert_eq!(map["hello/world/mary/bob"], 2);
        assert_eq!(map["hello"], 3);
    }

    #[test]
    fn test_traverse_is_ordered_and_stoppable() {
        let mut trie = Trie::new();
        trie.insert(&["b"], 2);
        trie.insert(&["a"], 1);
        trie.insert(&["c"], 3);

        let mut seen = Vec::new();
        trie.traverse(|path, node| {
            seen.push((path.join("/"), node.value().unwrap()));
            seen.len() < 2
        });
        assert_eq!(seen, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_is_empty() {
        let mut trie = Trie::new();
        assert!(trie.is_empty());
        trie.insert(&["a"], 0);
        assert!(!trie.is_empty());
        assert!(!trie.find(&["a"]).unwrap().is_empty());
    }

    #[test]
    fn test_rebuild_is_structurally_equal() {
        let build = || {
            let mut trie = Trie::new();
            trie.insert(&["vehicle", "{i}", ":GET"], 0);
            trie.insert(&["vehicle", "{s}", ":GET"], 1);
            trie
        };
        let mut twice = build();
        twice.insert(&["vehicle", "{i}", ":GET"], 0);
        twice.insert(&["vehicle", "{s}", ":GET"], 1);
        assert_eq!(build(), twice);
    }
}
