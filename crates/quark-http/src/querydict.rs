//! Query string dictionary for request parameters.
//!
//! [`QueryDict`] keeps every value of a repeated key. The typed accessors
//! [`get_int`](QueryDict::get_int) and [`get_float`](QueryDict::get_float)
//! mirror the integer, number, and string query parameter types a procedure
//! may read.

use std::collections::BTreeMap;

use quark_core::{QuarkError, QuarkResult};

/// An immutable, multi-value dictionary parsed from a query string.
///
/// # Examples
///
/// ```
/// use quark_http::QueryDict;
///
/// let qd = QueryDict::parse("color=red&color=blue&page=2");
/// assert_eq!(qd.get("color"), Some("blue"));
/// assert_eq!(qd.get_list("color"), &["red".to_string(), "blue".to_string()]);
/// assert_eq!(qd.get_int("page").unwrap(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDict {
    data: BTreeMap<String, Vec<String>>,
}

impl QueryDict {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URL query string (`key1=val1&key2=val2`).
    ///
    /// Keys and values are percent-decoded and `+` is read as a space.
    /// A pair without `=` has an empty value.
    pub fn parse(query_string: &str) -> Self {
        let mut data: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for pair in query_string.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            data.entry(percent_decode(key))
                .or_default()
                .push(percent_decode(value));
        }
        Self { data }
    }

    /// Returns the last value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Returns every value for `key`, in query order.
    pub fn get_list(&self, key: &str) -> &[String] {
        self.data.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the last value for `key` parsed as a base-10 signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`QuarkError::BadRequest`] if the value is present but does not
    /// parse.
    pub fn get_int(&self, key: &str) -> QuarkResult<Option<i64>> {
        self.get(key)
            .map(|raw| {
                raw.parse().map_err(|e| {
                    QuarkError::BadRequest(format!("query parameter '{key}': invalid integer '{raw}': {e}"))
                })
            })
            .transpose()
    }

    /// Returns the last value for `key` parsed as a float.
    ///
    /// # Errors
    ///
    /// Returns [`QuarkError::BadRequest`] if the value is present but does not
    /// parse.
    pub fn get_float(&self, key: &str) -> QuarkResult<Option<f64>> {
        self.get(key)
            .map(|raw| {
                raw.parse().map_err(|e| {
                    QuarkError::BadRequest(format!("query parameter '{key}': invalid number '{raw}': {e}"))
                })
            })
            .transpose()
    }

    /// Encodes the dictionary back into a query string, keys sorted.
    pub fn urlencode(&self) -> String {
        self.data
            .iter()
            .flat_map(|(key, values)| {
                values
                    .iter()
                    .map(move |value| format!("{}={}", percent_encode(key), percent_encode(value)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Iterates the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

fn percent_decode(input: &str) -> String {
    let plus_decoded = input.replace('+', " ");
    percent_encoding::percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn percent_encode(input: &str) -> String {
    percent_encoding::utf8_percent_encode(input, percent_encoding::NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_string() {
        let qd = QueryDict::parse("");
        assert!(qd.is_empty());
        assert_eq!(qd.get("a"), None);
        assert!(qd.get_list("a").is_empty());
    }

    #[test]
    fn test_parse_multiple_values() {
        let qd = QueryDict::parse("color=red&color=blue&color=green");
        assert_eq!(qd.get("color"), Some("green"));
        assert_eq!(qd.get_list("color").len(), 3);
        assert_eq!(qd.len(), 1);
    }

    #[test]
    fn test_parse_percent_and_plus() {
        let qd = QueryDict::parse("name=hello+world&city=S%C3%A3o%20Paulo");
        assert_eq!(qd.get("name"), Some("hello world"));
        assert_eq!(qd.get("city"), Some("São Paulo"));
    }

    #[test]
    fn test_key_without_value() {
        let qd = QueryDict::parse("flag&x=1&&");
        assert_eq!(qd.get("flag"), Some(""));
        assert!(qd.contains_key("x"));
        assert_eq!(qd.keys().collect::<Vec<_>>(), vec!["flag", "x"]);
    }

    #[test]
    fn test_typed_accessors() {
        let qd = QueryDict::parse("page=3&ratio=0.5&name=abc");
        assert_eq!(qd.get_int("page").unwrap(), Some(3));
        assert_eq!(qd.get_float("ratio").unwrap(), Some(0.5));
        assert_eq!(qd.get_int("missing").unwrap(), None);
        assert_eq!(qd.get_int("name").unwrap_err().status_code(), 400);
        assert!(qd.get_float("name").is_err());
    }

    #[test]
    fn test_urlencode() {
        let qd = QueryDict::parse("b=2&a=hello+world&b=1");
        assert_eq!(qd.urlencode(), "a=hello%20world&b=2&b=1");
    }
}
