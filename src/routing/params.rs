//! Multi-valued parameter map.
//!
//! Holds placeholder captures (`:name` keys) and query-string parameters.
//! Every key maps to an ordered list of values; adding to an existing key
//! appends rather than replaces.

use std::collections::BTreeMap;
use std::str::Utf8Error;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use url::form_urlencoded;

/// Ordered multi-map from parameter key to its values.
///
/// Values under one key keep insertion order. Keys are kept sorted so that
/// encoding and debug output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params {
    inner: BTreeMap<String, Vec<String>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.add(key, value);
        }
        params
    }

    /// Append `value` to the values stored under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values stored under `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Append every value of `other` after the values already present.
    pub fn merge(&mut self, other: Params) {
        for (key, values) in other.inner {
            self.inner.entry(key).or_default().extend(values);
        }
    }

    /// Percent-decode every value once. Keys are kept as they are.
    ///
    /// Fails if a decoded value is not valid UTF-8.
    pub fn percent_decoded(&self) -> Result<Params, Utf8Error> {
        let mut decoded = Params::new();
        for (key, values) in &self.inner {
            for value in values {
                decoded.add(key.as_str(), percent_decode_str(value).decode_utf8()?);
            }
        }
        Ok(decoded)
    }

    /// Encode as a query string, keys in sorted order.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.inner {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.add(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_accumulate_in_order() {
        let mut params = Params::new();
        params.add(":name", "bar");
        params.add(":name", "123");

        assert_eq!(params.len(), 1);
        assert_eq!(params.get(":name"), Some("bar"));
        assert_eq!(params.get_all(":name"), ["bar", "123"]);
    }

    #[test]
    fn test_percent_decoded() {
        let captures: Params = [(":name", "J%C3%BCrgen%20X"), (":id", "a+b%2Fc")]
            .into_iter()
            .collect();
        let decoded = captures.percent_decoded().unwrap();

        assert_eq!(decoded.get(":name"), Some("Jürgen X"));
        assert_eq!(decoded.get(":id"), Some("a+b/c"));
    }

    #[test]
    fn test_percent_decoded_decodes_once() {
        let captures: Params = [(":name", "100%2541")].into_iter().collect();
        assert_eq!(captures.percent_decoded().unwrap().get(":name"), Some("100%41"));
    }

    #[test]
    fn test_percent_decoded_rejects_invalid_utf8() {
        let captures: Params = [(":name", "%FF")].into_iter().collect();
        assert!(captures.percent_decoded().is_err());
    }

    #[test]
    fn test_missing_key() {
        let params = Params::new();
        assert_eq!(params.get("nope"), None);
        assert!(params.get_all("nope").is_empty());
        assert!(!params.contains_key("nope"));
    }

    #[test]
    fn test_from_query() {
        let params = Params::from_query("a=b&a=c&space=x+y&pct=%3Aid");
        assert_eq!(params.get_all("a"), ["b", "c"]);
        assert_eq!(params.get("space"), Some("x y"));
        assert_eq!(params.get("pct"), Some(":id"));
    }

    #[test]
    fn test_merge_keeps_existing_values_first() {
        let mut captures: Params = [(":name", "keith")].into_iter().collect();
        captures.merge(Params::from_query(":name=other&a=b"));

        assert_eq!(captures.get_all(":name"), ["keith", "other"]);
        assert_eq!(captures.get("a"), Some("b"));
    }

    #[test]
    fn test_encode_escapes_colon() {
        let params: Params = [(":id", "1 2"), (":id", "3")].into_iter().collect();
        assert_eq!(params.encode(), "%3Aid=1+2&%3Aid=3");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(Params::new().encode(), "");
    }
}
