//! Query parameter sets.

use std::collections::BTreeMap;

use serde::Serialize;

/// A multi-valued set of query parameters.
///
/// Keys are kept sorted so that [`encode`](QueryParams::encode) is
/// deterministic; values for one key keep the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams {
    entries: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string (without the leading `?`).
    ///
    /// `+` decodes to a space and percent escapes are resolved.
    pub fn parse(raw: &str) -> Self {
        url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect()
    }

    /// Append `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Replace every value of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), vec![value.into()]);
        self
    }

    /// First value of `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Remove `key` and return its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded`, sorted by key.
    ///
    /// Uses the WHATWG form encoding: `*` is kept and `~` becomes `%7E`.
    /// Both forms decode to the same value.
    ///
    /// An empty set encodes to an empty string.
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.entries {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_encodes_to_nothing() {
        assert_eq!(QueryParams::new().encode(), "");
    }

    #[test]
    fn encode_sorts_keys_and_keeps_value_order() {
        let mut q = QueryParams::new();
        q.add("page", "2").add("filter", "b").add("filter", "a");
        assert_eq!(q.encode(), "filter=b&filter=a&page=2");
    }

    #[test]
    fn encode_escapes_values() {
        let mut q = QueryParams::new();
        q.add("token", "1 2 3");
        assert_eq!(q.encode(), "token=1+2+3");

        let mut q = QueryParams::new();
        q.add("next", "/a?b=c&d");
        assert_eq!(q.encode(), "next=%2Fa%3Fb%3Dc%26d");
    }

    #[test]
    fn encode_follows_form_urlencoding_for_star_and_tilde() {
        let mut q = QueryParams::new();
        q.add("glob", "a*b~c");
        assert_eq!(q.encode(), "glob=a*b%7Ec");
    }

    #[test]
    fn set_replaces_values() {
        let mut q: QueryParams = [("page", "1"), ("page", "2")].into_iter().collect();
        assert_eq!(q.get_all("page"), ["1", "2"]);
        q.set("page", "3");
        assert_eq!(q.get("page"), Some("3"));
        assert_eq!(q.get_all("page").len(), 1);
    }

    #[test]
    fn parse_decodes_raw_query() {
        let q = QueryParams::parse("test=123&name=a+b&name=c%20d&flag");
        assert_eq!(q.get("test"), Some("123"));
        assert_eq!(q.get_all("name"), ["a b", "c d"]);
        assert_eq!(q.get("flag"), Some(""));
        assert!(q.get_all("missing").is_empty());
    }

    #[test]
    fn remove_drops_key() {
        let mut q = QueryParams::parse("a=1&b=2");
        assert_eq!(q.remove("a"), Some(vec!["1".to_string()]));
        assert!(!q.contains_key("a"));
        assert_eq!(q.encode(), "b=2");
    }
}
