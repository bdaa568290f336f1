//! Flat key/value query strings for list endpoints.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use url::form_urlencoded;

/// Ordered query parameters, encoded as `application/x-www-form-urlencoded`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_owned(), value.to_string()));
        self
    }

    /// Append `key=value` only when `value` is present.
    #[must_use]
    pub fn with_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish()
    }

    /// `path` with `?query` appended, or `path` unchanged when empty.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{}", self.encode())
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { pairs: iter.into_iter().map(|(k, v)| (k.into(), v.to_string())).collect() }
    }
}

/// Percent-encode one path segment, so an id containing `/`, `?` or `#`
/// cannot change the route.
#[must_use]
pub fn path_segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect::<String>().replace('+', "%20")
}
