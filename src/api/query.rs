//! Query string access with "last value wins" semantics for repeated keys.

use std::borrow::Cow;

#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let pairs = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v): (Cow<'_, str>, Cow<'_, str>)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// `true` if `key` appears at all, with or without a value.
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Value of the last occurrence of `key`.
    pub fn last(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value_wins() {
        let q = QueryParams::parse("url=https%3A%2F%2Fa.example.com&url=https%3A%2F%2Fb.example.com");
        assert_eq!(q.last("url"), Some("https://b.example.com"));
    }

    #[test]
    fn test_flag_without_value() {
        let q = QueryParams::parse("week&url=x");
        assert!(q.contains("week"));
        assert_eq!(q.last("week"), Some(""));
        assert!(!q.contains("month"));
        assert_eq!(q.last("month"), None);
    }

    #[test]
    fn test_plus_decodes_to_space() {
        let q = QueryParams::parse("expires_after=1+2");
        assert_eq!(q.last("expires_after"), Some("1 2"));
    }
}
