//! Engine-side header collection.
//!
//! # Responsibilities
//! - Carry request headers to the engine and response headers back
//! - Case-insensitive lookup (per HTTP spec)
//! - Preserve insertion order so responses are written deterministically
//!
//! # Design Decisions
//! - Names are lowercased on insert; `set` on an existing name replaces
//!   the value in place rather than re-appending
//! - Plain `Vec<(String, String)>` storage: header counts are small and
//!   a linear scan beats hashing at this size

/// An insertion-ordered, case-insensitive header collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    pairs: Vec<(String, String)>,
}

impl HeaderMap {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any existing value for the same name.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = name.as_ref().to_ascii_lowercase();
        let value = value.into();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    /// Look up a header by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterate headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of headers in the collection.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if the collection holds no headers.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.set(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_get() {
        let mut headers = HeaderMap::new();
        headers.set("Content-Type", "application/json");

        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(headers.get("x-missing"), None);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut headers = HeaderMap::new();
        headers.set("a", "1");
        headers.set("b", "2");
        headers.set("A", "3");

        let pairs: Vec<_> = headers.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let headers: HeaderMap = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let names: Vec<_> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }
}
