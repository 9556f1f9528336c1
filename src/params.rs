//! Named values extracted from a matched path.

/// Parameters captured by a pattern match, in capture order.
///
/// A name may be bound more than once by a single pattern (`/:id/x/:id`);
/// later values append rather than overwrite. [`Params::get`] returns the
/// first binding, [`Params::get_all`] every binding.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding for `name`.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// First value bound to `name`.
    ///
    /// For a route `/users/:id`, `get("id")` on `/users/42` returns `Some("42")`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value bound to `name`, in capture order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Params;

    #[test]
    fn repeated_names_append() {
        let params: Params = [("id", "1"), ("name", "x"), ("id", "2")].into_iter().collect();

        assert_eq!(params.len(), 3);
        assert_eq!(params.get("id"), Some("1"));
        assert_eq!(params.get_all("id").collect::<Vec<_>>(), ["1", "2"]);
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn iter_keeps_capture_order() {
        let mut params = Params::new();
        params.push("b", "2");
        params.push("a", "1");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, [("b", "2"), ("a", "1")]);
    }
}
