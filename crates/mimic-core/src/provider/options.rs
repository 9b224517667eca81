use serde::{Deserialize, Serialize};

/// An ordered set of `(key, label)` options.
///
/// Keys behave like map keys: re-adding an existing key replaces its label
/// in place without moving it. Order is otherwise insertion order, which is
/// what generated output and CLI listings rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    entries: Vec<(String, String)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, L, I>(pairs: I) -> Self
    where
        K: Into<String>,
        L: Into<String>,
        I: IntoIterator<Item = (K, L)>,
    {
        let mut set = Self::new();
        for (key, label) in pairs {
            set.add(key, label);
        }
        set
    }

    /// Add an option, replacing the label in place if the key exists.
    pub fn add(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((key, label)),
        }
    }

    /// Merge another set in, overriding labels for keys present in both.
    pub fn extend<K, L, I>(&mut self, pairs: I)
    where
        K: Into<String>,
        L: Into<String>,
        I: IntoIterator<Item = (K, L)>,
    {
        for (key, label) in pairs {
            self.add(key, label);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, label)| (k.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, L: Into<String>> FromIterator<(K, L)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (K, L)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
