//! The key/value table shared by the parser, merger and writers.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// A mapping of property keys to values.
///
/// Keys are unique and a later insert silently replaces the earlier value.
/// Iteration is in ordinal key order, so every rendering of a table is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTable {
    entries: BTreeMap<String, String>,
}

impl PropertyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in ordinal key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Apply every entry of `other` on top of this table.
    ///
    /// Same-named keys take the value from `other`; keys only present here
    /// are kept.
    pub fn overlay(&mut self, other: PropertyTable) {
        self.entries.extend(other.entries);
    }
}

/// Borrowing iterator over `(key, value)` pairs.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a PropertyTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for PropertyTable {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = PropertyTable::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for PropertyTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
