//! Ordered URL parameter store.
//!
//! # Design Decisions
//! - Backed by a `Vec`; routes carry few parameters, so a linear scan beats
//!   hashing
//! - Lookups return the first entry for a key
//! - `add` may leave duplicate keys; `set` collapses them to one entry
//! - `get` cannot tell an absent key from an empty value; use `iter` when the
//!   difference matters

use std::fmt;

/// A single matched path variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// Ordered key/value list of URL parameters.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Params {
    entries: Vec<Param>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, even if the key already exists.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Param {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Returns the value of the first parameter named `key`, or `""`.
    pub fn get(&self, key: &str) -> &str {
        self.entries
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
            .unwrap_or("")
    }

    /// Overwrite the first parameter named `key` in place, or append it.
    /// Later entries with the same key are removed, leaving exactly one.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let Some(idx) = self.entries.iter().position(|p| p.key == key) else {
            self.add(key, value);
            return;
        };
        self.entries[idx].value = value.into();

        let mut seen = 0;
        self.entries.retain(|p| {
            if p.key != key {
                return true;
            }
            seen += 1;
            seen == 1
        });
    }

    /// Remove the first parameter named `key` and return its value, or `""`.
    pub fn del(&mut self, key: &str) -> String {
        match self.entries.iter().position(|p| p.key == key) {
            Some(idx) => self.entries.remove(idx).value,
            None => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocated slots, kept across [`Params::clear`].
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Truncate to zero entries, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.value.as_str())
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
