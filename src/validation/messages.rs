//! Message Sets
//!
//! Ordered, deduplicated collections of validation messages.

use std::collections::HashSet;

/// A set of human-readable messages
///
/// Deduplicated by exact text. Iteration follows first insertion, so the
/// output of a validation run is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSet {
    messages: Vec<String>,
    seen: HashSet<String>,
}

impl MessageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message; returns `false` if identical text was already present
    pub fn insert(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        if self.seen.contains(&message) {
            return false;
        }
        self.seen.insert(message.clone());
        self.messages.push(message);
        true
    }

    /// Merge every message of `other` into this set
    pub fn merge(&mut self, other: MessageSet) {
        self.extend(other.messages);
    }

    pub fn contains(&self, message: &str) -> bool {
        self.seen.contains(message)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

impl Extend<String> for MessageSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for message in iter {
            self.insert(message);
        }
    }
}
