//! Selection set: the practitioner's chosen symptoms or diseases
//!
//! Ordered, unique, exact-equality membership. Insertion order is the tag display order.

use serde::{Deserialize, Serialize};

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

impl Toggled {
    pub fn as_str(&self) -> &'static str {
        match self {
            Toggled::Added => "added",
            Toggled::Removed => "removed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    items: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `item` if present, otherwise append it at the end.
    ///
    /// Re-adding a removed item puts it last, not back at its old position.
    pub fn toggle(&mut self, item: &str) -> Toggled {
        match self.position(item) {
            Some(index) => {
                self.items.remove(index);
                Toggled::Removed
            }
            None => {
                self.items.push(item.to_string());
                Toggled::Added
            }
        }
    }

    /// Remove `item` (the tag chip's remove affordance). Returns false when absent.
    pub fn remove(&mut self, item: &str) -> bool {
        match self.position(item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, item: &str) -> bool {
        self.position(item).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    fn position(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|s| s == item)
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    /// Collect items, keeping only the first occurrence of each
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for item in iter {
            let item = item.into();
            if !set.contains(&item) {
                set.items.push(item);
            }
        }
        set
    }
}
