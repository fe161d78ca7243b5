//! Toggleable set of allowed values for one filter dimension.

use serde::{Deserialize, Serialize};

/// Values selected for a single filter dimension, in the order they were
/// selected. An empty selection places no restriction on the dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection<T> {
    values: Vec<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` if absent, removes it if present. Returns whether the
    /// value is selected afterwards.
    pub fn toggle(&mut self, value: T) -> bool {
        if let Some(pos) = self.values.iter().position(|v| *v == value) {
            self.values.remove(pos);
            false
        } else {
            self.values.push(value);
            true
        }
    }

    /// Selects `value` without toggling it off when already present.
    pub fn insert(&mut self, value: T) {
        if !self.contains(&value) {
            self.values.push(value);
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    /// True when the selection is empty or `value` is one of the selected values.
    pub fn admits(&self, value: &T) -> bool {
        self.admits_by(|v| v == value)
    }

    /// True when the selection is empty or any selected value satisfies `matches`.
    pub fn admits_by(&self, matches: impl Fn(&T) -> bool) -> bool {
        self.values.is_empty() || self.values.iter().any(matches)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: PartialEq> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for value in iter {
            selection.insert(value);
        }
        selection
    }
}
