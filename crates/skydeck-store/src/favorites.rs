//! Favorite cities.
//!
//! Entries are display strings of the form `"<city>, <country code>"`, kept
//! in insertion order and unique under exact string equality. Two distinct
//! places sharing both name and country collapse into one entry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<String>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a stored list, dropping duplicates but keeping first positions.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut favorites = Self::new();
        for entry in entries {
            favorites.add(entry);
        }
        favorites
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.0.iter().any(|e| e == entry)
    }

    /// Append `entry` unless already present. Returns true if the list changed.
    pub fn add(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if self.contains(&entry) {
            return false;
        }
        self.0.push(entry);
        true
    }

    /// Remove `entry` if present. Returns true if the list changed.
    pub fn remove(&mut self, entry: &str) -> bool {
        match self.0.iter().position(|e| e == entry) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    /// Add or remove `entry`. Returns true if it is a favorite afterwards.
    pub fn toggle(&mut self, entry: &str) -> bool {
        if self.remove(entry) {
            false
        } else {
            self.add(entry)
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// City part of a favorite entry, used to search for it again.
pub fn city_query(entry: &str) -> &str {
    entry.split(',').next().unwrap_or(entry).trim()
}
