//! Category Model

use serde::{Deserialize, Serialize};

use super::Product;

/// Append-only, deduplicated category names in insertion order
///
/// Stored as a single configuration record (`{categories: [..]}`), not per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw names, dropping blanks and later duplicates
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.push(name);
        }
        set
    }

    /// Append a trimmed name; returns false when blank or already present
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for CategorySet {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.names
    }
}

impl<'a> IntoIterator for &'a CategorySet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Derived `{category, items}` group, computed from products, never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<Product>,
}
