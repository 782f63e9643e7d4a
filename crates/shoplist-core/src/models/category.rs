//! Category model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::util::non_empty_trimmed;

/// Category every new draft starts with.
pub const DEFAULT_CATEGORY: &str = "General";

/// Categories a fresh store is seeded with, in display order.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["General", "Vegetables", "Dairy", "Electronics"];

/// A validated category label: trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Validate a raw label. Surrounding whitespace is dropped.
    pub fn new(raw: &str) -> Result<Self> {
        non_empty_trimmed(raw)
            .map(|name| Self(name.to_string()))
            .ok_or(Error::EmptyCategoryName)
    }

    /// The built-in default category
    #[must_use]
    pub fn general() -> Self {
        Self(DEFAULT_CATEGORY.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

/// Ordered set of unique category labels.
///
/// Membership is an exact, case-sensitive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    names: Vec<CategoryName>,
}

impl CategorySet {
    /// An empty set with no seeded categories
    #[must_use]
    pub const fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Build a set from seed labels, rejecting empty or repeated entries.
    pub fn from_seeds<I, S>(seeds: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        for seed in seeds {
            set.insert(seed.as_ref())?;
        }
        Ok(set)
    }

    /// Append a new category.
    ///
    /// Fails with `EmptyCategoryName` or `DuplicateCategoryName` and leaves
    /// the set untouched.
    pub fn insert(&mut self, raw: &str) -> Result<&CategoryName> {
        let name = CategoryName::new(raw)?;
        if self.contains(name.as_str()) {
            return Err(Error::DuplicateCategoryName(name.0));
        }
        self.names.push(name);
        Ok(&self.names[self.names.len() - 1])
    }

    /// Insert at the front unless already present.
    pub(crate) fn ensure_first(&mut self, name: CategoryName) {
        if !self.contains(name.as_str()) {
            self.names.insert(0, name);
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing.as_str() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryName> {
        self.names.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Labels as plain strings, in insertion order
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().map(ToString::to_string).collect()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            names: DEFAULT_CATEGORIES
                .iter()
                .map(|name| CategoryName((*name).to_string()))
                .collect(),
        }
    }
}
