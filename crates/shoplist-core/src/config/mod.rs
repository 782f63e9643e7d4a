//! Store configuration.
//!
//! `StoreConfig` seeds a `ShoppingListStore`: which categories exist up
//! front, which one a fresh draft points at, and how items filed under a
//! category outside the set are treated.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{CategoryName, CategorySet, DEFAULT_CATEGORIES, DEFAULT_CATEGORY};

/// What `add_item` does when the draft category is not in the category set.
///
/// The category text field accepts free-form input, so a user can type a
/// label and add an item without ever pressing "Add" for the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnregisteredCategoryPolicy {
    /// Keep the label on the item and log a warning
    #[default]
    Accept,
    /// Add the label to the category set, then create the item
    Register,
    /// Refuse with `Error::UnregisteredCategory`
    Reject,
}

/// Seed configuration for a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default)]
    pub unregistered_category: UnregisteredCategoryPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            default_category: default_category(),
            unregistered_category: UnregisteredCategoryPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Validate the seeds and build the category set.
    ///
    /// Returns the set together with the validated default category, which
    /// is inserted first when the seeds do not already contain it.
    pub fn build_categories(&self) -> Result<(CategorySet, CategoryName)> {
        let default = CategoryName::new(&self.default_category).map_err(|_| {
            Error::InvalidConfig("default_category must not be empty".to_string())
        })?;

        let mut set = CategorySet::from_seeds(&self.categories).map_err(|error| match error {
            Error::EmptyCategoryName => {
                Error::InvalidConfig("categories must not contain empty names".to_string())
            }
            Error::DuplicateCategoryName(name) => {
                Error::InvalidConfig(format!("category '{name}' is listed more than once"))
            }
            other => other,
        })?;
        set.ensure_first(default.clone());

        Ok((set, default))
    }
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|name| (*name).to_string()).collect()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}
