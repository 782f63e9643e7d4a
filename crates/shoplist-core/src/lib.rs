//! shoplist-core - Core library for shoplist
//!
//! This crate contains the item and category models, the in-memory
//! shopping-list store, and the export/share helpers used by the CLI.

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod share;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{CategoryName, CategorySet, Draft, Item, ItemId};
pub use share::{ShareError, ShareSheet};
pub use store::{ShoppingListStore, StoreEvent, SubscriptionId};
