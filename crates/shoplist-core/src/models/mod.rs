//! Data models for shoplist

mod category;
mod draft;
mod item;

pub use category::{CategoryName, CategorySet, DEFAULT_CATEGORIES, DEFAULT_CATEGORY};
pub use draft::Draft;
pub use item::{Item, ItemId};
