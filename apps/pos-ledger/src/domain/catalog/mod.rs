//! Menu Catalog Bounded Context
//!
//! The set of purchasable items with their price and picture.

pub mod menu_item;
pub mod repository;

pub use menu_item::{MenuItem, NewMenuItem};
pub use repository::MenuCatalogRepository;
