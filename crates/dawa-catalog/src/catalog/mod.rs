//! Product catalog module.
//!
//! Contains types for products, categories, and the validated catalog store.

mod category;
mod product;
mod store;

pub use category::Category;
pub use product::{Availability, Product, ProductBadge};
pub use store::Catalog;
