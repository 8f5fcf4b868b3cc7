//! Pharmacy catalog model and listing query pipeline for Dawa.
//!
//! This crate provides the types behind a bilingual (English/Arabic)
//! pharmacy storefront listing:
//!
//! - **Catalog**: Products, categories, and a validated single-currency store
//! - **Search**: Filter, sort and paginate pipeline with facets and labels
//! - **Money / Locale**: Minor-unit prices and `en`/`ar` text selection
//!
//! # Example
//!
//! ```rust,ignore
//! use dawa_catalog::prelude::*;
//!
//! let catalog = Catalog::load("catalog.json")?;
//!
//! let spec = catalog
//!     .new_query()
//!     .with_search("vitamin")
//!     .with_brand("Solgar")
//!     .with_sort(SortMode::PriceAsc);
//!
//! let results = catalog.query(&spec, Locale::En);
//! println!("{}", result_summary(&results.pagination, Locale::En));
//! ```

pub mod error;
pub mod ids;
pub mod locale;
pub mod money;

pub mod catalog;
pub mod search;

pub use error::CatalogError;
pub use ids::*;
pub use locale::{Locale, LocalizedText};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::locale::{Locale, LocalizedText};
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Availability, Catalog, Category, Product, ProductBadge};

    // Search
    pub use crate::search::{
        evaluate, evaluate_observed, heading, no_results, result_summary, Filter, ListingFacets,
        PageLink, Pagination, PriceBounds, PriceRange, QuerySpec, SearchResults, SortMode,
        Stage, StageObserver,
    };
}
