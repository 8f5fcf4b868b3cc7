//! Listing filter stages.

use std::collections::BTreeSet;

use crate::catalog::Product;
use crate::ids::CategoryId;
use crate::locale::Locale;
use crate::search::{PriceRange, Stage};
use serde::{Deserialize, Serialize};

/// One predicate of the listing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Lowercased needle matched against the localized name and brand.
    Search(String),
    /// Exact category.
    Category(CategoryId),
    /// Localized brand is one of these.
    Brands(BTreeSet<String>),
    /// Effective price inside the range.
    Price(PriceRange),
    /// Prescription requirement equals the value.
    Prescription(bool),
    /// Product has an offer price.
    OffersOnly,
}

impl Filter {
    /// Create a search filter. The term is lowercased once here.
    pub fn search(term: &str) -> Self {
        Filter::Search(term.to_lowercase())
    }

    /// Pipeline stage this filter runs as.
    pub fn stage(&self) -> Stage {
        match self {
            Filter::Search(_) => Stage::Search,
            Filter::Category(_) => Stage::Category,
            Filter::Brands(_) => Stage::Brand,
            Filter::Price(_) => Stage::Price,
            Filter::Prescription(_) => Stage::Prescription,
            Filter::OffersOnly => Stage::Offers,
        }
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product, locale: Locale) -> bool {
        match self {
            Filter::Search(needle) => {
                needle.is_empty()
                    || product
                        .localized_name(locale)
                        .to_lowercase()
                        .contains(needle.as_str())
                    || product
                        .localized_brand(locale)
                        .to_lowercase()
                        .contains(needle.as_str())
            }
            Filter::Category(category) => &product.category == category,
            Filter::Brands(brands) => {
                brands.is_empty() || brands.contains(product.localized_brand(locale))
            }
            Filter::Price(range) => range.contains(&product.effective_price()),
            Filter::Prescription(required) => product.prescription_required == *required,
            Filter::OffersOnly => product.has_offer(),
        }
    }
}
