//! Filter-panel facets computed from a filtered product set.

use std::collections::HashMap;

use crate::catalog::Product;
use crate::locale::Locale;
use crate::money::{Currency, Money};
use crate::search::{PriceRange, QuerySpec};
use serde::{Deserialize, Serialize};

/// Lower edge of the default price range never rises above this (whole units).
const PRICE_FLOOR_UNITS: i64 = 0;
/// Upper edge of the default price range never drops below this (whole units).
const PRICE_CEILING_UNITS: i64 = 100;
/// Upper edge used when there are no products at all.
const EMPTY_CEILING_UNITS: i64 = 1000;

/// Whole-unit price bounds offered by the price inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: Money,
    pub max: Money,
}

impl PriceBounds {
    /// Bounds over the effective prices of `products`.
    ///
    /// `min` is the floor of the lowest price but never above 0; `max` is the
    /// ceiling of the highest price but never below 100. With no products the
    /// bounds are 0 to 1000.
    pub fn from_products<'a>(
        products: impl IntoIterator<Item = &'a Product>,
        currency: Currency,
    ) -> Self {
        let mut lowest: Option<i64> = None;
        let mut highest: Option<i64> = None;

        for product in products {
            let price = product.effective_price();
            let floor = price.floor_units();
            let ceil = price.ceil_units();
            lowest = Some(lowest.map_or(floor, |l| l.min(floor)));
            highest = Some(highest.map_or(ceil, |h| h.max(ceil)));
        }

        match (lowest, highest) {
            (Some(lowest), Some(highest)) => Self {
                min: Money::from_units(lowest.min(PRICE_FLOOR_UNITS), currency),
                max: Money::from_units(highest.max(PRICE_CEILING_UNITS), currency),
            },
            _ => Self {
                min: Money::from_units(PRICE_FLOOR_UNITS, currency),
                max: Money::from_units(EMPTY_CEILING_UNITS, currency),
            },
        }
    }

    pub fn to_range(&self) -> PriceRange {
        PriceRange::new(self.min, self.max)
    }
}

/// Type of facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetType {
    /// Discrete values (brands, categories).
    Terms,
    /// Numeric range (price).
    Range,
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// The value.
    pub value: String,
    /// Number of filtered products with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

/// A facet for filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Display name (e.g., "Brand").
    pub name: String,
    /// Query-string key this facet filters on.
    pub field: String,
    pub facet_type: FacetType,
    /// Values in first-seen order.
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Create a new terms facet.
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            facet_type: FacetType::Terms,
            values: Vec::new(),
        }
    }

    /// Count one occurrence of `value`, adding it on first sight.
    fn bump(&mut self, index: &mut HashMap<String, usize>, value: &str, selected: bool) {
        match index.get(value) {
            Some(&i) => self.values[i].count += 1,
            None => {
                index.insert(value.to_string(), self.values.len());
                self.values.push(FacetValue {
                    value: value.to_string(),
                    count: 1,
                    selected,
                });
            }
        }
    }

    /// Look up a value.
    pub fn value(&self, value: &str) -> Option<&FacetValue> {
        self.values.iter().find(|v| v.value == value)
    }
}

/// Everything the filter panel shows next to a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingFacets {
    pub brands: Facet,
    pub categories: Facet,
    pub price: PriceBounds,
}

impl ListingFacets {
    /// Build facets from the filtered (not yet paginated) products.
    pub fn from_results(
        products: &[&Product],
        spec: &QuerySpec,
        locale: Locale,
        currency: Currency,
    ) -> Self {
        let mut brands = Facet::terms(locale.pick("Brand", "الماركة"), "brand");
        let mut categories = Facet::terms(locale.pick("Category", "الفئة"), "category");
        let mut brand_index = HashMap::new();
        let mut category_index = HashMap::new();

        for product in products {
            let brand = product.localized_brand(locale);
            brands.bump(&mut brand_index, brand, spec.brands.contains(brand));

            let category = product.category.as_str();
            let selected = spec.category.as_ref().is_some_and(|c| c.as_str() == category);
            categories.bump(&mut category_index, category, selected);
        }

        Self {
            brands,
            categories,
            price: PriceBounds::from_products(products.iter().copied(), currency),
        }
    }
}
