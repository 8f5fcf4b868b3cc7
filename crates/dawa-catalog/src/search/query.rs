//! Listing query specification.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::catalog::Product;
use crate::ids::CategoryId;
use crate::locale::Locale;
use crate::money::{Currency, Money};
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Products per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Largest page size a query may ask for.
pub const MAX_PAGE_SIZE: usize = 100;

/// Sort modes offered by the listing's sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Most reviews first.
    #[default]
    Popular,
    /// Effective price, low to high.
    PriceAsc,
    /// Effective price, high to low.
    PriceDesc,
    /// Product id, descending.
    Newest,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Popular,
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::Newest,
    ];

    /// Parse a sort mode. Unrecognized values fall back to `Popular`.
    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "newest" => Self::Newest,
            _ => Self::Popular,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Newest => "newest",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match self {
            Self::Popular => locale.pick("Most Popular", "الأكثر رواجاً"),
            Self::PriceAsc => locale.pick("Price: Low to High", "السعر: من الأقل للأعلى"),
            Self::PriceDesc => locale.pick("Price: High to Low", "السعر: من الأعلى للأقل"),
            Self::Newest => locale.pick("Newest", "الأحدث"),
        }
    }

    /// Ordering of two products under this mode.
    ///
    /// Equal keys compare `Equal`; the pipeline sorts stably so ties keep
    /// their input order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Popular => b.reviews_count.cmp(&a.reviews_count),
            Self::PriceAsc => a
                .effective_price()
                .amount_minor
                .cmp(&b.effective_price().amount_minor),
            Self::PriceDesc => b
                .effective_price()
                .amount_minor
                .cmp(&a.effective_price().amount_minor),
            Self::Newest => b.created_order_key().cmp(a.created_order_key()),
        }
    }
}

/// Inclusive price bounds in the catalog currency's minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_minor: i64,
    pub max_minor: i64,
}

impl PriceRange {
    /// Create a range from two amounts.
    pub fn new(min: Money, max: Money) -> Self {
        Self {
            min_minor: min.amount_minor,
            max_minor: max.amount_minor,
        }
    }

    /// Create a range from decimal amounts.
    pub fn from_decimal(min: f64, max: f64, currency: Currency) -> Self {
        Self::new(
            Money::from_decimal(min, currency),
            Money::from_decimal(max, currency),
        )
    }

    /// A range every price falls into.
    pub fn unbounded() -> Self {
        Self {
            min_minor: i64::MIN,
            max_minor: i64::MAX,
        }
    }

    pub fn contains(&self, price: &Money) -> bool {
        price.amount_minor >= self.min_minor && price.amount_minor <= self.max_minor
    }

    /// Check if any price can fall into the range.
    pub fn is_empty(&self) -> bool {
        self.min_minor > self.max_minor
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Everything that decides one listing page.
///
/// Rebuilt on every filter interaction; builder methods take and return the
/// spec by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Case-insensitive substring matched against name and brand.
    pub search_term: String,
    /// Exact category match.
    pub category: Option<CategoryId>,
    /// Localized brand names; matches any. Empty means no brand filter.
    pub brands: BTreeSet<String>,
    /// Inclusive effective-price bounds.
    pub price_range: PriceRange,
    /// Prescription requirement; `None` keeps both.
    pub prescription_required: Option<bool>,
    /// Keep only products with an offer price.
    pub offers_only: bool,
    pub sort: SortMode,
    /// Requested page (1-indexed). Clamped during evaluation.
    pub page: usize,
    /// Items per page.
    pub page_size: usize,
    /// Whether to include facets in results.
    pub include_facets: bool,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::new()
    }
}

impl QuerySpec {
    /// Create a query that matches everything, sorted by popularity.
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            category: None,
            brands: BTreeSet::new(),
            price_range: PriceRange::unbounded(),
            prescription_required: None,
            offers_only: false,
            sort: SortMode::Popular,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            include_facets: false,
        }
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Set the category filter.
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Clear the category filter.
    pub fn without_category(mut self) -> Self {
        self.category = None;
        self
    }

    /// Add a brand to the brand filter.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.insert(brand.into());
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Set the prescription filter.
    pub fn with_prescription(mut self, required: Option<bool>) -> Self {
        self.prescription_required = required;
        self
    }

    /// Set the offers-only flag.
    pub fn with_offers_only(mut self, offers_only: bool) -> Self {
        self.offers_only = offers_only;
        self
    }

    /// Set sort mode.
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Set the requested page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Enable or disable facets.
    pub fn with_facets(mut self, include: bool) -> Self {
        self.include_facets = include;
        self
    }

    /// Flip a brand checkbox and go back to the first page.
    pub fn toggle_brand(mut self, brand: &str) -> Self {
        if !self.brands.remove(brand) {
            self.brands.insert(brand.to_string());
        }
        self.page = 1;
        self
    }

    /// Clear the filter panel.
    ///
    /// Brands, prescription and offers are cleared and the price range goes
    /// back to `default_range`. Search, category and sort are kept.
    pub fn reset_filters(mut self, default_range: PriceRange) -> Self {
        self.brands.clear();
        self.price_range = default_range;
        self.prescription_required = None;
        self.offers_only = false;
        self.page = 1;
        self
    }

    /// Active filter stages, in evaluation order.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if !self.search_term.is_empty() {
            filters.push(Filter::search(&self.search_term));
        }
        if let Some(category) = &self.category {
            filters.push(Filter::Category(category.clone()));
        }
        if !self.brands.is_empty() {
            filters.push(Filter::Brands(self.brands.clone()));
        }
        filters.push(Filter::Price(self.price_range));
        if let Some(required) = self.prescription_required {
            filters.push(Filter::Prescription(required));
        }
        if self.offers_only {
            filters.push(Filter::OffersOnly);
        }
        filters
    }

    /// Parse a listing URL query string (e.g., `search=zinc&brand=Solgar&filter=offers`).
    ///
    /// Unknown keys are ignored and unparseable numbers fall back to the
    /// defaults, matching how the storefront treats hand-edited URLs.
    pub fn from_query_string(qs: &str, currency: Currency) -> Self {
        QuerySpec::new().apply_query_string(qs, currency)
    }

    /// Apply URL query string parameters on top of this spec.
    ///
    /// Keys missing from the URL keep their current value, so a spec from
    /// [`Catalog::new_query`](crate::catalog::Catalog::new_query) keeps the
    /// catalog price bounds and configured page size.
    pub fn apply_query_string(mut self, qs: &str, currency: Currency) -> Self {
        let qs = qs.strip_prefix('?').unwrap_or(qs);

        for pair in qs.split('&').filter(|p| !p.is_empty()) {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = url_decode(parts.next().unwrap_or(""));

            match key {
                "search" | "q" => self.search_term = value,
                "category" if !value.is_empty() => self.category = Some(CategoryId::new(value)),
                "brand" if !value.is_empty() => {
                    self.brands.insert(value);
                }
                "filter" => self.offers_only = value == "offers",
                "sort" => self.sort = SortMode::from_str(&value),
                "page" => self.page = value.parse::<usize>().unwrap_or(1).max(1),
                "per_page" => {
                    if let Ok(per_page) = value.parse::<usize>() {
                        self.page_size = per_page.clamp(1, MAX_PAGE_SIZE);
                    }
                }
                "min_price" => {
                    if let Ok(min) = value.parse::<f64>() {
                        self.price_range.min_minor = Money::from_decimal(min, currency).amount_minor;
                    }
                }
                "max_price" => {
                    if let Ok(max) = value.parse::<f64>() {
                        self.price_range.max_minor = Money::from_decimal(max, currency).amount_minor;
                    }
                }
                "rx" | "prescription" => self.prescription_required = parse_tri_state(&value),
                _ => {}
            }
        }

        self
    }
}

/// Parse a tri-state select value; anything else means "All".
pub fn parse_tri_state(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Percent-decode a query value, treating `+` as a space.
///
/// Escapes are gathered as bytes first so multi-byte UTF-8 (Arabic search
/// terms) survives decoding.
fn url_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}
