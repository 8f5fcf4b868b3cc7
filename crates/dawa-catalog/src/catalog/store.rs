//! In-memory catalog loaded from a JSON file.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Availability, Category, Product, ProductBadge};
use crate::error::CatalogError;
use crate::ids::{CategoryId, ProductId};
use crate::locale::{Locale, LocalizedText};
use crate::money::{Currency, Money};
use crate::search::{
    evaluate, evaluate_observed, PriceBounds, PriceRange, QuerySpec, SearchResults,
    StageObserver,
};

/// A validated, single-currency product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    currency: Currency,
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// On-disk catalog shape. Prices are plain decimals in `currency`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default = "default_currency_code")]
    currency: String,
    #[serde(default)]
    categories: Vec<Category>,
    products: Vec<ProductRecord>,
}

fn default_currency_code() -> String {
    Currency::default().code().to_string()
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: String,
    #[serde(default)]
    sku: Option<String>,
    name: LocalizedText,
    brand: LocalizedText,
    price: f64,
    #[serde(default)]
    offer_price: Option<f64>,
    category: String,
    #[serde(default)]
    prescription_required: bool,
    #[serde(default)]
    reviews_count: u32,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    availability: Availability,
    #[serde(default)]
    badges: Vec<ProductBadge>,
}

impl ProductRecord {
    fn into_product(self, currency: Currency) -> Result<Product, CatalogError> {
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(CatalogError::InvalidPrice {
                product_id: self.id,
                price: self.price,
            });
        }
        let price = Money::from_decimal(self.price, currency);

        let offer_price = match self.offer_price {
            Some(offer) => {
                let offer_money = Money::from_decimal(offer, currency);
                if !offer.is_finite()
                    || !offer_money.is_positive()
                    || offer_money.amount_minor > price.amount_minor
                {
                    return Err(CatalogError::OfferExceedsPrice {
                        product_id: self.id,
                        price: self.price,
                        offer_price: offer,
                    });
                }
                Some(offer_money)
            }
            None => None,
        };

        let mut product = Product {
            id: ProductId::new(self.id),
            sku: self.sku,
            name: self.name,
            brand: self.brand,
            price,
            offer_price,
            category: CategoryId::new(self.category),
            prescription_required: self.prescription_required,
            reviews_count: self.reviews_count,
            rating: self.rating,
            availability: self.availability,
            badges: self.badges,
        };
        normalize_badges(&mut product);
        Ok(product)
    }
}

/// Keep the offer and prescription badges in step with the product fields.
fn normalize_badges(product: &mut Product) {
    product
        .badges
        .retain(|b| !matches!(b, ProductBadge::Offer | ProductBadge::PrescriptionRequired));
    product.badges.dedup();
    if product.has_offer() {
        product.badges.push(ProductBadge::Offer);
    }
    if product.prescription_required {
        product.badges.push(ProductBadge::PrescriptionRequired);
    }
}

impl Catalog {
    /// Parse and validate a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let currency = Currency::from_code(&file.currency)
            .ok_or_else(|| CatalogError::UnsupportedCurrency(file.currency.clone()))?;

        let products = file
            .products
            .into_iter()
            .map(|record| record.into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_parts(currency, file.categories, products)
    }

    /// Read and validate a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build a catalog from already-typed parts.
    ///
    /// Checks currency consistency, offer prices, id uniqueness and, when a
    /// category table is given, that every product's category exists in it.
    pub fn from_parts(
        currency: Currency,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> Result<Self, CatalogError> {
        let known_categories: HashSet<&CategoryId> = categories.iter().map(|c| &c.id).collect();
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            for money in std::iter::once(&product.price).chain(product.offer_price.iter()) {
                if money.currency != currency {
                    return Err(CatalogError::CurrencyMismatch {
                        product_id: product.id.to_string(),
                        expected: currency.code().to_string(),
                        got: money.currency.code().to_string(),
                    });
                }
            }

            if !product.price.is_positive() {
                return Err(CatalogError::InvalidPrice {
                    product_id: product.id.to_string(),
                    price: product.price.to_decimal(),
                });
            }

            if let Some(offer) = product.offer_price {
                if !offer.is_positive() || offer.amount_minor > product.price.amount_minor {
                    return Err(CatalogError::OfferExceedsPrice {
                        product_id: product.id.to_string(),
                        price: product.price.to_decimal(),
                        offer_price: offer.to_decimal(),
                    });
                }
            }

            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.to_string()));
            }

            if !known_categories.is_empty() && !known_categories.contains(&product.category) {
                return Err(CatalogError::UnknownCategory {
                    product_id: product.id.to_string(),
                    category: product.category.to_string(),
                });
            }
        }

        Ok(Self {
            currency,
            categories,
            products,
        })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id.as_str() == id)
    }

    /// Products listed under a category, in catalog order.
    pub fn products_in_category<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.category.as_str() == id)
    }

    /// Distinct localized brand names in first-seen order.
    pub fn brands(&self, locale: Locale) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.localized_brand(locale))
            .filter(|b| seen.insert(*b))
            .collect()
    }

    /// Whole-unit price bounds over the catalog.
    pub fn price_bounds(&self) -> PriceBounds {
        PriceBounds::from_products(self.products.iter(), self.currency)
    }

    /// Price range a fresh or reset listing starts from.
    pub fn default_price_range(&self) -> PriceRange {
        self.price_bounds().to_range()
    }

    /// A query spec for this catalog with the default price range applied.
    pub fn new_query(&self) -> QuerySpec {
        QuerySpec::new().with_price_range(self.default_price_range())
    }

    /// Run the listing pipeline over the catalog.
    pub fn query(&self, spec: &QuerySpec, locale: Locale) -> SearchResults<&Product> {
        evaluate(&self.products, spec, locale)
    }

    /// Run the listing pipeline, reporting each stage to `observer`.
    pub fn query_observed<O: StageObserver>(
        &self,
        spec: &QuerySpec,
        locale: Locale,
        observer: &mut O,
    ) -> SearchResults<&Product> {
        evaluate_observed(&self.products, spec, locale, observer)
    }
}
