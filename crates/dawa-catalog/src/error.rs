//! Catalog error types.

use thiserror::Error;

/// Errors raised while loading or validating a catalog.
///
/// The query pipeline itself never fails; these only come out of
/// [`Catalog`](crate::catalog::Catalog) construction.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON for the expected shape.
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    /// Currency code not supported.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Base price missing or not positive.
    #[error("Invalid price for {product_id}: {price}")]
    InvalidPrice { product_id: String, price: f64 },

    /// Offer price above the base price or not positive.
    #[error("Offer price {offer_price} for {product_id} must be positive and at most {price}")]
    OfferExceedsPrice {
        product_id: String,
        price: f64,
        offer_price: f64,
    },

    /// Product priced in a different currency than the catalog.
    #[error("Currency mismatch on {product_id}: expected {expected}, got {got}")]
    CurrencyMismatch {
        product_id: String,
        expected: String,
        got: String,
    },

    /// Two products share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Product references a category absent from the category table.
    #[error("Unknown category {category} on product {product_id}")]
    UnknownCategory {
        product_id: String,
        category: String,
    },
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}
