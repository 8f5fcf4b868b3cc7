//! Product types.

use crate::ids::{CategoryId, ProductId};
use crate::locale::{Locale, LocalizedText};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Stock availability shown on the product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    InStock,
    OutOfStock,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "in_stock",
            Availability::OutOfStock => "out_of_stock",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match self {
            Availability::InStock => locale.pick("In Stock", "متوفر"),
            Availability::OutOfStock => locale.pick("Out of Stock", "غير متوفر"),
        }
    }
}

/// Badge rendered over a product thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductBadge {
    New,
    Offer,
    PrescriptionRequired,
}

impl ProductBadge {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductBadge::New => "new",
            ProductBadge::Offer => "offer",
            ProductBadge::PrescriptionRequired => "prescription_required",
        }
    }

    /// Short label shown inside the badge.
    pub fn label(&self, locale: Locale) -> &'static str {
        match self {
            ProductBadge::New => locale.pick("New", "جديد"),
            ProductBadge::Offer => locale.pick("Offer", "عرض"),
            ProductBadge::PrescriptionRequired => locale.pick("Rx Only", "وصفة إلزامية"),
        }
    }
}

/// A product in the pharmacy catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Product name in both languages.
    pub name: LocalizedText,
    /// Brand name in both languages.
    pub brand: LocalizedText,
    /// Base price.
    pub price: Money,
    /// Discounted price, never above `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_price: Option<Money>,
    /// Category this product is listed under.
    pub category: CategoryId,
    /// Whether a prescription must be uploaded before purchase.
    pub prescription_required: bool,
    /// Number of reviews, used as the popularity signal.
    pub reviews_count: u32,
    /// Average rating out of 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub badges: Vec<ProductBadge>,
}

impl Product {
    /// Create a product with no offer, reviews or badges.
    pub fn new(
        id: impl Into<ProductId>,
        name: LocalizedText,
        brand: LocalizedText,
        price: Money,
        category: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            sku: None,
            name,
            brand,
            price,
            offer_price: None,
            category: category.into(),
            prescription_required: false,
            reviews_count: 0,
            rating: None,
            availability: Availability::InStock,
            badges: Vec::new(),
        }
    }

    /// Set the offer price.
    pub fn with_offer(mut self, offer_price: Money) -> Self {
        self.offer_price = Some(offer_price);
        self
    }

    /// Mark as prescription-only.
    pub fn with_prescription(mut self, required: bool) -> Self {
        self.prescription_required = required;
        self
    }

    /// Set the review count.
    pub fn with_reviews(mut self, reviews_count: u32) -> Self {
        self.reviews_count = reviews_count;
        self
    }

    /// Price the customer pays: the offer price when present, else the base price.
    pub fn effective_price(&self) -> Money {
        self.offer_price.unwrap_or(self.price)
    }

    /// Check if the product is on offer.
    pub fn has_offer(&self) -> bool {
        self.offer_price.is_some()
    }

    /// Struck-through original price, shown only when on offer.
    pub fn original_price(&self) -> Option<Money> {
        self.offer_price.map(|_| self.price)
    }

    /// Calculate the offer discount percentage.
    pub fn discount_percentage(&self) -> Option<f64> {
        self.offer_price.and_then(|offer| {
            if self.price.amount_minor > offer.amount_minor {
                let savings = self.price.amount_minor - offer.amount_minor;
                Some((savings as f64 / self.price.amount_minor as f64) * 100.0)
            } else {
                None
            }
        })
    }

    pub fn localized_name(&self, locale: Locale) -> &str {
        self.name.get(locale)
    }

    pub fn localized_brand(&self, locale: Locale) -> &str {
        self.brand.get(locale)
    }

    /// Key used by the "newest" sort.
    ///
    /// This is the product id, compared lexicographically. Ids are not issued
    /// in creation order, so the resulting order is only a stand-in for recency.
    pub fn created_order_key(&self) -> &str {
        self.id.as_str()
    }

    /// Check if the product can be added to the cart directly.
    pub fn is_purchasable(&self) -> bool {
        self.availability == Availability::InStock && !self.prescription_required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn sample() -> Product {
        Product::new(
            "p-1",
            LocalizedText::new("Vitamin D3", "فيتامين د3"),
            LocalizedText::new("Solgar", "سولجار"),
            Money::from_decimal(10.0, Currency::OMR),
            "vitamins",
        )
    }

    #[test]
    fn test_effective_price_without_offer() {
        let product = sample();
        assert_eq!(product.effective_price().amount_minor, 10_000);
        assert!(!product.has_offer());
        assert_eq!(product.original_price(), None);
    }

    #[test]
    fn test_effective_price_with_offer() {
        let product = sample().with_offer(Money::from_decimal(7.5, Currency::OMR));
        assert_eq!(product.effective_price().amount_minor, 7_500);
        assert_eq!(product.original_price().unwrap().amount_minor, 10_000);

        let discount = product.discount_percentage().unwrap();
        assert!((discount - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_localized_fields() {
        let product = sample();
        assert_eq!(product.localized_name(Locale::Ar), "فيتامين د3");
        assert_eq!(product.localized_brand(Locale::En), "Solgar");
    }

    #[test]
    fn test_prescription_blocks_direct_purchase() {
        assert!(sample().is_purchasable());
        assert!(!sample().with_prescription(true).is_purchasable());
    }

    #[test]
    fn test_badge_labels() {
        assert_eq!(ProductBadge::PrescriptionRequired.label(Locale::En), "Rx Only");
        assert_eq!(ProductBadge::Offer.label(Locale::Ar), "عرض");
        assert_eq!(
            serde_json::to_string(&ProductBadge::PrescriptionRequired).unwrap(),
            "\"prescription_required\""
        );
    }
}
