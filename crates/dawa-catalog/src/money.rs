//! Money type for representing prices.
//!
//! Amounts are stored as integers in the currency's minor unit (baisa for
//! OMR, cents for USD), so price filters and price sorts compare exactly.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    OMR,
    AED,
    SAR,
    KWD,
    BHD,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "OMR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::OMR => "OMR",
            Currency::AED => "AED",
            Currency::SAR => "SAR",
            Currency::KWD => "KWD",
            Currency::BHD => "BHD",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Price prefix shown next to amounts in the given locale.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Currency::OMR, Locale::Ar) => "ر.ع.",
            (Currency::AED, Locale::Ar) => "د.إ",
            (Currency::SAR, Locale::Ar) => "ر.س",
            (Currency::KWD, Locale::Ar) => "د.ك",
            (Currency::BHD, Locale::Ar) => "د.ب",
            _ => self.code(),
        }
    }

    /// Number of decimal places in the minor unit.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::OMR | Currency::KWD | Currency::BHD => 3,
            _ => 2,
        }
    }

    /// Minor units per whole unit (1000 for OMR).
    pub fn minor_per_unit(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "OMR" => Some(Currency::OMR),
            "AED" => Some(Currency::AED),
            "SAR" => Some(Currency::SAR),
            "KWD" => Some(Currency::KWD),
            "BHD" => Some(Currency::BHD),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the currency's minor unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole currency units.
    pub fn from_units(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(currency.minor_per_unit()), currency)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use dawa_catalog::money::{Currency, Money};
    /// let price = Money::from_decimal(12.75, Currency::OMR);
    /// assert_eq!(price.amount_minor, 12750);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.minor_per_unit() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_unit() as f64
    }

    /// Largest whole-unit amount not above this value.
    pub fn floor_units(&self) -> i64 {
        self.amount_minor.div_euclid(self.currency.minor_per_unit())
    }

    /// Smallest whole-unit amount not below this value.
    pub fn ceil_units(&self) -> i64 {
        let per_unit = self.currency.minor_per_unit();
        let floor = self.amount_minor.div_euclid(per_unit);
        if self.amount_minor.rem_euclid(per_unit) == 0 {
            floor
        } else {
            floor + 1
        }
    }

    /// Format the amount without a currency label (e.g., "12.750").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Format with the locale's currency label (e.g., "OMR 12.750").
    pub fn display(&self, locale: Locale) -> String {
        format!("{} {}", self.currency.label(locale), self.display_amount())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(Locale::En))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_decimal(4.5, Currency::OMR);
        assert_eq!(m.amount_minor, 4500);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(12345, Currency::OMR);
        assert!((m.to_decimal() - 12.345).abs() < 1e-9);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(Locale::En), "USD 49.99");

        let m = Money::new(12500, Currency::OMR);
        assert_eq!(m.display(Locale::En), "OMR 12.500");
        assert_eq!(m.display(Locale::Ar), "ر.ع. 12.500");
    }

    #[test]
    fn test_floor_and_ceil_units() {
        let m = Money::new(12345, Currency::OMR);
        assert_eq!(m.floor_units(), 12);
        assert_eq!(m.ceil_units(), 13);

        let whole = Money::from_units(7, Currency::OMR);
        assert_eq!(whole.floor_units(), 7);
        assert_eq!(whole.ceil_units(), 7);

        let negative = Money::new(-1500, Currency::OMR);
        assert_eq!(negative.floor_units(), -2);
        assert_eq!(negative.ceil_units(), -1);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("OMR"), Some(Currency::OMR));
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
