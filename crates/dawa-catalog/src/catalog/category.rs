//! Category types for product organization.

use crate::ids::CategoryId;
use crate::locale::{Locale, LocalizedText};
use serde::{Deserialize, Serialize};

/// A storefront category (e.g., "vitamins", "skin-care").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Category slug, referenced by products.
    pub id: CategoryId,
    /// Display name in both languages.
    pub name: LocalizedText,
    /// Icon name for the category tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: LocalizedText) -> Self {
        Self {
            id: id.into(),
            name,
            icon: None,
        }
    }

    pub fn localized_name(&self, locale: Locale) -> &str {
        self.name.get(locale)
    }
}
