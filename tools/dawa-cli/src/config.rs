//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use dawa_catalog::search::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["dawa.toml", ".dawa.toml", "dawa.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Where the catalog lives and what it is priced in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Catalog JSON file, relative to the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Currency the catalog is expected to use.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "OMR".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            currency: default_currency(),
        }
    }
}

/// Listing defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Locale code (`en` or `ar`).
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub include_facets: bool,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            locale: default_locale(),
            include_facets: false,
        }
    }
}

/// Structured log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    /// `human` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "human".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Generate a default dawa.toml config file.
pub fn generate_default_config(catalog_path: &str) -> String {
    format!(
        r#"# Dawa catalog configuration

[catalog]
path = "{catalog_path}"
currency = "OMR"

[listing]
page_size = {page_size}
locale = "en"
include_facets = false

[logging]
# trace, debug, info, warn, error
level = "warn"
# human or json
format = "human"
"#,
        catalog_path = catalog_path,
        page_size = DEFAULT_PAGE_SIZE,
    )
}
