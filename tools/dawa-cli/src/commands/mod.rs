//! CLI command implementations.

pub mod config;
pub mod facets;
pub mod query;
pub mod validate;

use clap::{Args, Subcommand};

/// Arguments for the query command.
#[derive(Args, Default)]
pub struct QueryArgs {
    /// Catalog JSON file (default: catalog.path from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Listing URL query string, e.g. "search=zinc&brand=Solgar&page=2".
    /// Explicit flags override its values.
    #[arg(long)]
    pub url: Option<String>,

    /// Case-insensitive search in product name and brand.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category id.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Brand to include (repeatable).
    #[arg(short, long)]
    pub brand: Vec<String>,

    /// Lowest effective price.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest effective price.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Prescription filter: yes, no or all.
    #[arg(long)]
    pub rx: Option<String>,

    /// Only products with an offer price.
    #[arg(long)]
    pub offers: bool,

    /// Sort mode: popular, price_asc, price_desc or newest.
    #[arg(long)]
    pub sort: Option<String>,

    /// Page number (1-indexed).
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Products per page.
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Locale: en or ar.
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Include brand, category and price facets.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Catalog JSON file (default: catalog.path from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Locale: en or ar.
    #[arg(short, long)]
    pub locale: Option<String>,
}

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Catalog JSON file (default: catalog.path from config).
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Initialize a new config file.
    Init {
        /// Catalog path written into the new config.
        #[arg(long, default_value = "catalog.json")]
        catalog: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
