//! Load a catalog and report what it contains.

use anyhow::Result;
use dawa_catalog::prelude::*;
use serde::Serialize;

use super::ValidateArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CatalogSummary {
    path: String,
    currency: Currency,
    products: usize,
    categories: usize,
    brands: usize,
    on_offer: usize,
    prescription_required: usize,
    out_of_stock: usize,
}

/// Run the validate command.
pub fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let path = ctx.catalog_path(args.catalog.as_deref())?;
    let catalog = ctx.load_catalog(args.catalog.as_deref())?;

    let products = catalog.products();
    let summary = CatalogSummary {
        path: path.display().to_string(),
        currency: catalog.currency(),
        products: products.len(),
        categories: catalog.categories().len(),
        brands: catalog.brands(Locale::En).len(),
        on_offer: products.iter().filter(|p| p.has_offer()).count(),
        prescription_required: products.iter().filter(|p| p.prescription_required).count(),
        out_of_stock: products
            .iter()
            .filter(|p| p.availability == Availability::OutOfStock)
            .count(),
    };

    let logger = ctx.logger("validate");
    logger
        .info_builder("catalog validated")
        .field("path", summary.path.as_str())
        .field_u64("products", summary.products as u64)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output
        .success(&format!("Catalog is valid: {}", summary.path));
    ctx.output.kv("currency", summary.currency.code());
    ctx.output.kv("products", &summary.products.to_string());
    ctx.output.kv("categories", &summary.categories.to_string());
    ctx.output.kv("brands", &summary.brands.to_string());
    ctx.output.kv("on offer", &summary.on_offer.to_string());
    ctx.output.kv(
        "prescription required",
        &summary.prescription_required.to_string(),
    );
    ctx.output.kv("out of stock", &summary.out_of_stock.to_string());

    if catalog.is_empty() {
        ctx.output.warn("Catalog has no products");
    }

    Ok(())
}
