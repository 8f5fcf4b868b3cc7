//! Show the filter panel options of a whole catalog.

use anyhow::Result;
use dawa_catalog::prelude::*;
use serde::Serialize;

use super::FacetsArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CategoryEntry<'a> {
    id: &'a str,
    name: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct FacetsReport<'a> {
    locale: Locale,
    currency: Currency,
    brands: Vec<(&'a str, usize)>,
    categories: Vec<CategoryEntry<'a>>,
    price: PriceBounds,
}

/// Run the facets command.
pub fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.catalog.as_deref())?;
    let locale = ctx.locale(args.locale.as_deref())?;

    let spec = catalog.new_query().with_facets(true);
    let results = catalog.query(&spec, locale);
    let facets = results
        .facets
        .unwrap_or_else(|| ListingFacets::from_results(&[], &spec, locale, catalog.currency()));

    let brands: Vec<(&str, usize)> = facets
        .brands
        .values
        .iter()
        .map(|v| (v.value.as_str(), v.count))
        .collect();

    // Every category in the table, including empty ones, in table order.
    let categories: Vec<CategoryEntry> = catalog
        .categories()
        .iter()
        .map(|c| CategoryEntry {
            id: c.id.as_str(),
            name: c.localized_name(locale),
            count: facets
                .categories
                .value(c.id.as_str())
                .map_or(0, |v| v.count),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&FacetsReport {
            locale,
            currency: catalog.currency(),
            brands,
            categories,
            price: facets.price,
        });
        return Ok(());
    }

    ctx.output.header(&facets.brands.name);
    for (brand, count) in &brands {
        ctx.output.list_item(&format!("{} ({})", brand, count));
    }

    ctx.output.header(&facets.categories.name);
    if categories.is_empty() {
        for value in &facets.categories.values {
            ctx.output
                .list_item(&format!("{} ({})", value.value, value.count));
        }
    } else {
        for category in &categories {
            ctx.output.list_item(&format!(
                "{} [{}] ({})",
                category.name, category.id, category.count
            ));
        }
    }

    ctx.output.header(locale.pick("Price", "السعر"));
    ctx.output
        .kv(locale.pick("min", "الأدنى"), &facets.price.min.display(locale));
    ctx.output
        .kv(locale.pick("max", "الأعلى"), &facets.price.max.display(locale));

    Ok(())
}
