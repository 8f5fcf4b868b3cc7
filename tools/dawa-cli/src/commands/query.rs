//! Run a listing query against a catalog.

use anyhow::{bail, Result};
use dawa_catalog::prelude::*;
use dawa_catalog::search::{parse_tri_state, PAGE_WINDOW_RADIUS};
use dawa_observability::QueryMetricsCollector;
use serde::Serialize;

use super::QueryArgs;
use crate::context::Context;
use crate::output::{format_badges, format_page_links, format_price, truncate};

/// JSON shape of `dawa query --json`.
#[derive(Serialize)]
struct QueryReport<'a> {
    query_id: String,
    locale: Locale,
    heading: String,
    summary: String,
    query: &'a QuerySpec,
    #[serde(flatten)]
    results: &'a SearchResults<&'a Product>,
}

/// Run the query command.
pub fn run(args: QueryArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.catalog.as_deref())?;
    let locale = ctx.locale(args.locale.as_deref())?;
    let spec = build_spec(&args, &catalog, ctx)?;

    let logger = ctx.logger("query");
    logger
        .debug_builder("query parsed")
        .field("search", spec.search_term.as_str())
        .field("sort", spec.sort.as_str())
        .field_u64("page", spec.page as u64)
        .field_u64("page_size", spec.page_size as u64)
        .field_u64("brands", spec.brands.len() as u64)
        .emit();

    let mut collector = QueryMetricsCollector::new(logger.query_id().clone());
    let results = catalog.query_observed(&spec, locale, &mut collector);
    let metrics = collector.finalize();
    metrics.log(&logger);

    if spec.page != results.pagination.page {
        logger
            .warn_builder("page clamped")
            .field_u64("requested", spec.page as u64)
            .field_u64("served", results.pagination.page as u64)
            .emit();
    }

    let heading = heading(&spec, catalog.categories(), locale);
    let summary = result_summary(&results.pagination, locale);

    if ctx.output.is_json() {
        ctx.output.json(&QueryReport {
            query_id: logger.query_id().to_string(),
            locale,
            heading,
            summary,
            query: &spec,
            results: &results,
        });
        return Ok(());
    }

    ctx.output.header(&heading);

    if results.is_empty() {
        ctx.output.info(no_results(locale));
    } else {
        let widths = [8, 32, 18, 24];
        ctx.output.table_row(
            &[
                locale.pick("ID", "الرمز"),
                locale.pick("Product", "المنتج"),
                locale.pick("Brand", "الماركة"),
                locale.pick("Price", "السعر"),
            ],
            &widths,
        );
        for product in &results.items {
            let name = truncate(product.localized_name(locale), 32);
            let brand = truncate(product.localized_brand(locale), 18);
            let price = format_price(product, locale);
            let badges = format_badges(product, locale);
            ctx.output.table_row(
                &[product.id.as_str(), &name, &brand, &price, &badges],
                &[widths[0], widths[1], widths[2], widths[3], 0],
            );
        }
    }

    ctx.output.line("");
    ctx.output.line(&summary);
    let links = results.pagination.page_links(PAGE_WINDOW_RADIUS);
    if links.len() > 1 {
        ctx.output.line(&format_page_links(&links));
    }

    if let Some(facets) = &results.facets {
        print_facets(facets, &catalog, locale, ctx);
    }

    for line in metrics.to_summary().lines() {
        ctx.output.debug(line);
    }

    Ok(())
}

/// Start from the catalog defaults, then apply `--url` and explicit flags.
fn build_spec(args: &QueryArgs, catalog: &Catalog, ctx: &Context) -> Result<QuerySpec> {
    let currency = catalog.currency();
    let listing = &ctx.config.listing;

    let mut spec = catalog.new_query().with_page_size(listing.page_size);
    if let Some(url) = &args.url {
        spec = spec.apply_query_string(url, currency);
    }

    if let Some(term) = &args.search {
        spec = spec.with_search(term.as_str());
    }
    if let Some(category) = &args.category {
        spec = spec.with_category(category.as_str());
    }
    for brand in &args.brand {
        spec = spec.with_brand(brand.as_str());
    }
    if let Some(min) = args.min_price {
        spec.price_range.min_minor = Money::from_decimal(min, currency).amount_minor;
    }
    if let Some(max) = args.max_price {
        spec.price_range.max_minor = Money::from_decimal(max, currency).amount_minor;
    }
    if let Some(rx) = &args.rx {
        let parsed = parse_tri_state(rx);
        if parsed.is_none() && !rx.eq_ignore_ascii_case("all") {
            bail!("Invalid --rx value '{}'. Expected yes, no or all.", rx);
        }
        spec = spec.with_prescription(parsed);
    }
    if args.offers {
        spec = spec.with_offers_only(true);
    }
    if let Some(sort) = &args.sort {
        let mode = SortMode::from_str(sort);
        if mode.as_str() != sort.trim() {
            ctx.output
                .warn(&format!("Unknown sort '{}', using '{}'", sort, mode.as_str()));
        }
        spec = spec.with_sort(mode);
    }
    if let Some(page) = args.page {
        spec = spec.with_page(page);
    }
    if let Some(per_page) = args.per_page {
        spec = spec.with_page_size(per_page);
    }

    Ok(spec.with_facets(args.facets || listing.include_facets))
}

fn print_facets(facets: &ListingFacets, catalog: &Catalog, locale: Locale, ctx: &Context) {
    ctx.output.header(&facets.brands.name);
    for value in &facets.brands.values {
        let mark = if value.selected { "[x]" } else { "[ ]" };
        ctx.output
            .list_item(&format!("{} {} ({})", mark, value.value, value.count));
    }

    ctx.output.header(&facets.categories.name);
    for value in &facets.categories.values {
        let name = catalog
            .category(&value.value)
            .map(|c| c.localized_name(locale).to_string())
            .unwrap_or_else(|| value.value.clone());
        let mark = if value.selected { "[x]" } else { "[ ]" };
        ctx.output.list_item(&format!("{} {} ({})", mark, name, value.count));
    }

    ctx.output.header(locale.pick("Price", "السعر"));
    ctx.output.kv(
        locale.pick("min", "الأدنى"),
        &facets.price.min.display(locale),
    );
    ctx.output.kv(
        locale.pick("max", "الأعلى"),
        &facets.price.max.display(locale),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;
    use std::path::PathBuf;

    const CATALOG: &str = r#"{
        "currency": "OMR",
        "products": [
            {"id": "a", "name": {"en": "Zinc", "ar": "زنك"}, "brand": {"en": "Solgar", "ar": "سولجار"},
             "price": 5.0, "category": "vitamins"},
            {"id": "b", "name": {"en": "Aspirin", "ar": "أسبرين"}, "brand": {"en": "Bayer", "ar": "باير"},
             "price": 50.0, "category": "medicine", "prescription_required": true}
        ]
    }"#;

    fn ctx() -> Context {
        Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/tmp"),
        }
    }

    #[test]
    fn test_flags_override_url() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let args = QueryArgs {
            url: Some("search=zinc&sort=newest&page=3".to_string()),
            sort: Some("price_asc".to_string()),
            max_price: Some(10.0),
            rx: Some("no".to_string()),
            ..Default::default()
        };

        let spec = build_spec(&args, &catalog, &ctx()).unwrap();
        assert_eq!(spec.search_term, "zinc");
        assert_eq!(spec.sort, SortMode::PriceAsc);
        assert_eq!(spec.page, 3);
        assert_eq!(spec.price_range.max_minor, 10_000);
        assert_eq!(spec.prescription_required, Some(false));
    }

    #[test]
    fn test_url_keeps_configured_page_size_and_bounds() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let mut ctx = ctx();
        ctx.config.listing.page_size = 24;
        let args = QueryArgs {
            url: Some("search=zinc&brand=Solgar".to_string()),
            ..Default::default()
        };

        let spec = build_spec(&args, &catalog, &ctx).unwrap();
        assert_eq!(spec.search_term, "zinc");
        assert!(spec.brands.contains("Solgar"));
        assert_eq!(spec.page_size, 24);
        assert_eq!(spec.price_range, catalog.default_price_range());
    }

    #[test]
    fn test_defaults_use_catalog_price_bounds() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let spec = build_spec(&QueryArgs::default(), &catalog, &ctx()).unwrap();
        assert_eq!(spec.price_range, catalog.default_price_range());
        assert_eq!(spec.page_size, 12);
        assert!(!spec.include_facets);
    }

    #[test]
    fn test_invalid_rx_rejected() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let args = QueryArgs {
            rx: Some("maybe".to_string()),
            ..Default::default()
        };
        assert!(build_spec(&args, &catalog, &ctx()).is_err());
    }
}
