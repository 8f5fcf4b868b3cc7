//! The listing pipeline: filter, sort, paginate.
//!
//! Evaluation is a pure function of the product slice, the query spec and the
//! locale. Every call recomputes from scratch; nothing is cached between
//! calls and the input is never mutated.

use crate::catalog::Product;
use crate::locale::Locale;
use crate::search::{ListingFacets, Pagination, QuerySpec, SearchResults};
use serde::{Deserialize, Serialize};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Search,
    Category,
    Brand,
    Price,
    Prescription,
    Offers,
    Sort,
    Paginate,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Search,
        Stage::Category,
        Stage::Brand,
        Stage::Price,
        Stage::Prescription,
        Stage::Offers,
        Stage::Sort,
        Stage::Paginate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Search => "search",
            Stage::Category => "category",
            Stage::Brand => "brand",
            Stage::Price => "price",
            Stage::Prescription => "prescription",
            Stage::Offers => "offers",
            Stage::Sort => "sort",
            Stage::Paginate => "paginate",
        }
    }

    /// Whether the stage drops products from the result set.
    ///
    /// Paginate only hides products on other pages.
    pub fn is_filter(&self) -> bool {
        !matches!(self, Stage::Sort | Stage::Paginate)
    }
}

/// Receives progress callbacks while a query runs.
///
/// Observers only watch; they see counts, never the products, and cannot
/// change the outcome. Inactive filter stages are not reported.
pub trait StageObserver {
    /// Called once with the number of input products.
    fn query_started(&mut self, _input: usize) {}

    fn stage_started(&mut self, _stage: Stage) {}

    /// Called with the number of products left after the stage.
    fn stage_finished(&mut self, _stage: Stage, _remaining: usize) {}

    fn query_finished(&mut self, _pagination: &Pagination) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {}

/// Evaluate `spec` against `products`.
pub fn evaluate<'a>(
    products: &'a [Product],
    spec: &QuerySpec,
    locale: Locale,
) -> SearchResults<&'a Product> {
    evaluate_observed(products, spec, locale, &mut NoopObserver)
}

/// Evaluate `spec` against `products`, reporting each stage to `observer`.
pub fn evaluate_observed<'a, O: StageObserver + ?Sized>(
    products: &'a [Product],
    spec: &QuerySpec,
    locale: Locale,
    observer: &mut O,
) -> SearchResults<&'a Product> {
    observer.query_started(products.len());

    let mut matched: Vec<&'a Product> = products.iter().collect();
    for filter in spec.filters() {
        let stage = filter.stage();
        observer.stage_started(stage);
        matched.retain(|p| filter.matches(p, locale));
        observer.stage_finished(stage, matched.len());
    }

    // Facet values are listed in catalog order, so they are taken before sorting.
    // Brand order therefore does not follow the sort mode.
    let facets = spec.include_facets.then(|| {
        let currency = products
            .first()
            .map(|p| p.price.currency)
            .unwrap_or_default();
        ListingFacets::from_results(&matched, spec, locale, currency)
    });

    observer.stage_started(Stage::Sort);
    // `sort_by` is stable: equal keys keep catalog order.
    matched.sort_by(|a, b| spec.sort.compare(a, b));
    observer.stage_finished(Stage::Sort, matched.len());

    observer.stage_started(Stage::Paginate);
    let pagination = Pagination::new(spec.page, spec.page_size, matched.len());
    let range = pagination.range();
    let items: Vec<&'a Product> = matched
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();
    observer.stage_finished(Stage::Paginate, items.len());
    observer.query_finished(&pagination);

    let results = SearchResults::new(items, pagination);
    match facets {
        Some(facets) => results.with_facets(facets),
        None => results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedText;
    use crate::money::{Currency, Money};
    use crate::search::{PriceRange, SortMode};

    fn product(id: &str, brand: &str, price: f64, reviews: u32) -> Product {
        Product::new(
            id,
            LocalizedText::new(format!("Item {id}"), format!("منتج {id}")),
            LocalizedText::new(brand, brand),
            Money::from_decimal(price, Currency::OMR),
            "general",
        )
        .with_reviews(reviews)
    }

    fn ids(results: &SearchResults<&Product>) -> Vec<String> {
        results.items.iter().map(|p| p.id.to_string()).collect()
    }

    #[derive(Default)]
    struct Recorder {
        input: usize,
        stages: Vec<(Stage, usize)>,
        finished: Option<Pagination>,
    }

    impl StageObserver for Recorder {
        fn query_started(&mut self, input: usize) {
            self.input = input;
        }

        fn stage_finished(&mut self, stage: Stage, remaining: usize) {
            self.stages.push((stage, remaining));
        }

        fn query_finished(&mut self, pagination: &Pagination) {
            self.finished = Some(*pagination);
        }
    }

    #[test]
    fn test_stage_is_filter() {
        let filters: Vec<Stage> = Stage::ALL.into_iter().filter(Stage::is_filter).collect();
        assert_eq!(filters.len(), 6);
        assert!(!Stage::Sort.is_filter());
        assert!(!Stage::Paginate.is_filter());
    }

    #[test]
    fn test_empty_catalog() {
        let results = evaluate(&[], &QuerySpec::new(), Locale::En);
        assert!(results.is_empty());
        assert_eq!(results.pagination.total, 0);
        assert_eq!(results.pagination.total_pages, 0);
        assert_eq!(results.pagination.page, 1);
    }

    #[test]
    fn test_popular_sort_is_stable() {
        let products = vec![
            product("a", "X", 1.0, 10),
            product("b", "X", 1.0, 50),
            product("c", "X", 1.0, 10),
        ];
        let results = evaluate(&products, &QuerySpec::new(), Locale::En);
        assert_eq!(ids(&results), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_price_sorts_use_effective_price() {
        let products = vec![
            product("a", "X", 10.0, 0),
            product("b", "X", 8.0, 0).with_offer(Money::from_decimal(3.0, Currency::OMR)),
            product("c", "X", 5.0, 0),
        ];
        let asc = evaluate(&products, &QuerySpec::new().with_sort(SortMode::PriceAsc), Locale::En);
        assert_eq!(ids(&asc), vec!["b", "c", "a"]);

        let desc = evaluate(&products, &QuerySpec::new().with_sort(SortMode::PriceDesc), Locale::En);
        assert_eq!(ids(&desc), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_newest_sorts_by_id_descending() {
        let products = vec![
            product("p-10", "X", 1.0, 0),
            product("p-9", "X", 1.0, 0),
            product("p-2", "X", 1.0, 0),
        ];
        let results = evaluate(&products, &QuerySpec::new().with_sort(SortMode::Newest), Locale::En);
        // Byte-wise order: "p-9" > "p-2" > "p-10".
        assert_eq!(ids(&results), vec!["p-9", "p-2", "p-10"]);
    }

    #[test]
    fn test_page_beyond_last_is_clamped() {
        let products: Vec<Product> = (0..25).map(|i| product(&format!("{i:02}"), "X", 1.0, 0)).collect();
        let results = evaluate(&products, &QuerySpec::new().with_page(4), Locale::En);
        assert_eq!(results.pagination.total_pages, 3);
        assert_eq!(results.pagination.page, 3);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_price_range_excluding_everything() {
        let products = vec![product("a", "X", 5.0, 0), product("b", "X", 20.0, 0)];
        let spec = QuerySpec::new().with_price_range(PriceRange::from_decimal(100.0, 200.0, Currency::OMR));
        let results = evaluate(&products, &spec, Locale::En);
        assert!(results.is_empty());
        assert_eq!(results.pagination.total_pages, 0);
    }

    #[test]
    fn test_facets_cover_all_pages() {
        let products: Vec<Product> = (0..15)
            .map(|i| product(&format!("{i:02}"), if i % 3 == 0 { "A" } else { "B" }, 1.0, 0))
            .collect();
        let spec = QuerySpec::new().with_facets(true).with_page_size(4);
        let results = evaluate(&products, &spec, Locale::En);

        assert_eq!(results.len(), 4);
        let facets = results.facets.expect("facets requested");
        assert_eq!(facets.brands.value("A").map(|v| v.count), Some(5));
        assert_eq!(facets.brands.value("B").map(|v| v.count), Some(10));
    }

    #[test]
    fn test_facet_brands_keep_catalog_order_under_sort() {
        let products = vec![
            product("a", "Cheap", 1.0, 0),
            product("b", "Pricey", 9.0, 0),
            product("c", "Mid", 5.0, 0),
        ];
        for sort in SortMode::ALL {
            let spec = QuerySpec::new().with_facets(true).with_sort(sort);
            let facets = evaluate(&products, &spec, Locale::En).facets.expect("facets requested");
            let brands: Vec<&str> = facets.brands.values.iter().map(|v| v.value.as_str()).collect();
            assert_eq!(brands, vec!["Cheap", "Pricey", "Mid"], "{sort:?}");
        }
    }

    #[test]
    fn test_facets_omitted_by_default() {
        let products = vec![product("a", "X", 1.0, 0)];
        assert!(evaluate(&products, &QuerySpec::new(), Locale::En).facets.is_none());
    }

    #[test]
    fn test_observer_sees_active_stages() {
        let products = vec![
            product("a", "Solgar", 1.0, 0),
            product("b", "Pfizer", 1.0, 0),
            product("c", "Solgar", 1.0, 0),
        ];
        let spec = QuerySpec::new().with_brand("Solgar").with_page_size(1);
        let mut recorder = Recorder::default();
        let results = evaluate_observed(&products, &spec, Locale::En, &mut recorder);

        assert_eq!(recorder.input, 3);
        assert_eq!(
            recorder.stages,
            vec![
                (Stage::Brand, 2),
                (Stage::Price, 2),
                (Stage::Sort, 2),
                (Stage::Paginate, 1)
            ]
        );
        assert_eq!(recorder.finished, Some(results.pagination));
    }

    #[test]
    fn test_observed_matches_unobserved() {
        let products = vec![product("a", "X", 2.0, 3), product("b", "Y", 1.0, 7)];
        let spec = QuerySpec::new().with_sort(SortMode::PriceAsc);
        let plain = evaluate(&products, &spec, Locale::En);
        let observed = evaluate_observed(&products, &spec, Locale::En, &mut Recorder::default());
        assert_eq!(ids(&plain), ids(&observed));
        assert_eq!(plain.pagination, observed.pagination);
    }
}
