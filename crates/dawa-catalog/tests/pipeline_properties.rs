//! Property-based tests for the listing pipeline.
//!
//! ## Properties
//!
//! 1. **Idempotence**: evaluating the same spec twice gives the same page
//! 2. **Monotonicity**: adding a filter never grows the result set
//! 3. **Completeness**: walking every page yields each match exactly once
//! 4. **Ordering**: adjacent items respect the sort mode
//! 5. **Stability**: items with equal sort keys keep catalog order
//! 6. **Soundness**: every returned item satisfies every active filter

use std::cmp::Ordering;

use dawa_catalog::prelude::*;
use dawa_catalog::search::MAX_PAGE_SIZE;
use proptest::prelude::*;

const BRANDS: [&str; 4] = ["Solgar", "Pfizer", "Avene", "Nature's Bounty"];
const CATEGORIES: [&str; 3] = ["vitamins", "medicine", "skin-care"];
const TERMS: [&str; 5] = ["", "vit", "SOL", "cream", "zzz"];

fn build_product(
    index: usize,
    brand: usize,
    category: usize,
    price_minor: i64,
    offer_discount: Option<i64>,
    rx: bool,
    reviews: u32,
) -> Product {
    let names = ["Vitamin D3", "Aspirin", "Hydrating Cream", "Zinc"];
    let name = names[(index + brand) % names.len()];
    let mut product = Product::new(
        format!("p{index:03}"),
        LocalizedText::new(name, format!("{name} ع")),
        LocalizedText::new(BRANDS[brand], format!("{} ع", BRANDS[brand])),
        Money::new(price_minor, Currency::OMR),
        CATEGORIES[category],
    )
    .with_prescription(rx)
    .with_reviews(reviews);

    if let Some(discount) = offer_discount {
        let offer = (price_minor - discount).max(1);
        product = product.with_offer(Money::new(offer, Currency::OMR));
    }
    product
}

fn arb_products() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(
        (
            0..BRANDS.len(),
            0..CATEGORIES.len(),
            1i64..60_000,
            prop::option::of(0i64..30_000),
            any::<bool>(),
            // Narrow range so equal review counts (ties) are common.
            0u32..5,
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (brand, category, price, offer, rx, reviews))| {
                build_product(i, brand, category, price, offer, rx, reviews)
            })
            .collect()
    })
}

fn arb_sort() -> impl Strategy<Value = SortMode> {
    prop::sample::select(SortMode::ALL.to_vec())
}

fn arb_spec() -> impl Strategy<Value = QuerySpec> {
    (
        prop::sample::select(TERMS.to_vec()),
        prop::option::of(prop::sample::select(CATEGORIES.to_vec())),
        prop::collection::btree_set(prop::sample::select(BRANDS.to_vec()), 0..3),
        prop::option::of((0i64..30_000, 0i64..60_000)),
        prop::option::of(any::<bool>()),
        any::<bool>(),
        arb_sort(),
        1usize..6,
        1usize..15,
    )
        .prop_map(
            |(term, category, brands, price, rx, offers, sort, page, page_size)| {
                let mut spec = QuerySpec::new()
                    .with_search(term)
                    .with_prescription(rx)
                    .with_offers_only(offers)
                    .with_sort(sort)
                    .with_page(page)
                    .with_page_size(page_size);
                if let Some(category) = category {
                    spec = spec.with_category(category);
                }
                for brand in brands {
                    spec = spec.with_brand(brand);
                }
                if let Some((low, span)) = price {
                    spec = spec.with_price_range(PriceRange::new(
                        Money::new(low, Currency::OMR),
                        Money::new(low + span, Currency::OMR),
                    ));
                }
                spec
            },
        )
}

fn ids(items: &[&Product]) -> Vec<String> {
    items.iter().map(|p| p.id.to_string()).collect()
}

/// Every match, in sorted order, on a single page.
fn all_matches<'a>(products: &'a [Product], spec: &QuerySpec) -> Vec<&'a Product> {
    let spec = spec.clone().with_page(1).with_page_size(MAX_PAGE_SIZE);
    evaluate(products, &spec, Locale::En).items
}

fn catalog_index(products: &[Product], product: &Product) -> usize {
    products
        .iter()
        .position(|p| p.id == product.id)
        .unwrap_or(usize::MAX)
}

proptest! {
    #[test]
    fn prop_evaluate_is_idempotent(products in arb_products(), spec in arb_spec()) {
        let first = evaluate(&products, &spec, Locale::En);
        let second = evaluate(&products, &spec, Locale::En);
        prop_assert_eq!(ids(&first.items), ids(&second.items));
        prop_assert_eq!(first.pagination, second.pagination);
    }

    #[test]
    fn prop_adding_offers_filter_never_grows(products in arb_products(), spec in arb_spec()) {
        let loose = all_matches(&products, &spec.clone().with_offers_only(false));
        let strict = all_matches(&products, &spec.with_offers_only(true));
        prop_assert!(strict.len() <= loose.len());
        for product in &strict {
            prop_assert!(loose.iter().any(|p| p.id == product.id));
        }
    }

    #[test]
    fn prop_adding_brand_filter_never_grows(
        products in arb_products(),
        spec in arb_spec(),
        brand in prop::sample::select(BRANDS.to_vec()),
    ) {
        let mut loose_spec = spec.clone();
        loose_spec.brands.clear();
        let loose = evaluate(&products, &loose_spec, Locale::En).pagination.total;
        let strict = evaluate(&products, &loose_spec.with_brand(brand), Locale::En).pagination.total;
        prop_assert!(strict <= loose);
    }

    #[test]
    fn prop_narrowing_price_range_never_grows(
        products in arb_products(),
        spec in arb_spec(),
        low in 0i64..30_000,
        span in 0i64..30_000,
    ) {
        let wide = spec.price_range;
        let narrow = PriceRange {
            min_minor: wide.min_minor.max(low),
            max_minor: wide.max_minor.min(low.saturating_add(span)),
        };
        let loose = all_matches(&products, &spec);
        let strict = all_matches(&products, &spec.with_price_range(narrow));
        prop_assert!(strict.len() <= loose.len());
        for product in &strict {
            prop_assert!(loose.iter().any(|p| p.id == product.id));
        }
    }

    #[test]
    fn prop_setting_prescription_never_grows(
        products in arb_products(),
        spec in arb_spec(),
        required in any::<bool>(),
    ) {
        let loose = all_matches(&products, &spec.clone().with_prescription(None));
        let strict = all_matches(&products, &spec.with_prescription(Some(required)));
        prop_assert!(strict.len() <= loose.len());
        for product in &strict {
            prop_assert!(loose.iter().any(|p| p.id == product.id));
            prop_assert_eq!(product.prescription_required, required);
        }
    }

    #[test]
    fn prop_pages_cover_matches_exactly_once(products in arb_products(), spec in arb_spec()) {
        let expected = ids(&all_matches(&products, &spec));
        let first = evaluate(&products, &spec.clone().with_page(1), Locale::En);
        let total_pages = first.pagination.total_pages;

        let mut walked = Vec::new();
        for page in 1..=total_pages {
            let results = evaluate(&products, &spec.clone().with_page(page), Locale::En);
            prop_assert_eq!(results.pagination.page, page);
            prop_assert!(results.len() <= spec.page_size);
            walked.extend(ids(&results.items));
        }

        prop_assert_eq!(walked.len(), first.pagination.total);
        prop_assert_eq!(walked, expected);
    }

    #[test]
    fn prop_page_is_clamped(products in arb_products(), spec in arb_spec()) {
        let results = evaluate(&products, &spec, Locale::En);
        let pagination = results.pagination;
        prop_assert!(pagination.page >= 1);
        prop_assert!(pagination.page <= pagination.total_pages.max(1));
        if pagination.total == 0 {
            prop_assert_eq!(pagination.total_pages, 0);
            prop_assert!(results.is_empty());
        } else {
            prop_assert!(!results.is_empty());
        }
    }

    #[test]
    fn prop_adjacent_items_are_ordered(products in arb_products(), spec in arb_spec()) {
        let matches = all_matches(&products, &spec);
        for pair in matches.windows(2) {
            prop_assert_ne!(spec.sort.compare(pair[0], pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn prop_ties_keep_catalog_order(products in arb_products(), sort in arb_sort()) {
        let spec = QuerySpec::new().with_sort(sort);
        let matches = all_matches(&products, &spec);
        for pair in matches.windows(2) {
            if sort.compare(pair[0], pair[1]) == Ordering::Equal {
                prop_assert!(catalog_index(&products, pair[0]) < catalog_index(&products, pair[1]));
            }
        }
    }

    #[test]
    fn prop_results_satisfy_every_filter(
        products in arb_products(),
        spec in arb_spec(),
        arabic in any::<bool>(),
    ) {
        let locale = if arabic { Locale::Ar } else { Locale::En };
        let results = evaluate(&products, &spec, locale);
        let filters = spec.filters();
        for product in &results.items {
            for filter in &filters {
                prop_assert!(filter.matches(product, locale));
            }
        }
    }

    #[test]
    fn prop_input_is_untouched(products in arb_products(), spec in arb_spec()) {
        let before = products.clone();
        let _ = evaluate(&products, &spec, Locale::En);
        prop_assert_eq!(before, products);
    }
}

#[test]
fn test_empty_catalog_yields_empty_first_page() {
    let results = evaluate(&[], &QuerySpec::new().with_page(7), Locale::En);
    assert!(results.items.is_empty());
    assert_eq!(results.pagination.total, 0);
    assert_eq!(results.pagination.total_pages, 0);
    assert_eq!(results.pagination.page, 1);
}

#[test]
fn test_search_without_match() {
    let products: Vec<Product> = (0..5)
        .map(|i| build_product(i, i % 4, i % 3, 1_000, None, false, 0))
        .collect();
    let results = evaluate(&products, &QuerySpec::new().with_search("zzzqqq"), Locale::En);
    assert!(results.is_empty());
    assert_eq!(results.pagination.total, 0);
}

#[test]
fn test_price_range_outside_catalog() {
    let products: Vec<Product> = (0..5)
        .map(|i| build_product(i, 0, 0, 5_000 + i as i64 * 1_000, None, false, 0))
        .collect();
    let spec = QuerySpec::new().with_price_range(PriceRange::from_decimal(100.0, 200.0, Currency::OMR));
    assert_eq!(evaluate(&products, &spec, Locale::En).pagination.total, 0);
}

#[test]
fn test_pagination_boundary_25_items() {
    let products: Vec<Product> = (0..25)
        .map(|i| build_product(i, 0, 0, 1_000, None, false, 0))
        .collect();

    let spec = QuerySpec::new().with_page_size(12).with_page(3);
    let results = evaluate(&products, &spec, Locale::En);
    assert_eq!(results.pagination.total_pages, 3);
    assert_eq!(results.len(), 1);
    assert_eq!(results.items[0].id.as_str(), "p024");

    let clamped = evaluate(&products, &spec.with_page(4), Locale::En);
    assert_eq!(clamped.pagination.page, 3);
    assert_eq!(ids(&clamped.items), vec!["p024".to_string()]);
}

#[test]
fn test_offers_only_three_of_ten() {
    let products: Vec<Product> = (0..10)
        .map(|i| {
            let offer = [1, 4, 7].contains(&i).then_some(200);
            build_product(i, 0, 0, 1_000, offer, false, 0)
        })
        .collect();

    let results = evaluate(&products, &QuerySpec::new().with_offers_only(true), Locale::En);
    assert_eq!(results.pagination.total, 3);
    assert!(results.items.iter().all(|p| p.has_offer()));
}
