//! Listing page headings and summaries.

use crate::catalog::Category;
use crate::locale::Locale;
use crate::search::{Pagination, QuerySpec};

/// Listing heading.
///
/// A known category wins over a search term; an unknown category id falls
/// through to the search or generic heading.
pub fn heading(spec: &QuerySpec, categories: &[Category], locale: Locale) -> String {
    let category = spec
        .category
        .as_ref()
        .and_then(|id| categories.iter().find(|c| &c.id == id));
    if let Some(category) = category {
        return category.localized_name(locale).to_string();
    }

    if !spec.search_term.is_empty() {
        let prefix = locale.pick("Search Results for", "نتائج البحث عن");
        return format!("{prefix}: \"{}\"", spec.search_term);
    }

    locale.pick("All Products", "جميع المنتجات").to_string()
}

/// "Showing X of Y products", where X is the number of items on the page.
pub fn result_summary(pagination: &Pagination, locale: Locale) -> String {
    let shown = pagination.range().len();
    match locale {
        Locale::En => format!("Showing {shown} of {} products", pagination.total),
        Locale::Ar => format!("عرض {shown} من {} منتجات", pagination.total),
    }
}

pub fn no_results(locale: Locale) -> &'static str {
    locale.pick("No Products Found", "لم يتم العثور على منتجات")
}
