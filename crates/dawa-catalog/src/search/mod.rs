//! Search module.
//!
//! Contains the listing pipeline plus the types around it: query specs,
//! filters, facets, pagination and page labels.

mod facets;
mod filter;
mod labels;
mod pipeline;
mod query;
mod results;

pub use facets::{Facet, FacetType, FacetValue, ListingFacets, PriceBounds};
pub use filter::Filter;
pub use labels::{heading, no_results, result_summary};
pub use pipeline::{evaluate, evaluate_observed, NoopObserver, Stage, StageObserver};
pub use query::{parse_tri_state, PriceRange, QuerySpec, SortMode, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use results::{PageLink, Pagination, SearchResults, PAGE_WINDOW_RADIUS};
