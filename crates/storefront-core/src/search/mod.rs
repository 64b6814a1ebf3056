//! Search module.
//!
//! Filter criteria, the predicate engine, sort strategies, and the pipeline
//! that combines them, plus facets, pagination and landing collections.

mod collections;
mod criteria;
mod facets;
mod pagination;
mod pipeline;
mod predicate;
mod sort;

pub use collections::{deals, featured, trending, Collections};
pub use criteria::{
    fold_case, CriteriaInput, CriteriaUpdate, FilterCriteria, FilterCriteriaBuilder, PriceRange,
    RATING_THRESHOLDS,
};
pub use facets::{facets, Facet, FacetType, FacetValue};
pub use pagination::Pagination;
pub use pipeline::{query, ProductQuery, QueryCache, QueryResult};
pub use predicate::{build_predicate, filter, matches, Dimension};
pub use sort::{sort, SortKey};
