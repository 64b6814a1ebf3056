//! Query pipeline: catalog, then filter, then sort.
//!
//! [`query`] is a pure function of its inputs. [`QueryCache`] relies on that
//! to skip re-evaluation when nothing changed.

use crate::catalog::Product;
use crate::search::criteria::{fold_case, FilterCriteria};
use crate::search::facets::{facets, Facet};
use crate::search::pagination::Pagination;
use crate::search::predicate::build_predicate;
use crate::search::sort::{sort, SortKey};
use serde::{Deserialize, Serialize};

/// The three inputs a result set depends on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Category chosen from navigation, applied on top of `criteria`.
    pub navigation_category: Option<String>,
    pub criteria: FilterCriteria,
    pub sort_key: SortKey,
}

impl ProductQuery {
    pub fn new(criteria: FilterCriteria, sort_key: SortKey) -> Self {
        Self {
            navigation_category: None,
            criteria,
            sort_key,
        }
    }

    pub fn with_navigation_category(mut self, category: impl Into<String>) -> Self {
        self.navigation_category = Some(category.into());
        self
    }

    /// Evaluate against `products`.
    pub fn run<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        query(
            products,
            self.navigation_category.as_deref(),
            &self.criteria,
            self.sort_key,
        )
    }

    /// Evaluate and cut out one page.
    pub fn run_paged<'a>(
        &self,
        products: &'a [Product],
        page: usize,
        per_page: usize,
    ) -> QueryResult<'a> {
        QueryResult::paginate(self.run(products), page, per_page)
    }

    /// Sidebar facets over all of `products`, with this query's selections
    /// marked. Counts do not depend on which page is shown.
    pub fn facets(&self, products: &[Product]) -> Vec<Facet> {
        facets(products, &self.criteria)
    }
}

/// Filter `products` by the navigation category and `criteria`, then sort.
///
/// A navigation category is an extra required category: when the explicit
/// category set is non-empty and does not include it, the result is empty.
/// An empty result is a normal outcome.
pub fn query<'a>(
    products: &'a [Product],
    navigation_category: Option<&str>,
    criteria: &FilterCriteria,
    sort_key: SortKey,
) -> Vec<&'a Product> {
    let navigation = navigation_category
        .map(fold_case)
        .filter(|c| !c.is_empty());
    let predicate = build_predicate(criteria);

    let filtered: Vec<&Product> = products
        .iter()
        .filter(|p| match &navigation {
            Some(nav) => fold_case(&p.category) == *nav,
            None => true,
        })
        .filter(|p| predicate(*p))
        .collect();
    let sorted = sort(&filtered, sort_key);

    tracing::debug!(
        input = products.len(),
        output = sorted.len(),
        navigation = navigation.as_deref().unwrap_or(""),
        sort = %sort_key,
        "query evaluated"
    );
    sorted
}

/// One page of a query result.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<'a> {
    /// Products on this page, in sorted order.
    pub products: Vec<&'a Product>,
    /// Matches across all pages.
    pub total: usize,
    pub pagination: Pagination,
}

impl<'a> QueryResult<'a> {
    fn paginate(all: Vec<&'a Product>, page: usize, per_page: usize) -> Self {
        let pagination = Pagination::new(page, per_page, all.len());
        Self {
            products: pagination.slice(&all).to_vec(),
            total: all.len(),
            pagination,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Memoizes the most recent query over a fixed product slice.
#[derive(Debug)]
pub struct QueryCache<'a> {
    products: &'a [Product],
    last: Option<(ProductQuery, Vec<&'a Product>)>,
    evaluations: usize,
}

impl<'a> QueryCache<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        Self {
            products,
            last: None,
            evaluations: 0,
        }
    }

    /// Result for `q`, recomputed only when `q` differs from the last call.
    pub fn get(&mut self, q: &ProductQuery) -> &[&'a Product] {
        let stale = !matches!(&self.last, Some((prev, _)) if prev == q);
        if stale {
            self.evaluations += 1;
            let result = q.run(self.products);
            self.last = Some((q.clone(), result));
        }
        match &self.last {
            Some((_, result)) => result,
            None => &[],
        }
    }

    /// How many times the pipeline actually ran.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}
