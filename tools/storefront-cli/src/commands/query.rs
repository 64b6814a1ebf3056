//! Filter and sort a catalog.

use anyhow::{Context as _, Result};
use serde::Serialize;
use storefront_core::search::{Facet, FilterCriteria, ProductQuery, QueryResult, SortKey};

use super::QueryArgs;
use crate::context::Context;

#[derive(Serialize)]
struct QueryOutput<'a> {
    sort: SortKey,
    criteria: &'a FilterCriteria,
    #[serde(flatten)]
    result: QueryResult<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facets: Option<Vec<Facet>>,
}

/// Run the query command.
pub fn run(args: QueryArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(&args.catalog)?;
    let criteria = build_criteria(&args)?;
    let sort_key: SortKey = args.sort.parse()?;

    let mut query = ProductQuery::new(criteria, sort_key);
    if let Some(nav) = &args.nav_category {
        query = query.with_navigation_category(nav.clone());
    }

    let per_page = args.per_page.unwrap_or(ctx.config.catalog.page_size);
    let result = query.run_paged(catalog.get_all(), args.page, per_page);
    let facets = args.facets.then(|| query.facets(catalog.get_all()));

    if ctx.output.is_json() {
        ctx.output.json(&QueryOutput {
            sort: sort_key,
            criteria: &query.criteria,
            result,
            facets,
        });
        return Ok(());
    }

    if result.is_empty() {
        ctx.output.warn("No products found. Try clearing some filters.");
        return Ok(());
    }

    let p = result.pagination;
    ctx.output.header(&format!(
        "{} products, sorted by {}",
        result.total,
        sort_key.display_name()
    ));
    ctx.output.product_table(&result.products);
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {}/{})",
        p.start_item(),
        p.end_item(),
        p.total,
        p.page,
        p.total_pages
    ));

    if let Some(facets) = facets {
        for facet in facets {
            ctx.output.header(&facet.name);
            for value in &facet.values {
                let marker = if value.selected { " (selected)" } else { "" };
                ctx.output
                    .list_item(&format!("{} [{}]{}", value.value, value.count, marker));
            }
        }
    }

    Ok(())
}

fn build_criteria(args: &QueryArgs) -> Result<FilterCriteria> {
    let mut builder = FilterCriteria::builder();
    for category in &args.categories {
        builder = builder.category(category.as_str());
    }
    for brand in &args.brands {
        builder = builder.brand(brand.as_str());
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        builder = builder.price_range(
            args.min_price.unwrap_or(0),
            args.max_price.unwrap_or(i64::MAX),
        );
    }
    for rating in &args.ratings {
        builder = builder.min_rating(*rating);
    }
    builder.build().context("Invalid filter")
}
