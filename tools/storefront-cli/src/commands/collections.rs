//! Landing-page collections.

use anyhow::Result;
use storefront_core::catalog::Product;
use storefront_core::search::Collections;

use super::CollectionsArgs;
use crate::context::Context;

/// Run the collections command.
pub fn run(args: CollectionsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(&args.catalog)?;
    let settings = &ctx.config.catalog;
    let collections = Collections::build(catalog.get_all(), settings);

    if ctx.output.is_json() {
        ctx.output.json(&collections);
        return Ok(());
    }

    section(ctx, "Featured", &collections.featured);
    section(
        ctx,
        &format!("Deals (over {}% off)", settings.deal_discount_percent),
        &collections.deals,
    );
    section(
        ctx,
        &format!("Trending (rated {:.1}+)", settings.trending_min_rating),
        &collections.trending,
    );

    Ok(())
}

fn section(ctx: &Context, title: &str, products: &[&Product]) {
    ctx.output.header(title);
    if products.is_empty() {
        ctx.output.info("Nothing here yet");
    } else {
        ctx.output.product_table(products);
    }
}
