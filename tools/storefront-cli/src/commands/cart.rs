//! Build a cart from product ids and print its pricing.

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use storefront_core::cart::{Cart, CartLine, PricingBreakdown};
use storefront_core::{ProductId, ProductLookup};

use super::CartArgs;
use crate::context::Context;
use crate::output::{deduction, stock_badge};

#[derive(Serialize)]
struct CartOutput<'a> {
    lines: Vec<CartLine<'a>>,
    pricing: PricingBreakdown,
}

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(&args.catalog)?;
    let mut cart = Cart::new();

    for item in &args.items {
        let (id, quantity) = parse_item(item)?;
        if catalog.find(&id).is_none() {
            ctx.output.warn(&format!("Product {} is not in the catalog", id));
            continue;
        }
        cart.add(&catalog, &id, quantity);
    }

    let lines = cart.lines(&catalog)?;
    let pricing = cart.compute_pricing(&catalog, &ctx.config.pricing)?;

    if ctx.output.is_json() {
        ctx.output.json(&CartOutput {
            lines,
            pricing,
        });
        return Ok(());
    }

    ctx.output
        .debug(&format!("Cart {} has {} lines", cart.id, cart.line_count()));

    if cart.is_empty() {
        ctx.output.warn("Your cart is empty");
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", pricing.item_count));
    for line in &lines {
        ctx.output.list_item(&format!(
            "{} x{} @ {} = {} ({})",
            line.product.name,
            line.quantity,
            line.product.price.display(),
            line.line_total.display(),
            stock_badge(line.product)
        ));
    }

    ctx.output.header("Summary");
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    if pricing.has_savings() {
        ctx.output.kv(
            "Discount",
            &format!(
                "{} ({:.1}%)",
                deduction(pricing.total_discount),
                pricing.savings_percentage()
            ),
        );
    }
    let shipping = if pricing.free_shipping_applied {
        "FREE".to_string()
    } else {
        pricing.shipping_cost.display()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &pricing.tax_amount.display());
    ctx.output.kv("Total", &pricing.grand_total.display());

    if pricing.free_shipping_applied {
        ctx.output.success("Free shipping applied");
    } else {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            pricing.amount_to_free_shipping.display()
        ));
    }

    Ok(())
}

/// Parse `id` or `id:quantity`.
fn parse_item(item: &str) -> Result<(ProductId, i64)> {
    let (id, quantity) = match item.split_once(':') {
        Some((id, qty)) => {
            let qty: i64 = qty
                .trim()
                .parse()
                .with_context(|| format!("Invalid quantity in '{}'", item))?;
            (id.trim(), qty)
        }
        None => (item.trim(), 1),
    };
    if id.is_empty() {
        bail!("Empty product id in '{}'", item);
    }
    if quantity <= 0 {
        bail!("Quantity must be positive in '{}'", item);
    }
    Ok((ProductId::from(id), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let (id, qty) = parse_item("7").unwrap();
        assert_eq!(id.as_str(), "7");
        assert_eq!(qty, 1);

        let (id, qty) = parse_item("3:2").unwrap();
        assert_eq!(id.as_str(), "3");
        assert_eq!(qty, 2);

        assert!(parse_item("3:0").is_err());
        assert!(parse_item(":2").is_err());
        assert!(parse_item("3:x").is_err());
    }
}
