//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use storefront_core::config::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let pricing = &ctx.config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", pricing.currency.code());
    ctx.output.kv(
        "free_shipping_threshold",
        &format!("{} ({})", pricing.free_shipping_threshold, pricing.threshold().display()),
    );
    ctx.output.kv(
        "flat_shipping_fee",
        &format!("{} ({})", pricing.flat_shipping_fee, pricing.shipping_fee().display()),
    );
    ctx.output.kv("tax_rate", &pricing.tax_rate.to_string());

    let catalog = &ctx.config.catalog;
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("featured_count", &catalog.featured_count.to_string());
    ctx.output
        .kv("deal_discount_percent", &catalog.deal_discount_percent.to_string());
    ctx.output
        .kv("trending_min_rating", &catalog.trending_min_rating.to_string());
    ctx.output.kv("page_size", &catalog.page_size.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, StorefrontConfig::default_toml())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.validate() {
        ctx.output.error(&format!("Error: {}", e));
        bail!("Configuration is invalid");
    }

    let pricing = &ctx.config.pricing;
    if pricing.free_shipping_threshold == 0 {
        warnings.push(
            "pricing.free_shipping_threshold is 0, any cart with a positive subtotal ships free"
                .to_string(),
        );
    }
    if pricing.tax_rate == 0.0 {
        warnings.push("pricing.tax_rate is 0, no tax will be charged".to_string());
    }
    if ctx.config.catalog.featured_count == 0 {
        warnings.push("catalog.featured_count is 0, the featured strip is empty".to_string());
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
