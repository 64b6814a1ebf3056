//! CLI command implementations.

pub mod cart;
pub mod collections;
pub mod config;
pub mod query;

use clap::{Args, Subcommand};

/// Arguments for the query command.
#[derive(Args)]
pub struct QueryArgs {
    /// Catalog file (JSON array of products).
    #[arg(long)]
    pub catalog: String,

    /// Category to include (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Brand to include (repeatable).
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Lowest price, in minor units.
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Highest price, in minor units.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Minimum rating threshold (repeatable; any one is enough).
    #[arg(long = "rating")]
    pub ratings: Vec<f64>,

    /// Category selected from navigation.
    #[arg(long)]
    pub nav_category: Option<String>,

    /// Sort key: featured, price-asc, price-desc, rating-desc, newest.
    #[arg(short, long, default_value = "featured")]
    pub sort: String,

    /// Page to show (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Items per page (default: catalog.page_size).
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Include facet counts.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Catalog file (JSON array of products).
    #[arg(long)]
    pub catalog: String,

    /// Items as `id` or `id:quantity`.
    #[arg(required = true)]
    pub items: Vec<String>,
}

/// Arguments for the collections command.
#[derive(Args)]
pub struct CollectionsArgs {
    /// Catalog file (JSON array of products).
    #[arg(long)]
    pub catalog: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
