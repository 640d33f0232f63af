//! CLI command implementations.

pub mod config;
pub mod edit;
pub mod resolve;
pub mod totals;

use clap::{Args, Subcommand};

/// Arguments for the resolve command.
#[derive(Args)]
pub struct ResolveArgs {
    /// Product snapshot (JSON with `product`, `sizes`, `colors`).
    pub snapshot: String,

    /// Size id to pick.
    #[arg(short, long)]
    pub size: Option<i64>,

    /// Color id to pick.
    #[arg(short = 'k', long)]
    pub color: Option<i64>,

    /// Requested quantity, as typed by the shopper.
    #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
    pub quantity: String,
}

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Product snapshot (JSON with `product`, `sizes`, `colors`).
    pub snapshot: String,

    /// Edit script: a JSON array of `add`, `update`, `remove` and `restore` operations.
    #[arg(short, long)]
    pub script: String,

    /// Size category the product uses; sizes of other categories are flagged.
    #[arg(long)]
    pub category: Option<String>,

    /// Stop at the first rejected edit.
    #[arg(long)]
    pub strict: bool,

    /// Write the save payload to this file instead of printing it.
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Arguments for the totals command.
#[derive(Args)]
pub struct TotalsArgs {
    /// Cart file (JSON with an `items` array of line items).
    pub cart: String,

    /// Tax amount in minor units.
    #[arg(long, default_value_t = 0)]
    pub tax: i64,

    /// Discount amount in minor units.
    #[arg(long, default_value_t = 0)]
    pub discount: i64,
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
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Overwrite an existing config without asking.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
