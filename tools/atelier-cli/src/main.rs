//! Atelier CLI - command line access to variant selection, variant editing
//! and cart pricing.
//!
//! Commands:
//! - `atelier resolve` - Resolve a size/color/quantity selection against a product snapshot
//! - `atelier edit` - Stage variant edits and print the save payload
//! - `atelier totals` - Price a cart under the store's shipping rule
//! - `atelier config` - Manage store configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{ConfigArgs, EditArgs, ResolveArgs, TotalsArgs};

/// Atelier CLI - Resolve variants, stage variant edits and price carts
#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a selection against a product snapshot
    Resolve(ResolveArgs),

    /// Apply variant edits to a product snapshot
    Edit(EditArgs),

    /// Compute order totals for a cart
    Totals(TotalsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "atelier_commerce=debug,atelier_cli=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args, &ctx).await,
        Commands::Edit(args) => commands::edit::run(args, &ctx).await,
        Commands::Totals(args) => commands::totals::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
