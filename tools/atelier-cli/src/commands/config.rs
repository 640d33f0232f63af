//! Configuration management commands.

use anyhow::{anyhow, bail, Result};
use atelier_commerce::money::Currency;
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.title("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.field("file", path.display()),
        None => ctx.output.field("file", "(defaults)"),
    }

    let store = &ctx.config.store;
    let rule = store.shipping_rule();
    ctx.output.section("store");
    ctx.output.field("currency", store.currency.code());
    ctx.output.price("free_shipping_threshold", rule.free_threshold);
    ctx.output.price("flat_shipping_rate", rule.flat_rate);
    ctx.output.field("max_quantity_per_item", store.max_quantity_per_item);

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = ctx
        .config_path
        .clone()
        .ok_or_else(|| anyhow!("No config file found. Run `atelier config init` to create one."))?;

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.store.validate()?;
    config.save(&config_path)?;

    tracing::debug!(key, value, path = %config_path.display(), "config updated");
    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("atelier.toml");

    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;

        if !overwrite {
            ctx.output.warn("Config init cancelled");
            return Ok(());
        }
    }

    tokio::fs::write(&config_path, generate_default_config()).await?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.title("Validating configuration");

    let store = &ctx.config.store;
    let mut warnings: Vec<String> = Vec::new();

    if store.flat_shipping_rate == 0 {
        warnings.push("store.flat_shipping_rate is 0, so every order ships free".to_string());
    }
    if store.free_shipping_threshold == 0 {
        warnings.push("store.free_shipping_threshold is 0, so any non-empty order ships free".to_string());
    }

    store.validate()?;

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output.success("Configuration is valid (with warnings)");
    }

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();
    let store = &config.store;

    match parts.as_slice() {
        ["store", "currency"] => Ok(store.currency.code().to_string()),
        ["store", "free_shipping_threshold"] => Ok(store.free_shipping_threshold.to_string()),
        ["store", "flat_shipping_rate"] => Ok(store.flat_shipping_rate.to_string()),
        ["store", "max_quantity_per_item"] => Ok(store.max_quantity_per_item.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let store = &mut config.store;

    match parts.as_slice() {
        ["store", "currency"] => {
            store.currency =
                Currency::from_code(value).ok_or_else(|| anyhow!("Unknown currency: {}", value))?
        }
        ["store", "free_shipping_threshold"] => store.free_shipping_threshold = value.parse()?,
        ["store", "flat_shipping_rate"] => store.flat_shipping_rate = value.parse()?,
        ["store", "max_quantity_per_item"] => store.max_quantity_per_item = value.parse()?,
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}
