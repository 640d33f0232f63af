//! Price a cart under the store's shipping rule.

use anyhow::{Context as _, Result};
use atelier_commerce::cart::{Cart, LineItem, OrderTotals, PricingAnomaly};
use atelier_commerce::money::Money;
use serde::{Deserialize, Serialize};

use super::TotalsArgs;
use crate::context::Context;

/// Cart file contents.
#[derive(Debug, Deserialize)]
struct CartFile {
    items: Vec<LineItem>,
}

#[derive(Serialize)]
struct TotalsReport {
    item_count: u64,
    #[serde(flatten)]
    totals: OrderTotals,
    remaining_for_free_shipping: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    anomaly: Option<PricingAnomaly>,
}

/// Run the totals command.
pub async fn run(args: TotalsArgs, ctx: &Context) -> Result<()> {
    let store = &ctx.config.store;
    store.validate().context("Store configuration is invalid")?;

    let file: CartFile = ctx.read_json(&args.cart).await?;
    let mut cart = Cart::for_store(store);
    for (index, item) in file.items.into_iter().enumerate() {
        cart.add_item(item)
            .with_context(|| format!("Cart item {} rejected", index + 1))?;
    }

    let engine = store.pricing_engine();
    let priced = cart.totals(
        &engine,
        Money::new(args.tax, store.currency),
        Money::new(args.discount, store.currency),
    )?;
    let remaining = engine.remaining_for_free_shipping(priced.totals.subtotal);

    if ctx.output.is_json() {
        ctx.output.json(&TotalsReport {
            item_count: cart.item_count(),
            totals: priced.totals,
            remaining_for_free_shipping: remaining,
            anomaly: priced.anomaly,
        });
        return Ok(());
    }

    ctx.output.title("Cart");
    for item in &cart.items {
        ctx.output.cart_line(item, item.line_total()?);
    }

    let totals = &priced.totals;
    ctx.output.blank();
    ctx.output.price("subtotal", totals.subtotal);
    ctx.output.price("shipping", totals.shipping_cost);
    ctx.output.price("tax", totals.tax_amount);
    ctx.output.price("discount", totals.discount_amount);
    ctx.output.total("total", totals.total);

    if let Some(anomaly) = priced.anomaly {
        ctx.output.warn(&format!("Total floored at zero: {}", anomaly));
    }
    if remaining.is_positive() {
        ctx.output.note(&format!("Add {} more for free shipping", remaining.display()));
    } else {
        ctx.output.success("Shipping is free");
    }

    Ok(())
}
