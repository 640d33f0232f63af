//! Resolve a shopper's selection against a product snapshot.

use anyhow::Result;
use atelier_commerce::catalog::CatalogSnapshot;
use atelier_commerce::ids::{ColorId, SizeId};
use atelier_commerce::selection::{clamp_quantity_input, Selection, SelectionEvent, SelectionResolver};
use serde::Serialize;

use super::ResolveArgs;
use crate::context::Context;

#[derive(Serialize)]
struct ResolveReport {
    selection: Selection,
    available_sizes: Vec<SizeId>,
    available_colors: Vec<ColorId>,
    price: atelier_commerce::Money,
    inventory: u32,
    variant: Option<atelier_commerce::catalog::Variant>,
    availability: atelier_commerce::selection::Availability,
    can_purchase: bool,
}

/// Run the resolve command.
pub async fn run(args: ResolveArgs, ctx: &Context) -> Result<()> {
    let snapshot: CatalogSnapshot = ctx.read_json(&args.snapshot).await?;
    let (product, reference) = snapshot.into_parts();
    let resolver = SelectionResolver::new(&product, &reference);

    // Picks are replayed in page order: size first, then color.
    let mut selection = Selection::default();
    if let Some(size_id) = args.size {
        selection = resolver.apply(&selection, SelectionEvent::PickSize { size_id: SizeId::new(size_id) });
    }
    if let Some(color_id) = args.color {
        let before = selection;
        selection = resolver.apply(&selection, SelectionEvent::PickColor { color_id: ColorId::new(color_id) });
        if before.selected_size_id.is_some() && selection.selected_size_id.is_none() {
            ctx.output.warn("Picked size has no stock in this color; size cleared");
        }
    }

    let resolution = resolver.resolve(&selection);
    selection.quantity = clamp_quantity_input(&args.quantity, resolution.inventory);
    ctx.output.step(&format!(
        "requested quantity {:?}, bounded to {}",
        args.quantity, selection.quantity
    ));

    let available_sizes = resolver.available_sizes(&selection);
    let available_colors = resolver.available_colors(&selection);

    if ctx.output.is_json() {
        ctx.output.json(&ResolveReport {
            selection,
            available_sizes: available_sizes.iter().map(|s| s.id).collect(),
            available_colors: available_colors.iter().map(|c| c.id).collect(),
            price: resolution.price,
            inventory: resolution.inventory,
            variant: resolution.variant.cloned(),
            availability: resolution.availability,
            can_purchase: resolution.can_purchase(),
        });
        return Ok(());
    }

    ctx.output.title(&product.name);

    ctx.output.section("sizes");
    for size in &available_sizes {
        ctx.output.option(&size.name, size.id);
    }
    ctx.output.section("colors");
    for color in &available_colors {
        ctx.output.option(&color.name, color.id);
    }

    ctx.output.blank();
    ctx.output.availability(resolution.availability);
    if let Some(variant) = resolution.variant {
        ctx.output.field("variant", variant.label(&reference));
        if let Some(ref sku) = variant.sku {
            ctx.output.field("sku", sku);
        }
    }
    ctx.output.price("price", resolution.price);
    let compare_price = resolution
        .variant
        .map_or(product.compare_price, |v| product.compare_price_for(v));
    if let Some(compare) = compare_price {
        if compare.amount_minor > resolution.price.amount_minor {
            ctx.output.price("compare at", compare);
        }
    }
    ctx.output.stock("in stock", resolution.inventory);
    ctx.output.field("quantity", selection.quantity);

    if resolution.can_purchase() {
        ctx.output.success("Ready to add to cart");
    } else {
        ctx.output.warn("Add to cart is unavailable for this selection");
    }

    Ok(())
}
