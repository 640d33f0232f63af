//! Stage variant edits against a product snapshot.

use anyhow::{anyhow, bail, Result};
use atelier_commerce::catalog::{suggest_sku, CatalogSnapshot, SizeCategory, Variant};
use atelier_commerce::editor::EditingSession;
use atelier_commerce::ValidationError;
use chrono::Utc;
use serde::Deserialize;

use super::EditArgs;
use crate::context::Context;

/// One step of an edit script.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum EditOp {
    Add { variant: Variant },
    Update { index: usize, variant: Variant },
    Remove { index: usize },
    Restore { index: usize },
}

impl EditOp {
    fn apply(self, session: &mut EditingSession) -> Result<(), ValidationError> {
        match self {
            EditOp::Add { variant } => session.add(variant).map(|_| ()),
            EditOp::Update { index, variant } => session.update(index, variant),
            EditOp::Remove { index } => session.remove(index),
            EditOp::Restore { index } => session.restore(index),
        }
    }
}

/// Run the edit command.
pub async fn run(args: EditArgs, ctx: &Context) -> Result<()> {
    let snapshot: CatalogSnapshot = ctx.read_json(&args.snapshot).await?;
    let ops: Vec<EditOp> = ctx.read_json(&args.script).await?;
    let category = args
        .category
        .as_deref()
        .map(|name| SizeCategory::from_str(name).ok_or_else(|| anyhow!("Unknown size category: {}", name)))
        .transpose()?;

    let (product, reference) = snapshot.into_parts();
    let mut session = EditingSession::open(&product);

    let mut rejected = 0usize;
    for (step, op) in ops.into_iter().enumerate() {
        ctx.output.step(&format!("step {}: {:?}", step + 1, op));
        if let Err(err) = op.apply(&mut session) {
            if args.strict {
                bail!("Edit {} rejected: {}", step + 1, err);
            }
            rejected += 1;
            ctx.output.warn(&format!("Edit {} rejected: {}", step + 1, err));
        }
    }

    // New variants without a SKU get a suggestion, as the admin form does.
    let suffix = u32::try_from(Utc::now().timestamp_millis().rem_euclid(10_000)).unwrap_or(0);
    let mut payload = session.save_payload();
    for variant in payload.variants.iter_mut().filter(|v| v.id.is_none() && v.sku.is_none()) {
        variant.sku = Some(suggest_sku(&reference, variant.size_id, variant.color_id, suffix));
    }

    if let Some(category) = category {
        let allowed = reference.sizes_for_category(category);
        for variant in &payload.variants {
            if let Some(size_id) = variant.size_id {
                if !allowed.iter().any(|s| s.id == size_id) {
                    ctx.output.warn(&format!(
                        "Variant {} uses a size outside the {} category",
                        variant.label(&reference),
                        category.as_str()
                    ));
                }
            }
        }
    }

    if !ctx.output.is_json() {
        ctx.output.title(&format!("Variants of {}", product.name));
        ctx.output.columns(&["#", "VARIANT", "STOCK", "STATE"], &[3, 20, 6, 16]);
        for (index, variant) in session.entries().iter().enumerate() {
            let state = if session.is_pending_deletion(index) {
                "pending deletion"
            } else if variant.is_persisted() {
                "saved"
            } else {
                "new"
            };
            let position = index.to_string();
            let label = variant.label(&reference);
            let stock = variant.inventory_quantity.to_string();
            ctx.output
                .columns(&[position.as_str(), label.as_str(), stock.as_str(), state], &[3, 20, 6, 16]);
        }
        ctx.output.blank();
        ctx.output.field("total stock", session.total_inventory());
        ctx.output.field("to delete", payload.variants_to_delete.len());
        if rejected > 0 {
            ctx.output.field("rejected edits", rejected);
        }
    }

    match args.out {
        Some(ref path) => {
            ctx.write_json(path, &payload).await?;
            ctx.output.success(&format!("Save payload written to {}", path));
        }
        None => ctx.output.json(&payload),
    }

    Ok(())
}
