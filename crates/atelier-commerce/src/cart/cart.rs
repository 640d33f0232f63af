//! Cart and line item types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{PricedTotals, PricingEngine};
use crate::catalog::{Product, ReferenceData};
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::ids::{ProductId, VariantId};
use crate::money::{Currency, Money};
use crate::selection::{clamp_quantity, Resolution};

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
    /// Largest quantity a single line may hold.
    pub max_quantity_per_item: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency, max_quantity_per_item: u32) -> Self {
        let now = Utc::now();
        Self {
            items: Vec::new(),
            currency,
            max_quantity_per_item,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an empty cart with the store's currency and quantity cap.
    pub fn for_store(config: &StoreConfig) -> Self {
        Self::new(config.currency, config.max_quantity_per_item)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn check_limit(&self, quantity: u32) -> Result<(), CommerceError> {
        if quantity > self.max_quantity_per_item {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                self.max_quantity_per_item,
            ));
        }
        Ok(())
    }

    /// Bound a line quantity to the stock it was resolved against.
    fn bound_to_stock(quantity: u32, available: Option<u32>) -> Result<u32, CommerceError> {
        let Some(available) = available else {
            return Ok(quantity);
        };
        let bounded = clamp_quantity(i64::from(quantity), available);
        if bounded == 0 {
            return Err(CommerceError::OutOfStock);
        }
        if bounded < quantity {
            tracing::debug!(requested = quantity, available, "line quantity clamped to stock");
        }
        Ok(bounded)
    }

    /// Add an item to the cart.
    ///
    /// A line for the same product and variant absorbs the quantity and keeps
    /// its original unit price. Lines that know their stock never hold more
    /// than it: the merged quantity is clamped down. Returns the position of
    /// the line.
    ///
    /// Returns an error if:
    /// - Quantity is zero
    /// - The item is priced in another currency
    /// - The stock behind the line is gone
    /// - The line would exceed the quantity cap
    pub fn add_item(&mut self, mut item: LineItem) -> Result<usize, CommerceError> {
        if item.quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        if let Some(position) = self.position(item.product_id, item.variant_id) {
            let existing = &self.items[position];
            let available = item.available.or(existing.available);
            let merged = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            let new_quantity = Self::bound_to_stock(merged, available)?;
            self.check_limit(new_quantity)?;
            let line = &mut self.items[position];
            line.quantity = new_quantity;
            line.available = available;
            self.touch();
            return Ok(position);
        }

        item.quantity = Self::bound_to_stock(item.quantity, item.available)?;
        self.check_limit(item.quantity)?;
        self.items.push(item);
        self.touch();
        Ok(self.items.len() - 1)
    }

    /// Set the quantity of a line. Zero removes it.
    ///
    /// A line that knows its stock is clamped to it. Returns whether a line
    /// was found.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        variant_id: Option<VariantId>,
        quantity: u32,
    ) -> Result<bool, CommerceError> {
        if quantity == 0 {
            return Ok(self.remove_item(product_id, variant_id));
        }
        let Some(position) = self.position(product_id, variant_id) else {
            return Ok(false);
        };
        let quantity = Self::bound_to_stock(quantity, self.items[position].available)?;
        self.check_limit(quantity)?;
        self.items[position].quantity = quantity;
        self.touch();
        Ok(true)
    }

    /// Remove a line from the cart.
    pub fn remove_item(&mut self, product_id: ProductId, variant_id: Option<VariantId>) -> bool {
        let len_before = self.items.len();
        self.items
            .retain(|i| !(i.product_id == product_id && i.variant_id == variant_id));
        let removed = self.items.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    fn position(&self, product_id: ProductId, variant_id: Option<VariantId>) -> Option<usize> {
        self.items
            .iter()
            .position(|i| i.product_id == product_id && i.variant_id == variant_id)
    }

    /// Get a line by product and variant.
    pub fn get_item(&self, product_id: ProductId, variant_id: Option<VariantId>) -> Option<&LineItem> {
        self.position(product_id, variant_id).map(|p| &self.items[p])
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Price the cart.
    pub fn totals(
        &self,
        engine: &PricingEngine,
        tax_amount: Money,
        discount_amount: Money,
    ) -> Result<PricedTotals, CommerceError> {
        engine.totals(&self.items, tax_amount, discount_amount)
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: ProductId,
    /// `None` for products sold without variants.
    pub variant_id: Option<VariantId>,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Variant label such as "M - Red".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_label: Option<String>,
    pub quantity: u32,
    /// Price captured when the item was selected.
    pub unit_price: Money,
    /// Stock of the variant when it was selected. `None` leaves the line
    /// bounded only by the cart's quantity cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<u32>,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        product_id: ProductId,
        variant_id: Option<VariantId>,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id,
            variant_id,
            product_name: product_name.into(),
            variant_label: None,
            quantity,
            unit_price,
            available: None,
        }
    }

    /// Bound this line to `available` units of stock.
    pub fn with_available(mut self, available: u32) -> Self {
        self.available = Some(available);
        self
    }

    /// Capture a resolved selection as a line.
    ///
    /// The quantity goes through [`clamp_quantity`] against the resolved
    /// inventory, and the line remembers that inventory for later merges and
    /// updates. Returns `None` when there is no stock behind the resolution.
    pub fn from_resolution(
        product: &Product,
        resolution: &Resolution<'_>,
        reference: &ReferenceData,
        quantity: u32,
    ) -> Option<Self> {
        if !resolution.can_purchase() {
            return None;
        }
        let quantity = clamp_quantity(i64::from(quantity), resolution.inventory);
        if quantity == 0 {
            return None;
        }
        Some(Self {
            product_id: product.id,
            variant_id: resolution.variant_id(),
            product_name: product.name.clone(),
            variant_label: resolution.variant.map(|v| v.label(reference)),
            quantity,
            unit_price: resolution.price,
            available: Some(resolution.inventory),
        })
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price.checked_mul(self.quantity)
    }
}
