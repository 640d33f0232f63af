//! Product and variant types.

use crate::catalog::ReferenceData;
use crate::ids::{ColorId, ProductId, SizeId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product as fetched from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Base price; variants without an override sell at this price.
    pub price: Money,
    /// Compare-at price (original price for showing discounts).
    #[serde(default)]
    pub compare_price: Option<Money>,
    /// Stock used when the product has no variants.
    #[serde(default)]
    pub inventory_quantity: u32,
    /// Variants, in the order the backend returned them.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Create a product with no variants.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, inventory_quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            compare_price: None,
            inventory_quantity,
            variants: Vec::new(),
        }
    }

    /// Attach variants.
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Check if the product sells through variants.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Sellable stock: the sum of variant stock, or the product's own stock
    /// when there are no variants.
    pub fn total_inventory(&self) -> u64 {
        if self.has_variants() {
            self.variants
                .iter()
                .map(|v| u64::from(v.inventory_quantity))
                .sum()
        } else {
            u64::from(self.inventory_quantity)
        }
    }

    /// Price a variant sells at.
    pub fn price_for(&self, variant: &Variant) -> Money {
        variant.price.unwrap_or(self.price)
    }

    /// Compare-at price shown next to a variant: its own, else the product's.
    pub fn compare_price_for(&self, variant: &Variant) -> Option<Money> {
        variant.compare_price.or(self.compare_price)
    }

    /// Check if the product is on sale (has a higher compare price).
    pub fn is_on_sale(&self) -> bool {
        self.discount_percentage().is_some()
    }

    /// Whole-percent saving against the compare price, rounded to nearest.
    pub fn discount_percentage(&self) -> Option<u32> {
        let compare = self.compare_price?;
        if compare.currency != self.price.currency
            || compare.amount_minor <= self.price.amount_minor
        {
            return None;
        }
        let savings = (compare.amount_minor - self.price.amount_minor) as i128;
        let whole = compare.amount_minor as i128;
        u32::try_from((savings * 100 + whole / 2) / whole).ok()
    }
}

/// A size/color SKU of a product with its own stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Variant {
    /// Backend identity; `None` until the variant has been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantId>,
    #[serde(default, rename = "size")]
    pub size_id: Option<SizeId>,
    #[serde(default, rename = "color")]
    pub color_id: Option<ColorId>,
    #[serde(default)]
    pub inventory_quantity: u32,
    /// Price override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Image URL or upload reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Variant {
    /// Create an unsaved variant.
    pub fn new(size_id: Option<SizeId>, color_id: Option<ColorId>, inventory_quantity: u32) -> Self {
        Self {
            size_id,
            color_id,
            inventory_quantity,
            ..Self::default()
        }
    }

    /// Mark as persisted under `id`.
    pub fn with_id(mut self, id: VariantId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// The `(size, color)` pair that identifies this variant within its product.
    pub fn key(&self) -> (Option<SizeId>, Option<ColorId>) {
        (self.size_id, self.color_id)
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_in_stock(&self) -> bool {
        self.inventory_quantity > 0
    }

    /// Check if at least one axis is set.
    pub fn has_axis(&self) -> bool {
        self.size_id.is_some() || self.color_id.is_some()
    }

    /// Human label such as "M - Red"; "Default" when neither axis is set.
    pub fn label(&self, reference: &ReferenceData) -> String {
        let parts: Vec<&str> = [
            self.size_id
                .and_then(|id| reference.size(id))
                .map(|s| s.name.as_str()),
            self.color_id
                .and_then(|id| reference.color(id))
                .map(|c| c.name.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            "Default".to_string()
        } else {
            parts.join(" - ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Color, Size, SizeCategory};
    use crate::money::Currency;

    fn cop(amount: i64) -> Money {
        Money::new(amount, Currency::COP)
    }

    #[test]
    fn test_product_without_variants() {
        let product = Product::new(ProductId::new(1), "Tee", cop(19_900), 7);
        assert!(!product.has_variants());
        assert_eq!(product.total_inventory(), 7);
    }

    #[test]
    fn test_total_inventory_sums_variants() {
        let product = Product::new(ProductId::new(1), "Tee", cop(19_900), 99).with_variants(vec![
            Variant::new(Some(SizeId::new(1)), None, 3),
            Variant::new(Some(SizeId::new(2)), None, 4),
        ]);
        assert_eq!(product.total_inventory(), 7);
    }

    #[test]
    fn test_price_override_falls_back_to_product() {
        let product = Product::new(ProductId::new(1), "Tee", cop(19_900), 0);
        let plain = Variant::new(Some(SizeId::new(1)), None, 1);
        let premium = Variant::new(Some(SizeId::new(2)), None, 1).with_price(cop(24_900));
        assert_eq!(product.price_for(&plain), cop(19_900));
        assert_eq!(product.price_for(&premium), cop(24_900));
    }

    #[test]
    fn test_compare_price_falls_back_to_product() {
        let mut product = Product::new(ProductId::new(1), "Tee", cop(19_900), 0);
        let plain = Variant::new(Some(SizeId::new(1)), None, 1);
        assert_eq!(product.compare_price_for(&plain), None);

        product.compare_price = Some(cop(25_000));
        let mut marked = plain.clone();
        marked.compare_price = Some(cop(29_900));
        assert_eq!(product.compare_price_for(&plain), Some(cop(25_000)));
        assert_eq!(product.compare_price_for(&marked), Some(cop(29_900)));
    }

    #[test]
    fn test_discount_percentage() {
        let mut product = Product::new(ProductId::new(1), "Tee", cop(20_000), 0);
        assert!(!product.is_on_sale());

        product.compare_price = Some(cop(30_000));
        assert!(product.is_on_sale());
        assert_eq!(product.discount_percentage(), Some(33));

        product.compare_price = Some(cop(15_000));
        assert_eq!(product.discount_percentage(), None);
    }

    #[test]
    fn test_variant_label() {
        let reference = ReferenceData::new(
            vec![Size::new(SizeId::new(1), "M", SizeCategory::Clothing, 1)],
            vec![Color::new(ColorId::new(1), "Red", 1)],
        );
        let both = Variant::new(Some(SizeId::new(1)), Some(ColorId::new(1)), 0);
        let color_only = Variant::new(None, Some(ColorId::new(1)), 0);
        let neither = Variant::new(None, None, 0);

        assert_eq!(both.label(&reference), "M - Red");
        assert_eq!(color_only.label(&reference), "Red");
        assert_eq!(neither.label(&reference), "Default");
    }

    #[test]
    fn test_variant_wire_shape() {
        let json = r#"{"id": 5, "size": 1, "color": null, "inventory_quantity": 2}"#;
        let variant: Variant = serde_json::from_str(json).unwrap();
        assert_eq!(variant.id, Some(VariantId::new(5)));
        assert_eq!(variant.key(), (Some(SizeId::new(1)), None));
        assert!(variant.price.is_none());

        let unsaved = Variant::new(None, Some(ColorId::new(2)), 0);
        let out = serde_json::to_value(&unsaved).unwrap();
        assert!(out.get("id").is_none());
    }
}
