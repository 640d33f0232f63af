//! Mutually constrained size/color selection.

use serde::{Deserialize, Serialize};

use crate::catalog::{Color, Product, ReferenceData, Size, Variant, VariantMatrix};
use crate::ids::{ColorId, SizeId, VariantId};
use crate::money::Money;
use crate::selection::clamp_quantity;

/// What the shopper has picked so far on a product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Selection {
    pub selected_size_id: Option<SizeId>,
    pub selected_color_id: Option<ColorId>,
    pub quantity: u32,
}

impl Selection {
    pub fn new(size_id: Option<SizeId>, color_id: Option<ColorId>, quantity: u32) -> Self {
        Self {
            selected_size_id: size_id,
            selected_color_id: color_id,
            quantity,
        }
    }
}

/// A discrete input from the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    PickSize { size_id: SizeId },
    PickColor { color_id: ColorId },
    /// Raw requested quantity; may be negative.
    SetQuantity { quantity: i64 },
}

/// Why the resolved selection can or cannot be bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// The product has no variants; its own price and stock apply.
    ProductDefault,
    /// A matching variant with stock.
    InStock,
    /// The combination exists but has no stock.
    OutOfStock,
    /// Every required axis is chosen but no variant has this combination.
    NoSuchCombination,
    /// A required axis is still unchosen.
    Incomplete,
}

/// Effective price and stock for a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    pub price: Money,
    pub inventory: u32,
    pub variant: Option<&'a Variant>,
    pub availability: Availability,
}

impl Resolution<'_> {
    /// Add-to-cart is only offered with stock behind the selection.
    pub fn can_purchase(&self) -> bool {
        self.inventory > 0
    }

    pub fn variant_id(&self) -> Option<VariantId> {
        self.variant.and_then(|v| v.id)
    }
}

/// Answers selection questions for one product.
///
/// Every answer is re-derived from the full variant matrix, so the available
/// sizes and colors can never drift from the variants they describe.
#[derive(Debug, Clone)]
pub struct SelectionResolver<'a> {
    product: &'a Product,
    matrix: VariantMatrix<'a>,
}

impl<'a> SelectionResolver<'a> {
    pub fn new(product: &'a Product, reference: &'a ReferenceData) -> Self {
        Self {
            product,
            matrix: VariantMatrix::new(&product.variants, reference),
        }
    }

    pub fn product(&self) -> &'a Product {
        self.product
    }

    pub fn matrix(&self) -> &VariantMatrix<'a> {
        &self.matrix
    }

    /// Sizes that can still be picked given the chosen color.
    pub fn available_sizes(&self, selection: &Selection) -> Vec<&'a Size> {
        let (_, color_id) = self.axis_keys(None, selection.selected_color_id);
        self.matrix.distinct_sizes_with_stock(color_id)
    }

    /// Colors that can still be picked given the chosen size.
    pub fn available_colors(&self, selection: &Selection) -> Vec<&'a Color> {
        let (size_id, _) = self.axis_keys(selection.selected_size_id, None);
        self.matrix.distinct_colors_with_stock(size_id)
    }

    /// Pick a size. A previously chosen color that has no stock in the new
    /// size is dropped.
    pub fn choose_size(&self, selection: &Selection, size_id: SizeId) -> Selection {
        let mut next = Selection {
            selected_size_id: Some(size_id),
            ..*selection
        };
        if let Some(color_id) = next.selected_color_id {
            if !self.is_stocked(Some(size_id), Some(color_id)) {
                tracing::debug!(%size_id, %color_id, "clearing color with no stock in chosen size");
                next.selected_color_id = None;
            }
        }
        next
    }

    /// Pick a color. A previously chosen size that has no stock in the new
    /// color is dropped.
    pub fn choose_color(&self, selection: &Selection, color_id: ColorId) -> Selection {
        let mut next = Selection {
            selected_color_id: Some(color_id),
            ..*selection
        };
        if let Some(size_id) = next.selected_size_id {
            if !self.is_stocked(Some(size_id), Some(color_id)) {
                tracing::debug!(%size_id, %color_id, "clearing size with no stock in chosen color");
                next.selected_size_id = None;
            }
        }
        next
    }

    /// Drop ids on axes no variant uses, so a leftover pick cannot hide stock.
    fn axis_keys(
        &self,
        size_id: Option<SizeId>,
        color_id: Option<ColorId>,
    ) -> (Option<SizeId>, Option<ColorId>) {
        (
            size_id.filter(|_| self.matrix.varies_by_size()),
            color_id.filter(|_| self.matrix.varies_by_color()),
        )
    }

    fn is_stocked(&self, size_id: Option<SizeId>, color_id: Option<ColorId>) -> bool {
        let (size_id, color_id) = self.axis_keys(size_id, color_id);
        self.matrix
            .variant_for(size_id, color_id)
            .is_some_and(Variant::is_in_stock)
    }

    /// Effective price, stock and variant for `selection`.
    ///
    /// A product without variants sells at its own price and stock regardless
    /// of the selection. Otherwise every axis the variants vary by must be
    /// chosen; an axis no variant sets is ignored. Anything short of an exact
    /// match resolves to zero inventory.
    pub fn resolve(&self, selection: &Selection) -> Resolution<'a> {
        if self.matrix.is_empty() {
            return Resolution {
                price: self.product.price,
                inventory: self.product.inventory_quantity,
                variant: None,
                availability: Availability::ProductDefault,
            };
        }

        let size_key = if self.matrix.varies_by_size() {
            match selection.selected_size_id {
                Some(id) => Some(id),
                None => return self.unavailable(Availability::Incomplete),
            }
        } else {
            None
        };
        let color_key = if self.matrix.varies_by_color() {
            match selection.selected_color_id {
                Some(id) => Some(id),
                None => return self.unavailable(Availability::Incomplete),
            }
        } else {
            None
        };

        match self.matrix.variant_for(size_key, color_key) {
            Some(variant) => Resolution {
                price: self.product.price_for(variant),
                inventory: variant.inventory_quantity,
                variant: Some(variant),
                availability: if variant.is_in_stock() {
                    Availability::InStock
                } else {
                    Availability::OutOfStock
                },
            },
            None => self.unavailable(Availability::NoSuchCombination),
        }
    }

    fn unavailable(&self, availability: Availability) -> Resolution<'a> {
        Resolution {
            price: self.product.price,
            inventory: 0,
            variant: None,
            availability,
        }
    }

    /// Apply a page event and re-bound the quantity against the new
    /// resolution.
    pub fn apply(&self, selection: &Selection, event: SelectionEvent) -> Selection {
        let (mut next, requested) = match event {
            SelectionEvent::PickSize { size_id } => {
                (self.choose_size(selection, size_id), i64::from(selection.quantity))
            }
            SelectionEvent::PickColor { color_id } => {
                (self.choose_color(selection, color_id), i64::from(selection.quantity))
            }
            SelectionEvent::SetQuantity { quantity } => (*selection, quantity),
        };
        next.quantity = clamp_quantity(requested, self.resolve(&next).inventory);
        next
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::catalog::fixtures::*;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn arb_size() -> impl Strategy<Value = SizeId> {
        prop_oneof![Just(S), Just(M), Just(L)]
    }

    fn arb_color() -> impl Strategy<Value = ColorId> {
        prop_oneof![Just(RED), Just(BLUE), Just(GREEN)]
    }

    fn arb_product() -> impl Strategy<Value = Product> {
        prop::collection::btree_map((arb_size(), arb_color()), 0u32..4, 0..9).prop_map(|cells| {
            let variants = cells
                .into_iter()
                .map(|((size, color), qty)| Variant::new(Some(size), Some(color), qty))
                .collect();
            Product::new(ProductId::new(1), "Tee", Money::new(10_000, Currency::COP), 0)
                .with_variants(variants)
        })
    }

    fn arb_selection() -> impl Strategy<Value = Selection> {
        (
            prop::option::of(arb_size()),
            prop::option::of(arb_color()),
            0u32..10,
        )
            .prop_map(|(size, color, qty)| Selection::new(size, color, qty))
    }

    proptest! {
        #[test]
        fn available_sizes_never_dead(product in arb_product(), selection in arb_selection()) {
            let reference = reference();
            let resolver = SelectionResolver::new(&product, &reference);
            let color_key = selection
                .selected_color_id
                .filter(|_| resolver.matrix().varies_by_color());
            for size in resolver.available_sizes(&selection) {
                match color_key {
                    Some(color) => {
                        let variant = resolver.matrix().variant_for(Some(size.id), Some(color));
                        prop_assert!(variant.is_some_and(Variant::is_in_stock));
                    }
                    None => prop_assert!(product
                        .variants
                        .iter()
                        .any(|v| v.size_id == Some(size.id) && v.is_in_stock())),
                }
            }
        }

        #[test]
        fn choose_size_is_idempotent(
            product in arb_product(),
            selection in arb_selection(),
            size in arb_size(),
        ) {
            let reference = reference();
            let resolver = SelectionResolver::new(&product, &reference);
            let once = resolver.choose_size(&selection, size);
            let twice = resolver.choose_size(&once, size);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn choose_color_is_idempotent(
            product in arb_product(),
            selection in arb_selection(),
            color in arb_color(),
        ) {
            let reference = reference();
            let resolver = SelectionResolver::new(&product, &reference);
            let once = resolver.choose_color(&selection, color);
            prop_assert_eq!(once, resolver.choose_color(&once, color));
        }

        #[test]
        fn applied_quantity_respects_stock(
            product in arb_product(),
            selection in arb_selection(),
            requested in any::<i64>(),
        ) {
            let reference = reference();
            let resolver = SelectionResolver::new(&product, &reference);
            let next = resolver.apply(&selection, SelectionEvent::SetQuantity { quantity: requested });
            let inventory = resolver.resolve(&next).inventory;
            if inventory == 0 {
                prop_assert_eq!(next.quantity, 0);
            } else {
                prop_assert!(next.quantity >= 1 && next.quantity <= inventory);
            }
        }
    }
}
