//! Size × color lookup over a product's variants.

use std::collections::{HashMap, HashSet};

use crate::catalog::{Color, ReferenceData, Size, Variant};
use crate::ids::{ColorId, SizeId};

type AxisKey = (Option<SizeId>, Option<ColorId>);

/// Read-only view over a variant list keyed by `(size, color)`.
///
/// The matrix borrows the variants and the reference lists; it never copies or
/// mutates them. Every projection is recomputed from the full list, so a
/// matrix can be rebuilt after any change without carrying stale state.
#[derive(Debug, Clone)]
pub struct VariantMatrix<'a> {
    variants: &'a [Variant],
    reference: &'a ReferenceData,
    index: HashMap<AxisKey, usize>,
}

impl<'a> VariantMatrix<'a> {
    /// Index `variants`.
    ///
    /// Products are expected to carry at most one variant per pair. If the
    /// list breaks that rule the first occurrence wins and the rest are
    /// ignored by `variant_for`.
    pub fn new(variants: &'a [Variant], reference: &'a ReferenceData) -> Self {
        let mut index = HashMap::with_capacity(variants.len());
        for (position, variant) in variants.iter().enumerate() {
            if index.contains_key(&variant.key()) {
                tracing::warn!(
                    size_id = ?variant.size_id,
                    color_id = ?variant.color_id,
                    position,
                    "duplicate variant key; keeping the first occurrence"
                );
                continue;
            }
            index.insert(variant.key(), position);
        }
        Self {
            variants,
            reference,
            index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn variants(&self) -> &'a [Variant] {
        self.variants
    }

    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    /// Exact match on both axes. `None` is a value of its own: `(S, None)` does
    /// not match `(S, Red)`.
    pub fn variant_for(&self, size_id: Option<SizeId>, color_id: Option<ColorId>) -> Option<&'a Variant> {
        let variants = self.variants;
        self.index
            .get(&(size_id, color_id))
            .and_then(|&position| variants.get(position))
    }

    /// Whether any variant sets a size.
    pub fn varies_by_size(&self) -> bool {
        self.variants.iter().any(|v| v.size_id.is_some())
    }

    /// Whether any variant sets a color.
    pub fn varies_by_color(&self) -> bool {
        self.variants.iter().any(|v| v.color_id.is_some())
    }

    /// Sizes that have stock, optionally only in `color_filter`.
    ///
    /// Sizes come back in reference order, each at most once. A size missing
    /// from the reference list cannot be shown and is skipped.
    pub fn distinct_sizes_with_stock(&self, color_filter: Option<ColorId>) -> Vec<&'a Size> {
        let stocked: HashSet<SizeId> = self
            .variants
            .iter()
            .filter(|v| v.is_in_stock())
            .filter(|v| color_filter.is_none() || v.color_id == color_filter)
            .filter_map(|v| v.size_id)
            .collect();

        self.reference
            .sizes
            .iter()
            .filter(|s| stocked.contains(&s.id))
            .collect()
    }

    /// Colors that have stock, optionally only in `size_filter`.
    pub fn distinct_colors_with_stock(&self, size_filter: Option<SizeId>) -> Vec<&'a Color> {
        let stocked: HashSet<ColorId> = self
            .variants
            .iter()
            .filter(|v| v.is_in_stock())
            .filter(|v| size_filter.is_none() || v.size_id == size_filter)
            .filter_map(|v| v.color_id)
            .collect();

        self.reference
            .colors
            .iter()
            .filter(|c| stocked.contains(&c.id))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::catalog::SizeCategory;

    pub const S: SizeId = SizeId::new(1);
    pub const M: SizeId = SizeId::new(2);
    pub const L: SizeId = SizeId::new(3);
    pub const RED: ColorId = ColorId::new(1);
    pub const BLUE: ColorId = ColorId::new(2);
    pub const GREEN: ColorId = ColorId::new(3);

    pub fn reference() -> ReferenceData {
        ReferenceData::new(
            vec![
                Size::new(L, "L", SizeCategory::Clothing, 3),
                Size::new(M, "M", SizeCategory::Clothing, 2),
                Size::new(S, "S", SizeCategory::Clothing, 1),
            ],
            vec![
                Color::new(RED, "Red", 1),
                Color::new(BLUE, "Blue", 2),
                Color::new(GREEN, "Green", 3),
            ],
        )
    }

    /// `(S, Red, 3)`, `(M, Red, 0)`, `(S, Blue, 5)`.
    pub fn tee_variants() -> Vec<Variant> {
        vec![
            Variant::new(Some(S), Some(RED), 3),
            Variant::new(Some(M), Some(RED), 0),
            Variant::new(Some(S), Some(BLUE), 5),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn size_names(sizes: &[&Size]) -> Vec<String> {
        sizes.iter().map(|s| s.name.clone()).collect()
    }

    fn color_names(colors: &[&Color]) -> Vec<String> {
        colors.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_variant_for_exact_match() {
        let reference = reference();
        let variants = tee_variants();
        let matrix = VariantMatrix::new(&variants, &reference);

        assert_eq!(matrix.variant_for(Some(S), Some(RED)).unwrap().inventory_quantity, 3);
        assert_eq!(matrix.variant_for(Some(M), Some(RED)).unwrap().inventory_quantity, 0);
        assert!(matrix.variant_for(Some(M), Some(BLUE)).is_none());
        assert!(matrix.variant_for(Some(S), None).is_none());
        assert!(matrix.variant_for(None, None).is_none());
    }

    #[test]
    fn test_null_axis_is_a_key() {
        let reference = reference();
        let variants = vec![
            Variant::new(None, Some(RED), 2),
            Variant::new(None, None, 9),
        ];
        let matrix = VariantMatrix::new(&variants, &reference);
        assert_eq!(matrix.variant_for(None, Some(RED)).unwrap().inventory_quantity, 2);
        assert_eq!(matrix.variant_for(None, None).unwrap().inventory_quantity, 9);
    }

    #[test]
    fn test_sizes_exclude_zero_stock() {
        let reference = reference();
        let variants = tee_variants();
        let matrix = VariantMatrix::new(&variants, &reference);

        assert_eq!(size_names(&matrix.distinct_sizes_with_stock(None)), vec!["S"]);
        assert_eq!(size_names(&matrix.distinct_sizes_with_stock(Some(RED))), vec!["S"]);
        assert!(matrix.distinct_sizes_with_stock(Some(GREEN)).is_empty());
    }

    #[test]
    fn test_colors_follow_reference_order() {
        let reference = reference();
        let variants = vec![
            Variant::new(Some(S), Some(GREEN), 1),
            Variant::new(Some(S), Some(BLUE), 1),
            Variant::new(Some(M), Some(RED), 1),
            Variant::new(Some(L), Some(BLUE), 1),
        ];
        let matrix = VariantMatrix::new(&variants, &reference);

        assert_eq!(
            color_names(&matrix.distinct_colors_with_stock(None)),
            vec!["Red", "Blue", "Green"]
        );
        assert_eq!(
            color_names(&matrix.distinct_colors_with_stock(Some(S))),
            vec!["Blue", "Green"]
        );
    }

    #[test]
    fn test_sizes_follow_reference_order_once() {
        let reference = reference();
        let variants = vec![
            Variant::new(Some(L), Some(RED), 1),
            Variant::new(Some(S), Some(RED), 1),
            Variant::new(Some(L), Some(BLUE), 1),
        ];
        let matrix = VariantMatrix::new(&variants, &reference);
        assert_eq!(size_names(&matrix.distinct_sizes_with_stock(None)), vec!["S", "L"]);
    }

    #[test]
    fn test_empty_matrix() {
        let reference = reference();
        let matrix = VariantMatrix::new(&[], &reference);
        assert!(matrix.is_empty());
        assert!(matrix.distinct_sizes_with_stock(None).is_empty());
        assert!(matrix.distinct_colors_with_stock(None).is_empty());
        assert!(!matrix.varies_by_size());
        assert!(!matrix.varies_by_color());
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let reference = reference();
        let variants = vec![
            Variant::new(Some(S), Some(RED), 1),
            Variant::new(Some(S), Some(RED), 8),
        ];
        let matrix = VariantMatrix::new(&variants, &reference);
        assert_eq!(matrix.variant_for(Some(S), Some(RED)).unwrap().inventory_quantity, 1);
    }
}
