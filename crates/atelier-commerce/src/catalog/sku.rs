//! SKU suggestions for new variants.

use crate::catalog::ReferenceData;
use crate::ids::{ColorId, SizeId};

/// Suggest a SKU such as `VAR-M-RED-0421` for a new variant.
///
/// The size name is used as is, the color contributes its first three letters
/// upper-cased, and `suffix` (usually the last digits of a timestamp) keeps
/// suggestions for the same pair apart. Unknown ids are left out.
pub fn suggest_sku(
    reference: &ReferenceData,
    size_id: Option<SizeId>,
    color_id: Option<ColorId>,
    suffix: u32,
) -> String {
    let mut sku = String::from("VAR");
    if let Some(size) = size_id.and_then(|id| reference.size(id)) {
        sku.push('-');
        sku.push_str(&size.name);
    }
    if let Some(color) = color_id.and_then(|id| reference.color(id)) {
        sku.push('-');
        sku.extend(color.name.chars().take(3).flat_map(char::to_uppercase));
    }
    sku.push_str(&format!("-{:04}", suffix % 10_000));
    sku
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Color, Size, SizeCategory};

    #[test]
    fn test_suggest_sku() {
        let reference = ReferenceData::new(
            vec![Size::new(SizeId::new(1), "M", SizeCategory::Clothing, 1)],
            vec![Color::new(ColorId::new(1), "Rojo", 1)],
        );

        assert_eq!(
            suggest_sku(&reference, Some(SizeId::new(1)), Some(ColorId::new(1)), 421),
            "VAR-M-ROJ-0421"
        );
        assert_eq!(
            suggest_sku(&reference, None, Some(ColorId::new(1)), 123_456),
            "VAR-ROJ-3456"
        );
        assert_eq!(suggest_sku(&reference, Some(SizeId::new(9)), None, 7), "VAR-0007");
    }
}
