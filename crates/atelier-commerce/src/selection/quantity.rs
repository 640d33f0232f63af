//! Quantity bounding against resolved stock.

/// Bound a requested quantity to the stock of the resolved selection.
///
/// Rules, in order:
/// 1. a negative request counts as `0`;
/// 2. no stock means nothing can be bought: the result is `0`;
/// 3. otherwise the request is clamped to `1..=inventory`.
///
/// The result is what the cart stores, so call this again every time the
/// resolved variant changes.
pub fn clamp_quantity(requested: i64, inventory: u32) -> u32 {
    let requested = requested.max(0);
    if inventory == 0 {
        return 0;
    }
    let bounded = requested.clamp(1, i64::from(inventory));
    u32::try_from(bounded).unwrap_or(inventory)
}

/// Like [`clamp_quantity`] for raw form input.
///
/// Anything that is not an integer (empty, `"abc"`, `"2.5"`) fails closed to
/// `0` before the rules apply.
pub fn clamp_quantity_input(raw: &str, inventory: u32) -> u32 {
    let requested = raw.trim().parse::<i64>().unwrap_or(0);
    clamp_quantity(requested, inventory)
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn no_stock_always_zero(requested in any::<i64>()) {
            prop_assert_eq!(clamp_quantity(requested, 0), 0);
        }

        #[test]
        fn garbage_input_without_stock_is_zero(raw in ".*") {
            prop_assert_eq!(clamp_quantity_input(&raw, 0), 0);
        }

        #[test]
        fn stocked_result_in_range(requested in any::<i64>(), inventory in 1u32..) {
            let q = clamp_quantity(requested, inventory);
            prop_assert!(q >= 1 && q <= inventory);
        }
    }
}
