//! Shopping cart module.
//!
//! Contains line items, the cart itself and the pricing engine that turns a
//! cart into order totals.

mod cart;
mod pricing;

pub use cart::{Cart, LineItem};
pub use pricing::{OrderTotals, PricedTotals, PricingAnomaly, PricingEngine, ShippingRule};
