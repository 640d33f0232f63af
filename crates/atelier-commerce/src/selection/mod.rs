//! Product page selection: which sizes and colors can be picked, what a pick
//! resolves to, and how much of it can be bought.

mod quantity;
mod resolver;

pub use quantity::{clamp_quantity, clamp_quantity_input};
pub use resolver::{Availability, Resolution, Selection, SelectionEvent, SelectionResolver};
