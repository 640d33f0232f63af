//! Product catalog module.
//!
//! Contains products, variants, the size/color reference lists and the
//! variant matrix used to answer "which combinations are in stock".

mod matrix;
mod product;
mod reference;
mod sku;

#[cfg(test)]
pub(crate) use matrix::fixtures;
pub use matrix::VariantMatrix;
pub use product::{Product, Variant};
pub use reference::{Color, ReferenceData, Size, SizeCategory};
pub use sku::suggest_sku;

use serde::{Deserialize, Serialize};

/// A product together with the reference lists it points into, as fetched
/// from the catalog in one round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSnapshot {
    pub product: Product,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub colors: Vec<Color>,
}

impl CatalogSnapshot {
    /// Split into the product and display-ordered reference data.
    pub fn into_parts(self) -> (Product, ReferenceData) {
        (self.product, ReferenceData::new(self.sizes, self.colors))
    }
}
