//! Variant selection, variant editing and order pricing for the Atelier
//! storefront.
//!
//! - **Catalog**: products, variants, size/color reference data, the variant matrix
//! - **Selection**: mutually constrained size/color picking and quantity bounding
//! - **Editor**: staged admin edits of a product's variants with soft deletion
//! - **Cart**: line items, the cart and the pricing engine
//!
//! # Example
//!
//! ```rust
//! use atelier_commerce::prelude::*;
//!
//! let reference = ReferenceData::new(
//!     vec![Size::new(SizeId::new(1), "M", SizeCategory::Clothing, 1)],
//!     vec![Color::new(ColorId::new(1), "Red", 1)],
//! );
//! let product = Product::new(ProductId::new(7), "Tee", Money::new(19_900, Currency::COP), 0)
//!     .with_variants(vec![
//!         Variant::new(Some(SizeId::new(1)), Some(ColorId::new(1)), 4).with_id(VariantId::new(70)),
//!     ]);
//!
//! let resolver = SelectionResolver::new(&product, &reference);
//! let selection = resolver.apply(&Selection::default(), SelectionEvent::PickSize { size_id: SizeId::new(1) });
//! let selection = resolver.apply(&selection, SelectionEvent::PickColor { color_id: ColorId::new(1) });
//! let resolution = resolver.resolve(&selection);
//! assert_eq!(resolution.inventory, 4);
//!
//! let config = StoreConfig::default();
//! let mut cart = Cart::for_store(&config);
//! if let Some(line) = LineItem::from_resolution(&product, &resolution, &reference, selection.quantity) {
//!     cart.add_item(line)?;
//! }
//! let priced = cart.totals(&config.pricing_engine(), Money::zero(Currency::COP), Money::zero(Currency::COP))?;
//! println!("Total: {}", priced.totals.total);
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod selection;

pub use error::{CommerceError, ValidationError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{
        Cart, LineItem, OrderTotals, PricedTotals, PricingAnomaly, PricingEngine, ShippingRule,
    };
    pub use crate::catalog::{
        CatalogSnapshot, Color, Product, ReferenceData, Size, SizeCategory, Variant, VariantMatrix,
    };
    pub use crate::config::StoreConfig;
    pub use crate::editor::{EditingSession, SavePayload};
    pub use crate::error::{CommerceError, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::selection::{
        clamp_quantity, Availability, Resolution, Selection, SelectionEvent, SelectionResolver,
    };
}
