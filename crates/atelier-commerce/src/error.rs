//! Commerce error types.

use thiserror::Error;

use crate::ids::{ColorId, SizeId};

/// Rejections of an edit to a product's variant list.
///
/// A validation error blocks the edit: the session is left exactly as it was
/// before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither a size nor a color was given.
    #[error("A variant must specify at least a size or a color")]
    MissingAxis,

    /// Another active variant already uses this size/color pair.
    #[error("A variant for size {} and color {} already exists", display_axis(.size_id), display_axis(.color_id))]
    DuplicateVariant {
        size_id: Option<SizeId>,
        color_id: Option<ColorId>,
    },

    /// The working list has no entry at this position.
    #[error("No variant at index {index} (session has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

fn display_axis<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

/// Errors that can occur in e-commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// An edit was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),

    /// The stock behind a line has run out.
    #[error("No stock left for this item")]
    OutOfStock,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Store configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_both_axes() {
        let err = ValidationError::DuplicateVariant {
            size_id: Some(SizeId::new(3)),
            color_id: None,
        };
        assert_eq!(
            err.to_string(),
            "A variant for size 3 and color none already exists"
        );
    }

    #[test]
    fn test_validation_converts_into_commerce_error() {
        let err: CommerceError = ValidationError::MissingAxis.into();
        assert!(matches!(
            err,
            CommerceError::Validation(ValidationError::MissingAxis)
        ));
    }
}
