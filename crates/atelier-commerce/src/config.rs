//! Store-wide settings.

use serde::{Deserialize, Serialize};

use crate::cart::{PricingEngine, ShippingRule};
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Pricing and cart settings of a store.
///
/// Amounts are in minor units of `currency`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default)]
    pub currency: Currency,

    /// Orders strictly above this subtotal ship free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: i64,

    #[serde(default = "default_flat_shipping_rate")]
    pub flat_shipping_rate: i64,

    #[serde(default = "default_max_quantity_per_item")]
    pub max_quantity_per_item: u32,
}

// $100.000 in centavos.
fn default_free_shipping_threshold() -> i64 {
    10_000_000
}

// $15.000 in centavos.
fn default_flat_shipping_rate() -> i64 {
    1_500_000
}

fn default_max_quantity_per_item() -> u32 {
    9999
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_shipping_rate: default_flat_shipping_rate(),
            max_quantity_per_item: default_max_quantity_per_item(),
        }
    }
}

impl StoreConfig {
    pub fn shipping_rule(&self) -> ShippingRule {
        ShippingRule::new(
            Money::new(self.free_shipping_threshold, self.currency),
            Money::new(self.flat_shipping_rate, self.currency),
        )
    }

    pub fn pricing_engine(&self) -> PricingEngine {
        PricingEngine::new(self.shipping_rule())
    }

    /// Check the settings make sense together.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.free_shipping_threshold < 0 {
            return Err(CommerceError::InvalidConfig(
                "free_shipping_threshold must not be negative".to_string(),
            ));
        }
        if self.flat_shipping_rate < 0 {
            return Err(CommerceError::InvalidConfig(
                "flat_shipping_rate must not be negative".to_string(),
            ));
        }
        if self.max_quantity_per_item == 0 {
            return Err(CommerceError::InvalidConfig(
                "max_quantity_per_item must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.currency, Currency::COP);
        assert_eq!(config.shipping_rule().free_threshold.display(), "$100.000");
        assert_eq!(config.shipping_rule().flat_rate.display(), "$15.000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"free_shipping_threshold": 15000000}"#).unwrap();
        assert_eq!(config.free_shipping_threshold, 15_000_000);
        assert_eq!(config.flat_shipping_rate, 1_500_000);
        assert_eq!(config.max_quantity_per_item, 9999);
    }

    #[test]
    fn test_validate_rejects_nonsense() {
        let config = StoreConfig {
            flat_shipping_rate: -1,
            ..StoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(CommerceError::InvalidConfig(_))));

        let config = StoreConfig {
            max_quantity_per_item: 0,
            ..StoreConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_engine_uses_settings() {
        let engine = StoreConfig::default().pricing_engine();
        let subtotal = Money::new(10_000_000, Currency::COP);
        assert_eq!(engine.shipping_cost(subtotal).amount_minor, 1_500_000);
    }
}
