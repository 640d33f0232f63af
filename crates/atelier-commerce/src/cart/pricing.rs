//! Order totals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::LineItem;
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Store shipping policy: orders strictly above `free_threshold` ship free,
/// everything else pays `flat_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRule {
    pub free_threshold: Money,
    pub flat_rate: Money,
}

impl ShippingRule {
    pub fn new(free_threshold: Money, flat_rate: Money) -> Self {
        Self {
            free_threshold,
            flat_rate,
        }
    }

    pub fn currency(&self) -> Currency {
        self.flat_rate.currency
    }
}

/// Derived totals of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub shipping_cost: Money,
    pub tax_amount: Money,
    pub discount_amount: Money,
    /// `subtotal + shipping_cost + tax_amount - discount_amount`, never below zero.
    pub total: Money,
}

/// Something about the inputs the totals had to paper over.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingAnomaly {
    /// The discount was larger than everything else combined; the total was
    /// floored at zero.
    #[error("discount {} exceeds payable amount {}", .discount.display(), .payable.display())]
    DiscountExceedsPayable { payable: Money, discount: Money },
}

/// Totals together with any anomaly hit while computing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedTotals {
    #[serde(flatten)]
    pub totals: OrderTotals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<PricingAnomaly>,
}

/// Computes order totals under a [`ShippingRule`].
///
/// All arithmetic is checked integer math in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingEngine {
    rule: ShippingRule,
}

impl PricingEngine {
    pub fn new(rule: ShippingRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &ShippingRule {
        &self.rule
    }

    pub fn currency(&self) -> Currency {
        self.rule.currency()
    }

    /// Sum of `unit_price × quantity` over `items`.
    pub fn subtotal(&self, items: &[LineItem]) -> Result<Money, CommerceError> {
        items
            .iter()
            .try_fold(Money::zero(self.currency()), |acc, item| {
                acc.checked_add(&item.line_total()?)
            })
    }

    /// Shipping for an order with this subtotal. Reaching the threshold
    /// exactly still pays shipping.
    pub fn shipping_cost(&self, subtotal: Money) -> Money {
        if subtotal.amount_minor > self.rule.free_threshold.amount_minor {
            Money::zero(self.rule.flat_rate.currency)
        } else {
            self.rule.flat_rate
        }
    }

    /// How much more has to be added to the cart before shipping is free.
    pub fn remaining_for_free_shipping(&self, subtotal: Money) -> Money {
        let threshold = self.rule.free_threshold;
        if subtotal.amount_minor > threshold.amount_minor {
            return Money::zero(threshold.currency);
        }
        let remaining = threshold
            .amount_minor
            .saturating_sub(subtotal.amount_minor)
            .saturating_add(1);
        Money::new(remaining, threshold.currency)
    }

    /// Full totals for `items`.
    ///
    /// A discount larger than subtotal, shipping and tax combined does not
    /// fail: the total is floored at zero and the anomaly is returned with it.
    pub fn totals(
        &self,
        items: &[LineItem],
        tax_amount: Money,
        discount_amount: Money,
    ) -> Result<PricedTotals, CommerceError> {
        let subtotal = self.subtotal(items)?;
        let shipping_cost = self.shipping_cost(subtotal);
        let payable = subtotal
            .checked_add(&shipping_cost)?
            .checked_add(&tax_amount)?;
        let raw_total = payable.checked_sub(&discount_amount)?;

        let (total, anomaly) = if raw_total.is_negative() {
            let anomaly = PricingAnomaly::DiscountExceedsPayable {
                payable,
                discount: discount_amount,
            };
            tracing::warn!(%anomaly, "order total floored at zero");
            (Money::zero(raw_total.currency), Some(anomaly))
        } else {
            (raw_total, None)
        };

        Ok(PricedTotals {
            totals: OrderTotals {
                subtotal,
                shipping_cost,
                tax_amount,
                discount_amount,
                total,
            },
            anomaly,
        })
    }
}
