//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's minor unit (centavos, cents) all the
//! way through the pipeline, so totals never drift the way floating point does.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommerceError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    COP,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "COP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::COP => "COP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::COP | Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Number of minor-unit digits in one major unit.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Number of decimals shown to shoppers. Pesos are displayed whole.
    pub fn display_decimals(&self) -> u32 {
        match self {
            Currency::COP => 0,
            Currency::USD | Currency::EUR => 2,
        }
    }

    fn separators(&self) -> (char, char) {
        // (thousands, decimal)
        match self {
            Currency::COP | Currency::EUR => ('.', ','),
            Currency::USD => (',', '.'),
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "COP" => Some(Currency::COP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub const fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }

    /// Add another Money value.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Subtract another Money value.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        self.amount_minor
            .checked_sub(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a quantity.
    pub fn checked_mul(&self, quantity: u32) -> Result<Money, CommerceError> {
        self.amount_minor
            .checked_mul(i64::from(quantity))
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Sum an iterator of Money values, starting from zero in `currency`.
    pub fn try_sum<'a>(
        iter: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    /// Format as a display string (e.g., "$150.000" for COP 150000 centavos).
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.display_amount())
    }

    /// Format the absolute amount without symbol (e.g., "150.000").
    pub fn display_amount(&self) -> String {
        let (thousands, decimal) = self.currency.separators();
        let scale = 10_u64.pow(self.currency.decimal_places());
        let shown = self.currency.display_decimals();
        let drop = 10_u64.pow(self.currency.decimal_places() - shown);

        // Round half up to the number of decimals actually shown.
        let minor = self.amount_minor.unsigned_abs();
        let rounded = (minor + drop / 2) / drop * drop;
        let major = rounded / scale;
        let fraction = (rounded % scale) / drop;

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(thousands);
            }
            grouped.push(ch);
        }

        if shown == 0 {
            grouped
        } else {
            format!(
                "{}{}{:0width$}",
                grouped,
                decimal,
                fraction,
                width = shown as usize
            )
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_minor_units() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.amount_minor, 4999);
        assert_eq!(m.currency, Currency::USD);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(123_456_78, Currency::USD).display(), "$123,456.78");
        assert_eq!(Money::new(15_000_000, Currency::COP).display(), "$150.000");
        assert_eq!(Money::new(19_950, Currency::COP).display(), "$200");
        assert_eq!(Money::new(-500, Currency::EUR).display(), "-\u{20ac}5,00");
        assert_eq!(Money::zero(Currency::COP).display(), "$0");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().amount_minor, 1500);
    }

    #[test]
    fn test_money_subtraction() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(300, Currency::USD);
        assert_eq!(a.checked_sub(&b).unwrap().amount_minor, 700);
    }

    #[test]
    fn test_money_multiply() {
        let m = Money::new(1000, Currency::COP);
        assert_eq!(m.checked_mul(3).unwrap().amount_minor, 3000);
    }

    #[test]
    fn test_money_overflow() {
        let m = Money::new(i64::MAX, Currency::COP);
        assert!(matches!(m.checked_mul(2), Err(CommerceError::Overflow)));
        assert!(matches!(
            m.checked_add(&Money::new(1, Currency::COP)),
            Err(CommerceError::Overflow)
        ));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let cop = Money::new(1000, Currency::COP);
        let eur = Money::new(1000, Currency::EUR);
        assert!(matches!(
            cop.checked_add(&eur),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_try_sum() {
        let values = [
            Money::new(100, Currency::COP),
            Money::new(250, Currency::COP),
        ];
        let total = Money::try_sum(values.iter(), Currency::COP).unwrap();
        assert_eq!(total.amount_minor, 350);

        let empty: [Money; 0] = [];
        assert!(Money::try_sum(empty.iter(), Currency::COP).unwrap().is_zero());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("COP"), Some(Currency::COP));
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
