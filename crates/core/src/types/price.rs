//! Exact money arithmetic for prices and order totals.
//!
//! Prices are stored as `NUMERIC(10,2)` in Postgres and handled as
//! [`rust_decimal::Decimal`] in Rust. Binary floats are never involved, so
//! summing a cart of many line items cannot accumulate rounding error: the
//! total an order is created with is exactly the sum of its line totals.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price or money amount in the store currency.
///
/// Serializes as a decimal string (e.g. `"25.50"`), matching the wire format
/// of the `NUMERIC` column it round-trips through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero, the additive identity for totals.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build a price from an integer number of cents.
    ///
    /// `Price::from_cents(2550)` is `25.50`.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The extended total for a line item: unit price times quantity.
    ///
    /// Quantity comes from a `CHECK (quantity > 0)` column; negative input
    /// simply produces a negative total and is rejected upstream.
    #[must_use]
    pub fn line_total(&self, quantity: i32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

// SQLx support (with postgres feature): binds as NUMERIC through Decimal.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(2550).to_string(), "25.50");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::from_cents(0), Price::ZERO);
    }

    #[test]
    fn test_from_cents_negative() {
        let p = Price::from_cents(-150);
        assert!(p.is_negative());
        assert_eq!(p.to_string(), "-1.50");
    }

    #[test]
    fn test_line_total() {
        let unit = Price::from_cents(1000); // 10.00
        assert_eq!(unit.line_total(2), Price::from_cents(2000));
        assert_eq!(unit.line_total(1), unit);
    }

    #[test]
    fn test_sum_is_exact() {
        // 0.10 summed a thousand times is exactly 100.00; the float
        // equivalent drifts.
        let total: Price = std::iter::repeat_n(Price::from_cents(10), 1000).sum();
        assert_eq!(total, Price::from_cents(100_000));
    }

    #[test]
    fn test_checkout_scenario_total() {
        // 10.00 x 2 + 5.50 x 1 = 25.50
        let total = Price::from_cents(1000).line_total(2) + Price::from_cents(550).line_total(1);
        assert_eq!(total, Price::from_cents(2550));
        assert_eq!(total.to_string(), "25.50");
    }

    #[test]
    fn test_serde_string_form() {
        let price = Price::from_cents(2550);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"25.50\"");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
