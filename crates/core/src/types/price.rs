//! Whole-rupee price representation.
//!
//! Catalog prices are always whole rupees, so amounts are stored as an
//! unsigned integer and every total is exact integer arithmetic. Arithmetic
//! saturates instead of wrapping.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// A price in whole Indian rupees.
///
/// ```
/// use darsi_core::Price;
///
/// let unit = Price::new(219);
/// assert_eq!(unit.times(3), Price::new(657));
/// assert_eq!(unit.to_string(), "₹219");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Currency symbol used when rendering prices.
    pub const SYMBOL: &'static str = "₹";

    /// Zero rupees.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-rupee amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The amount in whole rupees.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Sum of two prices.
    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::SYMBOL, self.0)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::plus)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_times() {
        assert_eq!(Price::new(75).times(6), Price::new(450));
        assert_eq!(Price::new(75).times(0), Price::ZERO);
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(438), Price::new(219)].iter().sum();
        assert_eq!(total, Price::new(657));

        let empty: Price = core::iter::empty::<Price>().sum();
        assert_eq!(empty, Price::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(749).to_string(), "₹749");
        assert_eq!(Price::ZERO.to_string(), "₹0");
    }
}
