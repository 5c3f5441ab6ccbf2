//! Monetary value object
//!
//! Amounts are exact decimals. Intermediate computations keep full
//! precision; rounding to two decimal places happens once, half-up, at the
//! display/persistence boundary via [`Money::rounded`].

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Money parsing error
#[derive(Debug, Error)]
pub enum MoneyError {
    #[error("not a valid amount: {0}")]
    Invalid(String),
}

/// An exact monetary amount.
///
/// The application runs in a single currency, so no currency code is
/// carried; the display currency lives in the company settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build from whole currency units and hundredths, e.g. `(19, 99)`.
    pub fn from_units(units: i64, hundredths: u32) -> Self {
        Self(Decimal::new(units * 100 + hundredths as i64, 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// `amount * percent / 100`, exact.
    pub fn percentage(&self, percent: Decimal) -> Money {
        Money(self.0 * percent / Decimal::ONE_HUNDRED)
    }

    /// Round half-up to two decimal places and force a scale of two, so the
    /// value prints as a currency figure (`132.4` becomes `132.40`).
    pub fn rounded(&self) -> Money {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        Money(rounded)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|_| MoneyError::Invalid(s.to_string()))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, multiplier: i64) -> Self {
        Self(self.0 * Decimal::from(multiplier))
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let price = Money::from_units(19, 99);
        assert_eq!(price.to_string(), "19.99");
    }

    #[test]
    fn test_rounding_half_up() {
        // 9.46946 -> 9.47 (the 7.7% tax on 122.98)
        let tax = Money::from_units(122, 98).percentage(Decimal::new(77, 1));
        assert_eq!(tax.rounded().to_string(), "9.47");

        // Midpoint rounds away from zero.
        let mid: Money = "2.125".parse().unwrap();
        assert_eq!(mid.rounded().to_string(), "2.13");
    }

    #[test]
    fn test_rounding_forces_two_decimals() {
        let m: Money = "132.4".parse().unwrap();
        assert_eq!(m.rounded().to_string(), "132.40");

        let m: Money = "7".parse().unwrap();
        assert_eq!(m.rounded().to_string(), "7.00");
    }

    #[test]
    fn test_percentage_exact() {
        let m = Money::from_units(100, 0);
        let tax = m.percentage(Decimal::new(77, 1));
        assert_eq!(tax, "7.7".parse::<Money>().unwrap());
        assert_eq!(tax.rounded().to_string(), "7.70");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(19, 99);
        let b = Money::from_units(12, 99);
        assert_eq!((a + b).to_string(), "32.98");
        assert_eq!((a - b).to_string(), "7.00");
        assert_eq!((b * 3).to_string(), "38.97");
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_units(1, 50), Money::from_units(2, 25)]
            .into_iter()
            .sum();
        assert_eq!(total.to_string(), "3.75");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("19.99".parse::<Money>().is_ok());
        assert!(" 19.99 ".parse::<Money>().is_ok());
        assert!("19.99 CHF".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn test_is_negative() {
        assert!("-0.01".parse::<Money>().unwrap().is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!Money::from_units(1, 0).is_negative());
    }
}
