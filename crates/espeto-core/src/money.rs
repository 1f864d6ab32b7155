//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Centavos                                     │
//! │    R$11.00 is stored as 1100; fees are computed in basis points     │
//! │    with i128 intermediate math, so no value ever drifts.            │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use espeto_core::money::Money;
//! use espeto_core::types::FeeRate;
//!
//! let total = Money::from_cents(2800);   // R$28.00
//! let fee = total.apply_fee(FeeRate::from_bps(300)); // 3%
//! assert_eq!(fee.cents(), 84);           // R$0.84
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::FeeRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos).
///
/// ## Design Decisions
/// - **i64 (signed)**: net profit can go negative on a bad month
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use espeto_core::money::Money;
    ///
    /// let price = Money::from_cents(1100); // R$11.00
    /// assert_eq!(price.cents(), 1100);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Computes the payment-method fee on this amount.
    ///
    /// ## Implementation
    /// Integer math with round-half-up: `(amount * bps + 5000) / 10000`.
    /// i128 intermediates prevent overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use espeto_core::money::Money;
    /// use espeto_core::types::FeeRate;
    ///
    /// // R$28.00 at a 3% card fee = R$0.84, exactly
    /// let total = Money::from_cents(2800);
    /// assert_eq!(total.apply_fee(FeeRate::from_bps(300)).cents(), 84);
    ///
    /// // Zero rate (cash, tab) always yields zero fee
    /// assert!(total.apply_fee(FeeRate::zero()).is_zero());
    /// ```
    pub fn apply_fee(&self, rate: FeeRate) -> Money {
        let fee_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(fee_cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use espeto_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1100); // R$11.00
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 2200);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// For debugging; the UI formats values for display itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R${}.{:02}", sign, self.reais().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "R$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "R$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-R$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "R$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_fee_exact() {
        // R$28.00 at 3% = R$0.84 with no remainder
        let total = Money::from_cents(2800);
        assert_eq!(total.apply_fee(FeeRate::from_bps(300)).cents(), 84);
    }

    #[test]
    fn test_fee_rounding() {
        // R$10.00 at 8.25% = R$0.825 → rounds to R$0.83
        let total = Money::from_cents(1000);
        assert_eq!(total.apply_fee(FeeRate::from_bps(825)).cents(), 83);
    }

    #[test]
    fn test_fee_zero_rate() {
        let total = Money::from_cents(9999);
        assert!(total.apply_fee(FeeRate::zero()).is_zero());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(600);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 1800);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
