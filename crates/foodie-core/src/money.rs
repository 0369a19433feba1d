//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing menu prices as floats:                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer paise (1 rupee = 100 paise)                      │
//! │    Cart subtotal = Σ price_paise × quantity, exact at any size         │
//! │    Rounding happens only when a value is displayed                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use foodie_core::money::Money;
//!
//! let price = Money::from_major(320);     // ₹320.00
//! let line = price * 2u32;                // ₹640.00
//! let total = line + Money::from_minor(50); // ₹640.50
//! assert_eq!(total.minor(), 64_050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// Minor units per major unit (paise per rupee).
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: shortfalls and differences can go negative
/// - **Newtype over i64**: serializes as a bare integer of paise
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ──► CartLine.line_total ──► Cart.subtotal ──┬──► min-order check
///                                                            └──► checkout total
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use foodie_core::money::Money;
    ///
    /// let price = Money::from_minor(32_050); // ₹320.50
    /// assert_eq!(price.minor(), 32_050);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// Catalog prices are whole rupees, so this is the common constructor.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use foodie_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(32_099).major(), 320);
    /// assert_eq!(Money::from_minor(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
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

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use foodie_core::money::Money;
    ///
    /// let unit_price = Money::from_major(60); // Garlic Naan
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_major(180));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// How much is missing to reach `target`; zero when already reached.
    ///
    /// ## Example
    /// ```rust
    /// use foodie_core::money::Money;
    ///
    /// let subtotal = Money::from_major(100);
    /// assert_eq!(subtotal.shortfall_to(Money::from_major(150)), Money::from_major(50));
    /// assert_eq!(subtotal.shortfall_to(Money::from_major(80)), Money::zero());
    /// ```
    pub fn shortfall_to(&self, target: Money) -> Money {
        if *self >= target {
            Money::zero()
        } else {
            target - *self
        }
    }

    /// Calculates tax on this amount.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 rounds half up
    /// to the nearest paisa.
    ///
    /// ## Example
    /// ```rust
    /// use foodie_core::money::Money;
    /// use foodie_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_major(640);
    /// let gst = subtotal.calculate_tax(TaxRate::from_bps(800)); // 8%
    /// assert_eq!(gst, Money::from_minor(5_120)); // ₹51.20
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 prevents overflow on large amounts
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_minor(tax as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as rupees at paise precision, e.g. `₹320.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.major().abs(), self.minor_part())
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

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
