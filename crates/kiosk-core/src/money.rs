//! # Money Module
//!
//! Provides the `Money` type for CZK amounts and the price helpers the
//! front-ends use on raw form input.
//!
//! ## Wire Format vs. Arithmetic
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  On the wire every amount is a JSON number in CZK:                      │
//! │    { "price": 25.5 }                                                    │
//! │                                                                         │
//! │  Summing those as floats drifts:                                        │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Haléře                                           │
//! │    25.5 CZK  ──► Money(2550) ──► arithmetic in i64 ──► 25.5 on the wire │
//! │    Rounding happens exactly once, when a number enters the system.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::money::Money;
//!
//! let price = Money::from_halere(2550); // 25,50 Kč
//! let line = price * 3;
//! assert_eq!(line.halere(), 7650);
//! assert_eq!(line.to_string(), "76,50\u{a0}Kč");
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use thiserror::Error;

/// Number of decimal places used for CZK amounts.
pub const PRICE_PRECISION: usize = 2;

/// Highest price accepted anywhere in the system (999 999,99 Kč).
pub const MAX_PRICE: f64 = 999_999.99;

/// Lowest non-zero price (0,01 Kč).
pub const MIN_PRICE: f64 = 0.01;

// =============================================================================
// Money Type
// =============================================================================

/// A CZK amount stored in haléře (1/100 CZK).
///
/// Serialized as a plain JSON number in CZK (`2550` haléřů ⇄ `25.5`) so the
/// TypeScript side keeps seeing `number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from haléře.
    #[inline]
    pub const fn from_halere(halere: i64) -> Self {
        Money(halere)
    }

    /// Creates a Money value from a CZK float, rounding to the nearest haléř.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// assert_eq!(Money::from_czk_f64(25.5).halere(), 2550);
    /// assert_eq!(Money::from_czk_f64(0.125).halere(), 13);
    /// ```
    pub fn from_czk_f64(czk: f64) -> Self {
        Money((czk * 100.0).round() as i64)
    }

    /// Returns the amount in haléře.
    #[inline]
    pub const fn halere(&self) -> i64 {
        self.0
    }

    /// Returns the amount in CZK as a float (for the wire and display only).
    #[inline]
    pub fn to_czk_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whole koruny portion.
    #[inline]
    pub const fn koruny(&self) -> i64 {
        self.0 / 100
    }

    /// Haléře portion, always 0-99.
    #[inline]
    pub const fn halere_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies a unit price by a quantity, `None` on overflow.
    ///
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// assert_eq!(Money::from_halere(299).checked_multiply_quantity(3), Some(Money::from_halere(897)));
    /// assert_eq!(Money::from_halere(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(halere) => Some(Money(halere)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(halere) => Some(Money(halere)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
// The operator impls saturate instead of panicking. Cart totals use the
// checked methods above and reject the change instead.

/// Czech currency format: `1 234,50 Kč`.
///
/// Groups of thousands and the currency suffix are separated by a
/// non-breaking space, matching `Intl.NumberFormat('cs-CZ')`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.koruny().abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('\u{a0}');
            }
            grouped.push(ch);
        }

        write!(f, "{}{},{:02}\u{a0}Kč", sign, grouped, self.halere_part())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_czk_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let czk = f64::deserialize(deserializer)?;
        if !czk.is_finite() {
            return Err(D::Error::custom("amount must be a finite number"));
        }
        Ok(Money::from_czk_f64(czk))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Float Price Helpers
// =============================================================================
// Form inputs arrive as floats or strings before they become Money. These
// helpers keep the front-end rounding rules in one place.

/// Error returned when a price string holds no number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a number")]
pub struct PriceParseError(pub String);

/// Rounds a CZK float to two decimals.
///
/// ```rust
/// use kiosk_core::money::round_price;
///
/// assert_eq!(round_price(10.126), 10.13);
/// assert_eq!(round_price(0.1 + 0.2), 0.3);
/// ```
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Parses a price from text and rounds it to two decimals.
///
/// Like the browser's `parseFloat`, only the leading numeric part is read:
/// `"12.346 Kč"` parses as `12.35`.
pub fn parse_price(value: &str) -> Result<f64, PriceParseError> {
    string_to_price(value).map(round_price)
}

/// Parses the leading number of a price string without rounding.
pub fn string_to_price(value: &str) -> Result<f64, PriceParseError> {
    let trimmed = value.trim_start();
    let prefix = leading_number(trimmed);
    prefix
        .parse::<f64>()
        .map_err(|_| PriceParseError(value.to_string()))
}

/// Formats a price with exactly two decimals for API payloads.
pub fn price_to_string(price: f64) -> String {
    format!("{:.*}", PRICE_PRECISION, price)
}

/// Checks that a price is a finite number in `(0, 999 999.99]`.
pub fn validate_price(price: f64) -> bool {
    price.is_finite() && price > 0.0 && price <= MAX_PRICE
}

/// Returns the longest prefix of `s` that reads as a decimal number.
fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || has_digits {
            has_digits |= frac_end > frac_start;
            end = frac_end;
        }
    }

    if !has_digits {
        return "";
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

// =============================================================================
// Unit Tests
// =============================================================================
