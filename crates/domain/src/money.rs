//! Dollar amounts.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{AmountViolation, ValidationError};

const MAX_CENTS: i64 = 1_000_000 * 100;

/// A non-negative dollar amount in whole cents, bounded by [`Money::MAX`].
///
/// Every constructor and every arithmetic operation re-validates the bounds,
/// so an out-of-range or sub-cent value can never be observed. Amounts cross
/// the boundary explicitly: build with [`Money::create`] or
/// [`Money::from_cents`], read back with [`Money::to_decimal`] or
/// [`Money::cents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money {
    cents: i64,
}

impl Money {
    /// The largest representable amount ($1,000,000.00).
    pub const MAX: Money = Money { cents: MAX_CENTS };

    /// Zero dollars.
    pub const ZERO: Money = Money { cents: 0 };

    /// Only for compile-time constants known to be in range.
    pub(crate) const fn from_cents_const(cents: i64) -> Self {
        assert!(cents >= 0 && cents <= MAX_CENTS);
        Self { cents }
    }

    /// Creates a money value from a decimal dollar amount.
    ///
    /// Fails if the amount is negative, above [`Money::MAX`], or carries a
    /// fraction of a cent (`1.005`).
    pub fn create(amount: Decimal) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::amount(amount, AmountViolation::Negative));
        }

        if amount > Self::MAX.to_decimal() {
            return Err(ValidationError::amount(amount, AmountViolation::AboveMaximum));
        }

        let cents = amount * Decimal::ONE_HUNDRED;
        if !cents.fract().is_zero() {
            return Err(ValidationError::amount(
                amount,
                AmountViolation::FractionalCent,
            ));
        }

        // Bounded by MAX above, so the conversion cannot fail.
        let cents = cents
            .to_i64()
            .ok_or_else(|| ValidationError::amount(amount, AmountViolation::AboveMaximum))?;
        Ok(Self { cents })
    }

    /// Creates a money value from a number of cents.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        let amount = Decimal::new(cents, 2);
        if cents < 0 {
            return Err(ValidationError::amount(amount, AmountViolation::Negative));
        }
        if cents > MAX_CENTS {
            return Err(ValidationError::amount(amount, AmountViolation::AboveMaximum));
        }
        Ok(Self { cents })
    }

    /// Creates a money value from whole dollars.
    pub fn from_dollars(dollars: i64) -> Result<Self, ValidationError> {
        match dollars.checked_mul(100) {
            Some(cents) => Self::from_cents(cents),
            None => Err(ValidationError::amount(
                Decimal::from(dollars),
                if dollars < 0 {
                    AmountViolation::Negative
                } else {
                    AmountViolation::AboveMaximum
                },
            )),
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the amount as a decimal number of dollars with two decimal places.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Adds another amount, failing if the sum exceeds [`Money::MAX`].
    pub fn add(&self, other: Money) -> Result<Money, ValidationError> {
        Self::from_cents(self.cents + other.cents)
    }

    /// Multiplies by a (possibly fractional) factor such as a discount multiplier.
    ///
    /// The product must still be a valid amount: in range and in whole cents.
    /// `$8.00 * 0.75` gives `$6.00`; `$0.01 * 0.5` fails.
    pub fn scale(&self, factor: Decimal) -> Result<Money, ValidationError> {
        let product = self
            .to_decimal()
            .checked_mul(factor)
            .ok_or_else(|| ValidationError::amount(factor, AmountViolation::AboveMaximum))?;
        Self::create(product.normalize())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl TryFrom<i64> for Money {
    type Error = ValidationError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::from_cents(cents)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.cents
    }
}
