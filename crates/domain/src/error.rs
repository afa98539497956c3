//! Domain error types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::customer::CustomerError;

/// Broad classification of a failure, used by callers to decide how to
/// surface it (e.g. which HTTP status to return).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input; the caller can fix it and retry.
    Validation,
    /// A legitimate business rejection given the current state.
    StateConflict,
    /// An identity lookup found nothing.
    NotFound,
    /// An invariant was violated; the operation was aborted.
    Internal,
}

impl ErrorKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::StateConflict => "state_conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule a rejected dollar amount broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountViolation {
    #[error("dollar amount cannot be negative")]
    Negative,

    #[error("dollar amount cannot be greater than {}", crate::money::Money::MAX)]
    AboveMaximum,

    #[error("dollar amount cannot contain part of a penny")]
    FractionalCent,
}

/// Errors raised when constructing a value object from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The amount is not a valid money value.
    #[error("Invalid amount {amount}: {violation}")]
    InvalidAmount {
        amount: Decimal,
        violation: AmountViolation,
    },

    /// The customer name is empty or too long.
    #[error("Invalid customer name: {reason}")]
    InvalidName { reason: &'static str },

    /// The email address is empty, too long or malformed.
    #[error("Invalid email '{email}': {reason}")]
    InvalidEmail { email: String, reason: &'static str },

    /// A concrete expiration date lies before the moment it was created.
    #[error("Expiration date {date} is in the past (now: {now})")]
    ExpirationInPast {
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

impl ValidationError {
    pub(crate) fn amount(amount: Decimal, violation: AmountViolation) -> Self {
        ValidationError::InvalidAmount { amount, violation }
    }
}

/// Errors that can occur during domain operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A value object rejected its input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The customer aggregate rejected an operation.
    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),
}

impl DomainError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::Customer(err) => err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::amount(Decimal::new(-1, 2), AmountViolation::Negative);
        assert_eq!(
            err.to_string(),
            "Invalid amount -0.01: dollar amount cannot be negative"
        );

        let err = ValidationError::InvalidName {
            reason: "name cannot be empty",
        };
        assert_eq!(err.to_string(), "Invalid customer name: name cannot be empty");
    }

    #[test]
    fn test_above_maximum_mentions_limit() {
        assert_eq!(
            AmountViolation::AboveMaximum.to_string(),
            "dollar amount cannot be greater than $1000000.00"
        );
    }

    #[test]
    fn test_domain_error_kind() {
        let err: DomainError = ValidationError::InvalidName { reason: "x" }.into();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: DomainError = CustomerError::AlreadyPromoted.into();
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert_eq!(err.kind().to_string(), "state_conflict");
    }
}
