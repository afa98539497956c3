//! Storefront error types.

use common::{CustomerId, MovieId, Version};
use domain::{CustomerError, DomainError, ErrorKind, ValidationError};
use thiserror::Error;

/// Errors raised by repository implementations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepositoryError {
    /// The customer was changed by someone else since it was loaded.
    #[error(
        "Concurrency conflict for customer {customer_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        customer_id: CustomerId,
        expected: Version,
        actual: Version,
    },

    /// Another customer already holds this email address.
    #[error("Email is already in use: {0}")]
    DuplicateEmail(String),

    /// A movie with this ID is already in the catalogue.
    #[error("Movie already exists: {0}")]
    DuplicateMovie(MovieId),
}

/// Errors that can occur in storefront operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorefrontError {
    #[error("Invalid customer id: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Invalid movie id: {0}")]
    MovieNotFound(MovieId),

    #[error("Email is already in use: {0}")]
    EmailInUse(String),

    /// The domain model rejected the operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl StorefrontError {
    /// Classifies the error so a transport layer can pick a status code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorefrontError::CustomerNotFound(_) | StorefrontError::MovieNotFound(_) => {
                ErrorKind::NotFound
            }
            StorefrontError::EmailInUse(_) => ErrorKind::StateConflict,
            StorefrontError::Domain(err) => err.kind(),
            StorefrontError::Repository(RepositoryError::ConcurrencyConflict { .. })
            | StorefrontError::Repository(RepositoryError::DuplicateEmail(_))
            | StorefrontError::Repository(RepositoryError::DuplicateMovie(_)) => {
                ErrorKind::StateConflict
            }
        }
    }
}

impl From<CustomerError> for StorefrontError {
    fn from(err: CustomerError) -> Self {
        StorefrontError::Domain(DomainError::Customer(err))
    }
}

impl From<ValidationError> for StorefrontError {
    fn from(err: ValidationError) -> Self {
        StorefrontError::Domain(DomainError::Validation(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind() {
        let err = StorefrontError::CustomerNotFound(CustomerId::new());
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().starts_with("Invalid customer id: "));

        let err = StorefrontError::MovieNotFound(MovieId::new());
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_domain_kind_passes_through() {
        let err: StorefrontError = CustomerError::AlreadyPromoted.into();
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert_eq!(err.to_string(), "Customer error: The customer already has the Advanced status");

        let err: StorefrontError = ValidationError::InvalidName {
            reason: "name cannot be empty",
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_concurrency_conflict_display() {
        let customer_id = CustomerId::new();
        let err = StorefrontError::from(RepositoryError::ConcurrencyConflict {
            customer_id,
            expected: Version::new(1),
            actual: Version::new(3),
        });
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert_eq!(
            err.to_string(),
            format!(
                "Repository error: Concurrency conflict for customer {customer_id}: expected version 1, found 3"
            )
        );
    }
}
