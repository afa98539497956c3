//! Customer aggregate and related types.

mod aggregate;
mod events;
mod promotion;
mod purchase;
mod status;
mod value_objects;

pub use aggregate::Customer;
pub use events::{
    CustomerEvent, CustomerPromotedData, CustomerRegisteredData, CustomerRenamedData,
    MoviePurchasedData,
};
pub use promotion::{Ineligibility, PromotionPolicy};
pub use purchase::PurchaseRecord;
pub use status::CustomerStatus;
pub use value_objects::{EmailAddress, PersonName};

use common::{MovieId, Version};
use thiserror::Error;

use crate::error::{ErrorKind, ValidationError};
use crate::money::Money;

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CustomerError {
    /// An unexpired purchase of the movie already exists.
    #[error("The movie is already purchased: {movie_name}")]
    AlreadyOwned { movie_id: MovieId, movie_name: String },

    /// The customer has no further status to be promoted to.
    #[error("The customer already has the Advanced status")]
    AlreadyPromoted,

    /// The purchase history does not meet the promotion thresholds.
    #[error("Cannot promote the customer: {0}")]
    NotEligible(Ineligibility),

    /// Input to the operation was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Recording the purchase would push total spend past the money bound.
    #[error("Money spent {current} plus {price} exceeds the maximum of {}", Money::MAX)]
    SpendOverflow { current: Money, price: Money },

    /// An event stream did not start with a registration.
    #[error("Event stream does not start with CustomerRegistered")]
    NotRegistered,

    /// A recorded event contradicts the state built from the events before it.
    #[error("Inconsistent customer history at version {version}: {reason}")]
    InconsistentHistory {
        version: Version,
        reason: &'static str,
    },
}

impl CustomerError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CustomerError::AlreadyOwned { .. }
            | CustomerError::AlreadyPromoted
            | CustomerError::NotEligible(_) => ErrorKind::StateConflict,
            CustomerError::Validation(_) => ErrorKind::Validation,
            CustomerError::SpendOverflow { .. }
            | CustomerError::NotRegistered
            | CustomerError::InconsistentHistory { .. } => ErrorKind::Internal,
        }
    }
}
