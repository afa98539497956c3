//! Purchase records.

use chrono::{DateTime, Utc};
use common::MovieId;
use serde::{Deserialize, Serialize};

use crate::expiration::ExpirationDate;
use crate::money::Money;

/// A movie bought by a customer.
///
/// Price and expiration are fixed when the purchase is made and never
/// recomputed, even if the movie's pricing or the customer's status
/// changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    movie_id: MovieId,
    price: Money,
    purchased_at: DateTime<Utc>,
    expiration: ExpirationDate,
}

impl PurchaseRecord {
    pub(crate) fn new(
        movie_id: MovieId,
        price: Money,
        purchased_at: DateTime<Utc>,
        expiration: ExpirationDate,
    ) -> Self {
        Self {
            movie_id,
            price,
            purchased_at,
            expiration,
        }
    }

    /// Returns the purchased movie.
    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    /// Returns the price paid.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Returns when the purchase was made.
    pub fn purchased_at(&self) -> DateTime<Utc> {
        self.purchased_at
    }

    /// Returns when the purchase expires.
    pub fn expiration(&self) -> ExpirationDate {
        self.expiration
    }

    /// Returns true if the movie is still available to the customer at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.expiration.is_expired(now)
    }
}
