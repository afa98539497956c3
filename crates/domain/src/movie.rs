//! Movies and their licensing models.

use chrono::{DateTime, Utc};
use common::MovieId;
use serde::{Deserialize, Serialize};

use crate::customer::CustomerStatus;
use crate::error::ValidationError;
use crate::expiration::ExpirationDate;
use crate::money::Money;

/// How a movie is licensed to the customer who buys it.
///
/// The set of kinds is closed; each carries its own base price and
/// expiration rule. Pricing and expiration are computed by matching on
/// the kind, so adding a kind is a compile error at every site that needs
/// to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LicensingModel {
    /// Rented for a fixed number of days after purchase.
    TimeLimited { base_price: Money, rental_days: u16 },

    /// Owned forever.
    Perpetual { base_price: Money },
}

impl LicensingModel {
    /// Default two-day rental at $4.
    pub const TWO_DAYS: LicensingModel = LicensingModel::TimeLimited {
        base_price: Money::from_cents_const(400),
        rental_days: 2,
    };

    /// Default lifelong licence at $8.
    pub const LIFE_LONG: LicensingModel = LicensingModel::Perpetual {
        base_price: Money::from_cents_const(800),
    };

    /// Returns the undiscounted price.
    pub fn base_price(&self) -> Money {
        match *self {
            LicensingModel::TimeLimited { base_price, .. } => base_price,
            LicensingModel::Perpetual { base_price } => base_price,
        }
    }

    /// Returns when a purchase made at `purchased_at` expires.
    pub fn expiration_from(&self, purchased_at: DateTime<Utc>) -> ExpirationDate {
        match *self {
            LicensingModel::TimeLimited { rental_days, .. } => {
                ExpirationDate::days_after(purchased_at, rental_days)
            }
            LicensingModel::Perpetual { .. } => ExpirationDate::infinite(),
        }
    }

    /// Returns which kind of licence this is, without its parameters.
    pub fn kind(&self) -> MovieKind {
        match self {
            LicensingModel::TimeLimited { .. } => MovieKind::TimeLimited,
            LicensingModel::Perpetual { .. } => MovieKind::Perpetual,
        }
    }
}

/// Licensing kind without prices; resolved to a [`LicensingModel`] by a
/// [`PricingPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovieKind {
    TimeLimited,
    Perpetual,
}

impl MovieKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieKind::TimeLimited => "TimeLimited",
            MovieKind::Perpetual => "Perpetual",
        }
    }
}

impl std::fmt::Display for MovieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Base prices and rental length for each licensing kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub time_limited_price: Money,
    pub rental_days: u16,
    pub perpetual_price: Money,
}

impl PricingPolicy {
    /// Licensing for a time-limited rental under this policy.
    pub fn time_limited(&self) -> LicensingModel {
        LicensingModel::TimeLimited {
            base_price: self.time_limited_price,
            rental_days: self.rental_days,
        }
    }

    /// Licensing for a perpetual purchase under this policy.
    pub fn perpetual(&self) -> LicensingModel {
        LicensingModel::Perpetual {
            base_price: self.perpetual_price,
        }
    }

    /// Licensing for `kind` under this policy.
    pub fn licensing(&self, kind: MovieKind) -> LicensingModel {
        match kind {
            MovieKind::TimeLimited => self.time_limited(),
            MovieKind::Perpetual => self.perpetual(),
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            time_limited_price: LicensingModel::TWO_DAYS.base_price(),
            rental_days: 2,
            perpetual_price: LicensingModel::LIFE_LONG.base_price(),
        }
    }
}

/// A movie in the catalogue.
///
/// Movies have a lifecycle independent of customers; purchases refer to
/// them by [`MovieId`] only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    id: MovieId,
    name: String,
    licensing: LicensingModel,
}

impl Movie {
    /// Creates a movie.
    pub fn new(id: MovieId, name: impl Into<String>, licensing: LicensingModel) -> Self {
        Self {
            id,
            name: name.into(),
            licensing,
        }
    }

    /// Returns the movie ID.
    pub fn id(&self) -> MovieId {
        self.id
    }

    /// Returns the movie title.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the licensing model.
    pub fn licensing(&self) -> LicensingModel {
        self.licensing
    }

    /// Returns the undiscounted price.
    pub fn base_price(&self) -> Money {
        self.licensing.base_price()
    }

    /// Returns when a purchase made at `purchased_at` expires.
    pub fn expiration_from(&self, purchased_at: DateTime<Utc>) -> ExpirationDate {
        self.licensing.expiration_from(purchased_at)
    }

    /// Returns the price a customer with `status` pays.
    ///
    /// Fails only if the discounted base price lands on a fraction of a cent.
    pub fn price(&self, status: CustomerStatus) -> Result<Money, ValidationError> {
        self.base_price().scale(status.price_multiplier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn purchase_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_default_base_prices() {
        assert_eq!(LicensingModel::TWO_DAYS.base_price().cents(), 400);
        assert_eq!(LicensingModel::LIFE_LONG.base_price().cents(), 800);
    }

    #[test]
    fn test_time_limited_expires_two_days_after_purchase() {
        let movie = Movie::new(MovieId::new(), "Alien", LicensingModel::TWO_DAYS);
        let expiration = movie.expiration_from(purchase_time());
        assert_eq!(
            expiration.date(),
            Some(purchase_time() + TimeDelta::days(2))
        );
    }

    #[test]
    fn test_perpetual_never_expires() {
        let movie = Movie::new(MovieId::new(), "Heat", LicensingModel::LIFE_LONG);
        assert!(movie.expiration_from(purchase_time()).is_infinite());
        assert!(
            movie
                .expiration_from(purchase_time() + TimeDelta::days(10_000))
                .is_infinite()
        );
    }

    #[test]
    fn test_price_by_status() {
        let movie = Movie::new(MovieId::new(), "Heat", LicensingModel::LIFE_LONG);
        assert_eq!(movie.price(CustomerStatus::Regular).unwrap().cents(), 800);
        assert_eq!(movie.price(CustomerStatus::Advanced).unwrap().cents(), 600);

        let rental = Movie::new(MovieId::new(), "Alien", LicensingModel::TWO_DAYS);
        assert_eq!(rental.price(CustomerStatus::Advanced).unwrap().cents(), 300);
    }

    #[test]
    fn test_discount_on_fractional_cent_fails() {
        let odd = LicensingModel::Perpetual {
            base_price: Money::from_cents(1).unwrap(),
        };
        let movie = Movie::new(MovieId::new(), "Short", odd);
        assert!(movie.price(CustomerStatus::Regular).is_ok());
        assert!(movie.price(CustomerStatus::Advanced).is_err());
    }

    #[test]
    fn test_pricing_policy_builds_licensing() {
        let policy = PricingPolicy {
            time_limited_price: Money::from_dollars(5).unwrap(),
            rental_days: 3,
            perpetual_price: Money::from_dollars(40).unwrap(),
        };
        assert_eq!(
            policy.time_limited(),
            LicensingModel::TimeLimited {
                base_price: Money::from_dollars(5).unwrap(),
                rental_days: 3,
            }
        );
        assert_eq!(policy.perpetual().base_price().cents(), 4000);
        assert_eq!(PricingPolicy::default().time_limited(), LicensingModel::TWO_DAYS);
        assert_eq!(PricingPolicy::default().perpetual(), LicensingModel::LIFE_LONG);
        assert_eq!(
            policy.licensing(MovieKind::Perpetual).kind(),
            MovieKind::Perpetual
        );
        assert_eq!(
            policy.licensing(MovieKind::TimeLimited),
            policy.time_limited()
        );
    }

    #[test]
    fn test_licensing_serialization() {
        let json = serde_json::to_value(LicensingModel::TWO_DAYS).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "time_limited", "base_price": 400, "rental_days": 2 })
        );
        let restored: LicensingModel = serde_json::from_value(json).unwrap();
        assert_eq!(restored, LicensingModel::TWO_DAYS);
    }
}
