//! Purchase expiration dates.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// When a purchased movie stops being available to the customer.
///
/// Either a concrete instant or "never". Serialized as a nullable timestamp
/// where `null` means the purchase never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpirationDate(Option<DateTime<Utc>>);

impl ExpirationDate {
    /// An expiration date that is never reached.
    pub fn infinite() -> Self {
        Self(None)
    }

    /// Creates an expiration at `date`, which must not lie before `now`.
    pub fn at_date(date: DateTime<Utc>, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        if date < now {
            return Err(ValidationError::ExpirationInPast { date, now });
        }
        Ok(Self(Some(date)))
    }

    /// Expiration `days` after `start`. Saturates at the latest representable instant.
    pub(crate) fn days_after(start: DateTime<Utc>, days: u16) -> Self {
        let date = start
            .checked_add_signed(TimeDelta::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self(Some(date))
    }

    /// Returns true if this expiration is never reached.
    pub fn is_infinite(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the concrete date, or `None` for an infinite expiration.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Returns true once `now` has reached the expiration date.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.0 {
            Some(date) => now >= date,
            None => false,
        }
    }
}

impl std::fmt::Display for ExpirationDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.to_rfc3339()),
            None => f.write_str("never"),
        }
    }
}
