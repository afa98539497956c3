//! Customer loyalty status state machine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CustomerError;

/// The loyalty status of a customer.
///
/// State transitions:
/// ```text
/// Regular ──promote──► Advanced
/// ```
/// Advanced is terminal; there is no demotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CustomerStatus {
    /// Every new customer starts here. No discount.
    #[default]
    Regular,

    /// Earned through promotion. 25% off every purchase.
    Advanced,
}

/// Per-status data: what it costs and where it can go.
struct StatusProfile {
    discount_rate: Decimal,
    promotes_to: Option<CustomerStatus>,
}

impl CustomerStatus {
    fn profile(&self) -> StatusProfile {
        match self {
            CustomerStatus::Regular => StatusProfile {
                discount_rate: Decimal::ZERO,
                promotes_to: Some(CustomerStatus::Advanced),
            },
            CustomerStatus::Advanced => StatusProfile {
                discount_rate: Decimal::new(25, 2),
                promotes_to: None,
            },
        }
    }

    /// Returns the discount as a fraction (0.25 = 25% off).
    pub fn discount_rate(&self) -> Decimal {
        self.profile().discount_rate
    }

    /// Returns the factor base prices are multiplied by (`1 - discount`).
    pub fn price_multiplier(&self) -> Decimal {
        Decimal::ONE - self.discount_rate()
    }

    /// Returns true if a promotion from this status exists.
    pub fn can_promote(&self) -> bool {
        self.profile().promotes_to.is_some()
    }

    /// Returns true for the Advanced status.
    pub fn is_advanced(&self) -> bool {
        matches!(self, CustomerStatus::Advanced)
    }

    /// Returns the status a promotion leads to.
    ///
    /// Eligibility is checked by the customer aggregate; this only encodes
    /// which transitions exist.
    pub fn promote(&self) -> Result<CustomerStatus, CustomerError> {
        self.profile()
            .promotes_to
            .ok_or(CustomerError::AlreadyPromoted)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Regular => "Regular",
            CustomerStatus::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
