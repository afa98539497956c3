//! Customer domain events.

use chrono::{DateTime, Utc};
use common::CustomerId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;
use crate::money::Money;

use super::{CustomerStatus, EmailAddress, PersonName, PurchaseRecord};

/// Changes recorded by the customer aggregate.
///
/// The persistence layer drains these after a successful operation to
/// decide what to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    /// Customer was registered.
    CustomerRegistered(CustomerRegisteredData),

    /// Customer name was changed.
    CustomerRenamed(CustomerRenamedData),

    /// Customer bought a movie.
    MoviePurchased(MoviePurchasedData),

    /// Customer status was raised.
    CustomerPromoted(CustomerPromotedData),
}

impl DomainEvent for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::CustomerRegistered(_) => "CustomerRegistered",
            CustomerEvent::CustomerRenamed(_) => "CustomerRenamed",
            CustomerEvent::MoviePurchased(_) => "MoviePurchased",
            CustomerEvent::CustomerPromoted(_) => "CustomerPromoted",
        }
    }
}

/// Data for CustomerRegistered event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRegisteredData {
    pub customer_id: CustomerId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub registered_at: DateTime<Utc>,
}

/// Data for CustomerRenamed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRenamedData {
    pub old_name: PersonName,
    pub new_name: PersonName,
}

/// Data for MoviePurchased event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePurchasedData {
    /// The purchase that was appended.
    pub purchase: PurchaseRecord,

    /// Total money spent including this purchase.
    pub money_spent: Money,
}

/// Data for CustomerPromoted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPromotedData {
    pub from: CustomerStatus,
    pub to: CustomerStatus,
    pub promoted_at: DateTime<Utc>,
}

// Helper constructors
impl CustomerEvent {
    pub(crate) fn customer_registered(
        customer_id: CustomerId,
        name: PersonName,
        email: EmailAddress,
        registered_at: DateTime<Utc>,
    ) -> Self {
        CustomerEvent::CustomerRegistered(CustomerRegisteredData {
            customer_id,
            name,
            email,
            registered_at,
        })
    }

    pub(crate) fn customer_renamed(old_name: PersonName, new_name: PersonName) -> Self {
        CustomerEvent::CustomerRenamed(CustomerRenamedData { old_name, new_name })
    }

    pub(crate) fn movie_purchased(purchase: PurchaseRecord, money_spent: Money) -> Self {
        CustomerEvent::MoviePurchased(MoviePurchasedData {
            purchase,
            money_spent,
        })
    }

    pub(crate) fn customer_promoted(
        from: CustomerStatus,
        to: CustomerStatus,
        promoted_at: DateTime<Utc>,
    ) -> Self {
        CustomerEvent::CustomerPromoted(CustomerPromotedData {
            from,
            to,
            promoted_at,
        })
    }
}
