//! Promotion eligibility rule.

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use super::PurchaseRecord;
use crate::money::Money;

/// Why a customer does not yet qualify for promotion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Ineligibility {
    #[error(
        "the customer has to have at least {required} active movies during the last {window_days} days (has {active})"
    )]
    TooFewActivePurchases {
        active: usize,
        required: usize,
        window_days: i64,
    },

    #[error(
        "the customer has to have at least {required} spent during the last {window_days} days (spent {spent})"
    )]
    InsufficientSpend {
        spent: Money,
        required: Money,
        window_days: i64,
    },
}

/// Thresholds a Regular customer must meet to become Advanced.
///
/// Both must hold at the same instant:
/// - at least `min_active_purchases` purchases that never expire or whose
///   expiration falls within the last `active_window_days`;
/// - at least `min_spend` paid for purchases made within the last
///   `spend_window_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionPolicy {
    pub min_active_purchases: usize,
    pub active_window_days: i64,
    pub min_spend: Money,
    pub spend_window_days: i64,
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self {
            min_active_purchases: 2,
            active_window_days: 30,
            min_spend: Money::from_cents_const(100 * 100),
            spend_window_days: 365,
        }
    }
}

impl PromotionPolicy {
    /// Checks a purchase history against the thresholds as of `now`.
    pub fn check(&self, purchases: &[PurchaseRecord], now: DateTime<Utc>) -> Result<(), Ineligibility> {
        let active = self.active_purchase_count(purchases, now);
        if active < self.min_active_purchases {
            return Err(Ineligibility::TooFewActivePurchases {
                active,
                required: self.min_active_purchases,
                window_days: self.active_window_days,
            });
        }

        let spent = self.recent_spend(purchases, now);
        if spent < self.min_spend {
            return Err(Ineligibility::InsufficientSpend {
                spent,
                required: self.min_spend,
                window_days: self.spend_window_days,
            });
        }

        Ok(())
    }

    /// Counts purchases that are perpetual or expired no earlier than the active window.
    pub fn active_purchase_count(&self, purchases: &[PurchaseRecord], now: DateTime<Utc>) -> usize {
        let cutoff = days_before(now, self.active_window_days);
        purchases
            .iter()
            .filter(|p| match p.expiration().date() {
                None => true,
                Some(date) => date >= cutoff,
            })
            .count()
    }

    /// Sums prices of purchases made strictly after the start of the spend window.
    pub fn recent_spend(&self, purchases: &[PurchaseRecord], now: DateTime<Utc>) -> Money {
        let cutoff = days_before(now, self.spend_window_days);
        let cents: i64 = purchases
            .iter()
            .filter(|p| p.purchased_at() > cutoff)
            .map(|p| p.price().cents())
            .sum();
        // A subset of the customer's spend, which is itself bounded by Money::MAX.
        Money::from_cents(cents).unwrap_or(Money::MAX)
    }
}

fn days_before(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
