//! Application configuration loaded from environment variables.

use domain::{Money, PricingPolicy, PromotionPolicy};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Storefront configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `text` or `json` (default: `text`)
/// - `STOREFRONT_TWO_DAY_PRICE_CENTS` — two-day rental base price (default: `400`)
/// - `STOREFRONT_LIFELONG_PRICE_CENTS` — lifelong licence base price (default: `800`)
/// - `STOREFRONT_PROMOTION_MIN_ACTIVE` — active purchases needed (default: `2`)
/// - `STOREFRONT_PROMOTION_ACTIVE_WINDOW_DAYS` — activity window (default: `30`)
/// - `STOREFRONT_PROMOTION_MIN_SPEND_CENTS` — spend needed (default: `10000`)
/// - `STOREFRONT_PROMOTION_SPEND_WINDOW_DAYS` — spend window (default: `365`)
///
/// A variable that is missing or does not parse falls back to its default.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub pricing: PricingPolicy,
    pub promotion: PromotionPolicy,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let cents = |key: &str, fallback: Money| {
            lookup(key)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .and_then(|c| Money::from_cents(c).ok())
                .unwrap_or(fallback)
        };
        let count = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());
        let days = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|d| *d >= 0)
        };

        let pricing = PricingPolicy {
            time_limited_price: cents(
                "STOREFRONT_TWO_DAY_PRICE_CENTS",
                defaults.pricing.time_limited_price,
            ),
            perpetual_price: cents(
                "STOREFRONT_LIFELONG_PRICE_CENTS",
                defaults.pricing.perpetual_price,
            ),
            ..defaults.pricing
        };

        let promotion = PromotionPolicy {
            min_active_purchases: count("STOREFRONT_PROMOTION_MIN_ACTIVE")
                .unwrap_or(defaults.promotion.min_active_purchases),
            active_window_days: days("STOREFRONT_PROMOTION_ACTIVE_WINDOW_DAYS")
                .unwrap_or(defaults.promotion.active_window_days),
            min_spend: cents(
                "STOREFRONT_PROMOTION_MIN_SPEND_CENTS",
                defaults.promotion.min_spend,
            ),
            spend_window_days: days("STOREFRONT_PROMOTION_SPEND_WINDOW_DAYS")
                .unwrap_or(defaults.promotion.spend_window_days),
        };

        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .and_then(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.log_format),
            pricing,
            promotion,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            pricing: PricingPolicy::default(),
            promotion: PromotionPolicy::default(),
        }
    }
}
