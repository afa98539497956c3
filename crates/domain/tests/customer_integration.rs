//! Integration tests for the Customer aggregate.
//!
//! These tests drive the aggregate through realistic purchase histories and
//! check pricing, expiration and promotion together.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use common::{CustomerId, MovieId};
use domain::{
    Aggregate, Customer, CustomerError, CustomerStatus, DomainError, EmailAddress, ErrorKind,
    Ineligibility, LicensingModel, Money, Movie, PersonName, PricingPolicy, PromotionPolicy,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

fn register() -> Customer {
    Customer::register(
        CustomerId::new(),
        PersonName::create("Alex Moviegoer").unwrap(),
        EmailAddress::create("alex@example.com").unwrap(),
        start(),
    )
}

fn catalogue(policy: &PricingPolicy, count: usize) -> Vec<Movie> {
    (0..count)
        .map(|i| {
            let licensing = if i % 2 == 0 {
                policy.time_limited()
            } else {
                policy.perpetual()
            };
            Movie::new(MovieId::new(), format!("Movie {i}"), licensing)
        })
        .collect()
}

fn spend_from_history(customer: &Customer) -> i64 {
    customer.purchases().iter().map(|p| p.price().cents()).sum()
}

mod purchasing {
    use super::*;

    #[test]
    fn regular_pays_base_price_advanced_pays_discount() {
        let heat = Movie::new(MovieId::new(), "Heat", LicensingModel::LIFE_LONG);
        let pricey = PricingPolicy {
            perpetual_price: Money::from_dollars(40).unwrap(),
            ..PricingPolicy::default()
        };

        let mut customer = register();
        assert_eq!(
            customer.purchase_movie(&heat, start()).unwrap().price(),
            Money::from_dollars(8).unwrap()
        );

        for movie in catalogue(&pricey, 6).iter().filter(|m| {
            matches!(m.licensing(), LicensingModel::Perpetual { .. })
        }) {
            customer.purchase_movie(movie, start()).unwrap();
        }
        customer.promote(start()).unwrap();

        let other = Movie::new(MovieId::new(), "Ronin", LicensingModel::LIFE_LONG);
        assert_eq!(
            customer.purchase_movie(&other, start()).unwrap().price(),
            Money::from_dollars(6).unwrap()
        );
    }

    #[test]
    fn rental_can_be_renewed_only_after_it_expires() {
        let mut customer = register();
        let alien = Movie::new(MovieId::new(), "Alien", LicensingModel::TWO_DAYS);

        let first = customer.purchase_movie(&alien, start()).unwrap();
        assert_eq!(
            first.expiration().date(),
            Some(start() + TimeDelta::days(2))
        );

        let just_before = start() + TimeDelta::days(2) - TimeDelta::milliseconds(1);
        let err = customer.purchase_movie(&alien, just_before).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert_eq!(err.to_string(), "The movie is already purchased: Alien");

        let renewed = customer
            .purchase_movie(&alien, start() + TimeDelta::days(2))
            .unwrap();
        assert_eq!(
            renewed.expiration().date(),
            Some(start() + TimeDelta::days(4))
        );
        assert_eq!(customer.money_spent(), Money::from_dollars(8).unwrap());
    }

    #[test]
    fn events_describe_every_change() {
        let mut customer = register();
        let alien = Movie::new(MovieId::new(), "Alien", LicensingModel::TWO_DAYS);
        customer.purchase_movie(&alien, start()).unwrap();
        customer.rename("Alex M.").unwrap();

        let types: Vec<_> = customer
            .take_uncommitted_events()
            .iter()
            .map(domain::DomainEvent::event_type)
            .collect();
        assert_eq!(
            types,
            vec!["CustomerRegistered", "MoviePurchased", "CustomerRenamed"]
        );
        assert!(customer.uncommitted_events().is_empty());
        assert_eq!(customer.version().as_i64(), 3);
    }
}

mod promotion {
    use super::*;

    #[test]
    fn two_perpetual_purchases_are_not_enough() {
        let mut customer = register();
        for name in ["Heat", "Ronin"] {
            let movie = Movie::new(MovieId::new(), name, LicensingModel::LIFE_LONG);
            customer.purchase_movie(&movie, start()).unwrap();
        }

        let err = customer.promote(start()).unwrap_err();
        assert!(matches!(
            err,
            CustomerError::NotEligible(Ineligibility::InsufficientSpend { .. })
        ));
        assert_eq!(DomainError::from(err).kind(), ErrorKind::StateConflict);
    }

    #[test]
    fn three_purchases_totalling_120_promote() {
        let policy = PricingPolicy {
            perpetual_price: Money::from_dollars(40).unwrap(),
            ..PricingPolicy::default()
        };
        let mut customer = register();
        for i in 0..3 {
            let movie = Movie::new(MovieId::new(), format!("Box {i}"), policy.perpetual());
            customer.purchase_movie(&movie, start()).unwrap();
        }

        customer.promote(start()).unwrap();
        assert_eq!(customer.status(), CustomerStatus::Advanced);
        assert!(matches!(
            customer.promote(start()),
            Err(CustomerError::AlreadyPromoted)
        ));
    }

    #[test]
    fn old_purchases_stop_counting() {
        let policy = PricingPolicy {
            time_limited_price: Money::from_dollars(60).unwrap(),
            ..PricingPolicy::default()
        };
        let mut customer = register();
        for i in 0..2 {
            let movie = Movie::new(MovieId::new(), format!("Rental {i}"), policy.time_limited());
            customer.purchase_movie(&movie, start()).unwrap();
        }

        // Rentals expired two days in; active until 30 days after that.
        assert!(customer.can_promote(start() + TimeDelta::days(32)).is_ok());
        assert!(matches!(
            customer.can_promote(start() + TimeDelta::days(33)),
            Err(CustomerError::NotEligible(
                Ineligibility::TooFewActivePurchases { active: 0, .. }
            ))
        ));
    }

    #[test]
    fn spend_must_fall_within_the_year() {
        let policy = PricingPolicy {
            perpetual_price: Money::from_dollars(60).unwrap(),
            ..PricingPolicy::default()
        };
        let mut customer = register();
        let old = Movie::new(MovieId::new(), "Old", policy.perpetual());
        customer.purchase_movie(&old, start()).unwrap();

        let a_year_later = start() + TimeDelta::days(400);
        let recent = Movie::new(MovieId::new(), "Recent", policy.perpetual());
        customer.purchase_movie(&recent, a_year_later).unwrap();

        // Both perpetual purchases are active, but only $60 falls within the year.
        assert!(matches!(
            customer.promote(a_year_later),
            Err(CustomerError::NotEligible(Ineligibility::InsufficientSpend { .. }))
        ));
        assert_eq!(customer.status(), CustomerStatus::Regular);
    }

    #[test]
    fn custom_thresholds() {
        let policy = PromotionPolicy {
            min_active_purchases: 1,
            min_spend: Money::from_dollars(8).unwrap(),
            ..PromotionPolicy::default()
        };
        let mut customer = register();
        let heat = Movie::new(MovieId::new(), "Heat", LicensingModel::LIFE_LONG);
        customer.purchase_movie(&heat, start()).unwrap();

        assert!(customer.promote(start()).is_err());
        customer.promote_with(&policy, start()).unwrap();
        assert_eq!(customer.status(), CustomerStatus::Advanced);
    }
}

proptest! {
    #[test]
    fn money_roundtrips_any_valid_cent_amount(cents in 0i64..=100_000_000) {
        let amount = Decimal::new(cents, 2);
        let money = Money::create(amount).unwrap();
        prop_assert_eq!(money.cents(), cents);
        prop_assert_eq!(money.to_decimal(), amount);
    }

    #[test]
    fn money_rejects_sub_cent_amounts(cents in 0i64..100_000_000, extra in 1i64..10) {
        let amount = Decimal::new(cents * 10 + extra, 3);
        prop_assert!(Money::create(amount).is_err());
    }

    #[test]
    fn money_spent_matches_history(picks in prop::collection::vec((0usize..8, 0i64..10), 1..40)) {
        let movies = catalogue(&PricingPolicy::default(), 8);
        let mut customer = register();
        let mut now = start();

        for (index, step_days) in picks {
            now += TimeDelta::days(step_days);
            let _ = customer.purchase_movie(&movies[index], now);
            let _ = customer.promote(now);
            prop_assert_eq!(customer.money_spent().cents(), spend_from_history(&customer));
        }
    }

    #[test]
    fn failed_purchase_changes_nothing(index in 0usize..4) {
        let movies = catalogue(&PricingPolicy::default(), 4);
        let mut customer = register();
        customer.purchase_movie(&movies[index], start()).unwrap();
        let before = customer.clone();

        prop_assert!(customer.purchase_movie(&movies[index], start()).is_err());
        prop_assert_eq!(customer, before);
    }
}
