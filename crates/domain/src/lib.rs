//! Domain layer for the movie storefront.
//!
//! This crate provides the core domain model:
//! - Value objects: [`Money`], [`ExpirationDate`], [`PersonName`], [`EmailAddress`]
//! - [`Movie`] with its closed set of [`LicensingModel`]s and [`PricingPolicy`]
//! - [`CustomerStatus`] state machine and [`PromotionPolicy`]
//! - [`Customer`] aggregate with purchase, promotion and rename operations
//!
//! Everything here is synchronous and free of I/O. Loading and persisting
//! customers is left to the caller.

pub mod aggregate;
pub mod customer;
pub mod error;
pub mod expiration;
pub mod money;
pub mod movie;

pub use aggregate::{Aggregate, DomainEvent};
pub use customer::{
    Customer, CustomerError, CustomerEvent, CustomerStatus, EmailAddress, Ineligibility,
    PersonName, PromotionPolicy, PurchaseRecord,
};
pub use error::{AmountViolation, DomainError, ErrorKind, ValidationError};
pub use expiration::ExpirationDate;
pub use money::Money;
pub use movie::{LicensingModel, Movie, MovieKind, PricingPolicy};
