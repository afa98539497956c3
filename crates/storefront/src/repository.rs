//! Repository ports used by the customer service.

use async_trait::async_trait;
use common::{CustomerId, MovieId, Version};
use domain::{Customer, EmailAddress, Movie};

use crate::error::RepositoryError;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Storage for customer aggregates.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Loads a customer by ID.
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>>;

    /// Loads the customer holding `email`. Matching is exact.
    async fn get_by_email(&self, email: &EmailAddress) -> Result<Option<Customer>>;

    /// Returns every customer.
    async fn list(&self) -> Result<Vec<Customer>>;

    /// Commits the customer's uncommitted events.
    ///
    /// `expected_version` is the version the caller loaded, or
    /// [`Version::initial`] for a customer that has never been saved.
    /// On success the customer's uncommitted events are drained.
    async fn save(&self, customer: &mut Customer, expected_version: Version) -> Result<()>;
}

/// The movie catalogue.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Adds a movie to the catalogue.
    async fn add(&self, movie: Movie) -> Result<()>;

    /// Loads a movie by ID.
    async fn get(&self, id: MovieId) -> Result<Option<Movie>>;

    /// Returns every movie.
    async fn list(&self) -> Result<Vec<Movie>>;
}
