//! In-memory repository implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{CustomerId, MovieId, Version};
use domain::{Aggregate, Customer, CustomerEvent, EmailAddress, Movie};
use tokio::sync::RwLock;

use crate::error::RepositoryError;
use crate::repository::{CustomerRepository, MovieRepository, Result};

#[derive(Debug, Default)]
struct CustomerState {
    customers: HashMap<CustomerId, Customer>,
    registration_order: Vec<CustomerId>,
    events: Vec<(CustomerId, CustomerEvent)>,
}

/// In-memory customer repository.
///
/// Keeps the latest state of every customer plus the log of committed
/// events, and enforces the same version and email checks a database
/// would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    state: Arc<RwLock<CustomerState>>,
}

impl InMemoryCustomerRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of committed events.
    pub async fn event_count(&self) -> usize {
        self.state.read().await.events.len()
    }

    /// Returns the committed events of one customer, oldest first.
    pub async fn events_for(&self, id: CustomerId) -> Vec<CustomerEvent> {
        self.state
            .read()
            .await
            .events
            .iter()
            .filter(|(customer_id, _)| *customer_id == id)
            .map(|(_, event)| event.clone())
            .collect()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.state.read().await.customers.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &EmailAddress) -> Result<Option<Customer>> {
        let state = self.state.read().await;
        Ok(state
            .customers
            .values()
            .find(|c| c.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Customer>> {
        let state = self.state.read().await;
        Ok(state
            .registration_order
            .iter()
            .filter_map(|id| state.customers.get(id).cloned())
            .collect())
    }

    async fn save(&self, customer: &mut Customer, expected_version: Version) -> Result<()> {
        let customer_id = customer.id();
        let mut state = self.state.write().await;

        let actual = state
            .customers
            .get(&customer_id)
            .map(|c| c.version())
            .unwrap_or(Version::initial());
        if actual != expected_version {
            return Err(RepositoryError::ConcurrencyConflict {
                customer_id,
                expected: expected_version,
                actual,
            });
        }

        // Unique constraint simulation
        if state
            .customers
            .values()
            .any(|c| c.id() != customer_id && c.email() == customer.email())
        {
            return Err(RepositoryError::DuplicateEmail(
                customer.email().as_str().to_string(),
            ));
        }

        let events = customer.take_uncommitted_events();
        if !state.customers.contains_key(&customer_id) {
            state.registration_order.push(customer_id);
        }
        state
            .events
            .extend(events.into_iter().map(|event| (customer_id, event)));
        state.customers.insert(customer_id, customer.clone());

        Ok(())
    }
}

/// In-memory movie catalogue.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMovieRepository {
    movies: Arc<RwLock<HashMap<MovieId, Movie>>>,
}

impl InMemoryMovieRepository {
    /// Creates a new empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalogue seeded with `movies`.
    pub fn with_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let movies = movies.into_iter().map(|m| (m.id(), m)).collect();
        Self {
            movies: Arc::new(RwLock::new(movies)),
        }
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn add(&self, movie: Movie) -> Result<()> {
        let mut movies = self.movies.write().await;
        if movies.contains_key(&movie.id()) {
            return Err(RepositoryError::DuplicateMovie(movie.id()));
        }
        movies.insert(movie.id(), movie);
        Ok(())
    }

    async fn get(&self, id: MovieId) -> Result<Option<Movie>> {
        Ok(self.movies.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Movie>> {
        let mut movies: Vec<_> = self.movies.read().await.values().cloned().collect();
        movies.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(movies)
    }
}
