//! Customer service orchestrating the domain model and repositories.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{CustomerId, MovieId, Version};
use domain::{
    Aggregate, Customer, CustomerStatus, EmailAddress, Movie, MovieKind, PersonName,
    PricingPolicy, PromotionPolicy, PurchaseRecord,
};

use crate::config::Config;
use crate::error::{RepositoryError, StorefrontError};
use crate::repository::{CustomerRepository, MovieRepository};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Service for customer operations.
///
/// Each operation loads the customer, runs one domain command and commits
/// the resulting events with the version that was loaded. A failed command
/// commits nothing.
pub struct CustomerService<C: CustomerRepository, M: MovieRepository> {
    customers: C,
    movies: M,
    pricing: PricingPolicy,
    promotion: PromotionPolicy,
    clock: Clock,
}

impl<C: CustomerRepository, M: MovieRepository> CustomerService<C, M> {
    /// Creates a service with default pricing and promotion thresholds.
    pub fn new(customers: C, movies: M) -> Self {
        Self {
            customers,
            movies,
            pricing: PricingPolicy::default(),
            promotion: PromotionPolicy::default(),
            clock: Arc::new(Utc::now),
        }
    }

    /// Creates a service using the policies from `config`.
    pub fn from_config(customers: C, movies: M, config: &Config) -> Self {
        Self::new(customers, movies)
            .with_pricing(config.pricing)
            .with_promotion(config.promotion)
    }

    /// Replaces the pricing policy used for new catalogue entries.
    pub fn with_pricing(mut self, pricing: PricingPolicy) -> Self {
        self.pricing = pricing;
        self
    }

    /// Replaces the promotion thresholds.
    pub fn with_promotion(mut self, promotion: PromotionPolicy) -> Self {
        self.promotion = promotion;
        self
    }

    /// Replaces the source of the current time.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> &C {
        &self.customers
    }

    /// Returns the movie catalogue.
    pub fn movies(&self) -> &M {
        &self.movies
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Registers a new customer.
    ///
    /// Fails with [`StorefrontError::EmailInUse`] if another customer already
    /// has exactly this email address.
    #[tracing::instrument(skip(self))]
    pub async fn register_customer(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Customer, StorefrontError> {
        async {
            let name = PersonName::create(name)?;
            let email = EmailAddress::create(email)?;

            if self.customers.get_by_email(&email).await?.is_some() {
                return Err(StorefrontError::EmailInUse(email.as_str().to_string()));
            }

            let mut customer = Customer::register(CustomerId::new(), name, email, self.now());
            self.customers
                .save(&mut customer, Version::initial())
                .await
                .map_err(|err| match err {
                    RepositoryError::DuplicateEmail(email) => StorefrontError::EmailInUse(email),
                    other => other.into(),
                })?;

            tracing::info!(customer_id = %customer.id(), "customer registered");
            Ok::<_, StorefrontError>(customer)
        }
        .await
        .inspect_err(log_rejection)
    }

    /// Loads a customer.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, StorefrontError> {
        self.load(id).await.inspect_err(log_rejection)
    }

    /// Returns every customer.
    #[tracing::instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<Customer>, StorefrontError> {
        self.customers
            .list()
            .await
            .map_err(StorefrontError::from)
            .inspect_err(log_rejection)
    }

    /// Changes a customer's name.
    #[tracing::instrument(skip(self))]
    pub async fn rename_customer(
        &self,
        id: CustomerId,
        name: &str,
    ) -> Result<Customer, StorefrontError> {
        async {
            let mut customer = self.load(id).await?;
            let loaded = customer.version();

            customer.rename(name)?;
            self.customers.save(&mut customer, loaded).await?;

            tracing::info!(customer_id = %id, version = %customer.version(), "customer renamed");
            Ok::<_, StorefrontError>(customer)
        }
        .await
        .inspect_err(log_rejection)
    }

    /// Sells a movie to a customer at the price for their current status.
    #[tracing::instrument(skip(self))]
    pub async fn purchase_movie(
        &self,
        customer_id: CustomerId,
        movie_id: MovieId,
    ) -> Result<PurchaseRecord, StorefrontError> {
        async {
            let movie = self
                .movies
                .get(movie_id)
                .await?
                .ok_or(StorefrontError::MovieNotFound(movie_id))?;
            let mut customer = self.load(customer_id).await?;
            let loaded = customer.version();

            let purchase = customer.purchase_movie(&movie, self.now())?;
            self.customers.save(&mut customer, loaded).await?;

            metrics::counter!("storefront_purchases_total").increment(1);
            tracing::info!(
                %customer_id,
                %movie_id,
                price = %purchase.price(),
                expiration = %purchase.expiration(),
                money_spent = %customer.money_spent(),
                "movie purchased"
            );
            Ok::<_, StorefrontError>(purchase)
        }
        .await
        .inspect_err(log_rejection)
    }

    /// Promotes a customer to the next status.
    #[tracing::instrument(skip(self))]
    pub async fn promote_customer(&self, id: CustomerId) -> Result<Customer, StorefrontError> {
        async {
            let mut customer = self.load(id).await?;
            let loaded = customer.version();

            customer.promote_with(&self.promotion, self.now())?;
            self.customers.save(&mut customer, loaded).await?;

            metrics::counter!("storefront_promotions_total").increment(1);
            tracing::info!(customer_id = %id, status = %customer.status(), "customer promoted");
            Ok::<_, StorefrontError>(customer)
        }
        .await
        .inspect_err(log_rejection)
    }

    /// Reports, without changing anything, whether the customer could be
    /// promoted now and to which status.
    #[tracing::instrument(skip(self))]
    pub async fn can_promote(&self, id: CustomerId) -> Result<CustomerStatus, StorefrontError> {
        async {
            let customer = self.load(id).await?;
            Ok::<_, StorefrontError>(customer.can_promote_with(&self.promotion, self.now())?)
        }
        .await
        .inspect_err(log_rejection)
    }

    /// Adds a movie to the catalogue, priced by the configured policy.
    #[tracing::instrument(skip(self))]
    pub async fn add_movie(&self, name: &str, kind: MovieKind) -> Result<Movie, StorefrontError> {
        let movie = Movie::new(MovieId::new(), name, self.pricing.licensing(kind));
        self.movies
            .add(movie.clone())
            .await
            .map_err(StorefrontError::from)
            .inspect_err(log_rejection)?;
        tracing::info!(movie_id = %movie.id(), %kind, price = %movie.base_price(), "movie added");
        Ok(movie)
    }

    /// Returns the catalogue.
    #[tracing::instrument(skip(self))]
    pub async fn list_movies(&self) -> Result<Vec<Movie>, StorefrontError> {
        self.movies
            .list()
            .await
            .map_err(StorefrontError::from)
            .inspect_err(log_rejection)
    }

    async fn load(&self, id: CustomerId) -> Result<Customer, StorefrontError> {
        self.customers
            .get(id)
            .await?
            .ok_or(StorefrontError::CustomerNotFound(id))
    }
}

fn log_rejection(err: &StorefrontError) {
    let kind = err.kind();
    metrics::counter!("storefront_rejections_total", "kind" => kind.as_str()).increment(1);
    tracing::debug!(kind = %kind, error = %err, "operation rejected");
}
