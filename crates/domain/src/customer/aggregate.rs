//! Customer aggregate implementation.

use chrono::{DateTime, Utc};
use common::{CustomerId, MovieId, Version};
use serde::Serialize;

use crate::aggregate::Aggregate;
use crate::movie::Movie;
use crate::money::Money;

use super::{
    CustomerError, CustomerEvent, CustomerStatus, EmailAddress, PersonName, PromotionPolicy,
    PurchaseRecord,
    events::{CustomerPromotedData, CustomerRegisteredData, MoviePurchasedData},
};

/// Customer aggregate root.
///
/// Owns the customer's status, total spend and purchase history. Status and
/// spend have no setters; they change only through [`Customer::purchase_movie`]
/// and [`Customer::promote`], which validate first and then apply a single
/// event, so a failed operation leaves the customer untouched.
///
/// Invariant: `money_spent` equals the sum of `purchases[..].price`.
///
/// Serializes as a read-only snapshot. There is no way back from the
/// snapshot; a customer is rebuilt from its events with [`Customer::replay`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    /// Unique customer identifier.
    id: CustomerId,

    /// Current version for optimistic concurrency.
    version: Version,

    name: PersonName,

    /// Natural key; fixed at registration.
    email: EmailAddress,

    status: CustomerStatus,

    /// When the customer became Advanced.
    promoted_at: Option<DateTime<Utc>>,

    money_spent: Money,

    /// Append-only, in purchase order.
    purchases: Vec<PurchaseRecord>,

    /// Events recorded since the last drain.
    #[serde(skip)]
    uncommitted: Vec<CustomerEvent>,
}

impl Aggregate for Customer {
    type Id = CustomerId;
    type Event = CustomerEvent;
    type Error = CustomerError;

    fn aggregate_type() -> &'static str {
        "Customer"
    }

    fn id(&self) -> CustomerId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            CustomerEvent::CustomerRegistered(data) => self.apply_registered(data),
            CustomerEvent::CustomerRenamed(data) => self.name = data.new_name,
            CustomerEvent::MoviePurchased(data) => self.apply_movie_purchased(data),
            CustomerEvent::CustomerPromoted(data) => self.apply_promoted(data),
        }
        self.version = self.version.next();
    }
}

// Construction
impl Customer {
    /// Registers a new customer: Regular status, zero spend, no purchases.
    ///
    /// Duplicate-email detection needs a lookup and is the caller's job.
    pub fn register(
        id: CustomerId,
        name: PersonName,
        email: EmailAddress,
        registered_at: DateTime<Utc>,
    ) -> Self {
        let mut customer = Self::blank(id, name.clone(), email.clone());
        customer.record(CustomerEvent::customer_registered(
            id,
            name,
            email,
            registered_at,
        ));
        customer
    }

    /// Rebuilds a customer from its recorded events.
    ///
    /// The first event must be the registration. Every later event is
    /// checked against the state built so far: a second registration, a
    /// purchase whose total is not the previous total plus its price, or a
    /// status change that is not a valid promotion fails with
    /// [`CustomerError::InconsistentHistory`]. The rebuilt customer has no
    /// uncommitted events.
    pub fn replay(events: impl IntoIterator<Item = CustomerEvent>) -> Result<Self, CustomerError> {
        let mut events = events.into_iter();

        let Some(CustomerEvent::CustomerRegistered(data)) = events.next() else {
            return Err(CustomerError::NotRegistered);
        };

        let mut customer = Self::blank(data.customer_id, data.name.clone(), data.email.clone());
        customer.apply(CustomerEvent::CustomerRegistered(data));
        for event in events {
            customer.check_replayable(&event)?;
            customer.apply(event);
        }
        Ok(customer)
    }

    fn check_replayable(&self, event: &CustomerEvent) -> Result<(), CustomerError> {
        let inconsistent = |reason: &'static str| CustomerError::InconsistentHistory {
            version: self.version.next(),
            reason,
        };

        match event {
            CustomerEvent::CustomerRegistered(_) => Err(inconsistent("customer registered twice")),
            CustomerEvent::CustomerRenamed(_) => Ok(()),
            CustomerEvent::MoviePurchased(data) => {
                let expected = self
                    .money_spent
                    .add(data.purchase.price())
                    .map_err(|_| inconsistent("money spent exceeds the maximum"))?;
                if expected != data.money_spent {
                    return Err(inconsistent("money spent does not match the purchase history"));
                }
                Ok(())
            }
            CustomerEvent::CustomerPromoted(data) => {
                if data.from != self.status || self.status.promote().ok() != Some(data.to) {
                    return Err(inconsistent("status change is not a valid promotion"));
                }
                Ok(())
            }
        }
    }

    fn blank(id: CustomerId, name: PersonName, email: EmailAddress) -> Self {
        Self {
            id,
            version: Version::initial(),
            name,
            email,
            status: CustomerStatus::default(),
            promoted_at: None,
            money_spent: Money::ZERO,
            purchases: Vec::new(),
            uncommitted: Vec::new(),
        }
    }
}

// Query methods
impl Customer {
    /// Returns the customer name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Returns the email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the current status.
    pub fn status(&self) -> CustomerStatus {
        self.status
    }

    /// Returns when the customer was promoted, if ever.
    pub fn promoted_at(&self) -> Option<DateTime<Utc>> {
        self.promoted_at
    }

    /// Returns the total money spent.
    pub fn money_spent(&self) -> Money {
        self.money_spent
    }

    /// Returns all purchases in purchase order.
    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.purchases
    }

    /// Returns true if the customer holds an unexpired purchase of the movie.
    pub fn has_active_purchase(&self, movie_id: MovieId, now: DateTime<Utc>) -> bool {
        self.purchases
            .iter()
            .any(|p| p.movie_id() == movie_id && p.is_active(now))
    }

    /// Returns events recorded since the last [`Customer::take_uncommitted_events`].
    pub fn uncommitted_events(&self) -> &[CustomerEvent] {
        &self.uncommitted
    }

    /// Drains recorded events, typically right after they were persisted.
    pub fn take_uncommitted_events(&mut self) -> Vec<CustomerEvent> {
        std::mem::take(&mut self.uncommitted)
    }
}

// Command methods
impl Customer {
    /// Changes the customer name.
    pub fn rename(&mut self, new_name: &str) -> Result<(), CustomerError> {
        let new_name = PersonName::create(new_name)?;
        if new_name != self.name {
            self.record(CustomerEvent::customer_renamed(self.name.clone(), new_name));
        }
        Ok(())
    }

    /// Buys a movie at the price for the customer's current status.
    ///
    /// Fails with [`CustomerError::AlreadyOwned`] while an earlier purchase of
    /// the same movie is unexpired; once it has expired the movie can be
    /// bought again.
    pub fn purchase_movie(
        &mut self,
        movie: &Movie,
        now: DateTime<Utc>,
    ) -> Result<PurchaseRecord, CustomerError> {
        if self.has_active_purchase(movie.id(), now) {
            return Err(CustomerError::AlreadyOwned {
                movie_id: movie.id(),
                movie_name: movie.name().to_string(),
            });
        }

        let price = movie.price(self.status)?;
        let money_spent =
            self.money_spent
                .add(price)
                .map_err(|_| CustomerError::SpendOverflow {
                    current: self.money_spent,
                    price,
                })?;

        let purchase = PurchaseRecord::new(movie.id(), price, now, movie.expiration_from(now));
        self.record(CustomerEvent::movie_purchased(purchase.clone(), money_spent));
        Ok(purchase)
    }

    /// Checks, without changing anything, whether [`Customer::promote`] would
    /// succeed under the default policy. Returns the status it would lead to.
    pub fn can_promote(&self, now: DateTime<Utc>) -> Result<CustomerStatus, CustomerError> {
        self.can_promote_with(&PromotionPolicy::default(), now)
    }

    /// Like [`Customer::can_promote`] with explicit thresholds.
    pub fn can_promote_with(
        &self,
        policy: &PromotionPolicy,
        now: DateTime<Utc>,
    ) -> Result<CustomerStatus, CustomerError> {
        let next = self.status.promote()?;
        policy
            .check(&self.purchases, now)
            .map_err(CustomerError::NotEligible)?;
        Ok(next)
    }

    /// Promotes the customer under the default policy.
    pub fn promote(&mut self, now: DateTime<Utc>) -> Result<(), CustomerError> {
        self.promote_with(&PromotionPolicy::default(), now)
    }

    /// Promotes the customer if the purchase history meets `policy` at `now`.
    pub fn promote_with(
        &mut self,
        policy: &PromotionPolicy,
        now: DateTime<Utc>,
    ) -> Result<(), CustomerError> {
        let next = self.can_promote_with(policy, now)?;
        self.record(CustomerEvent::customer_promoted(self.status, next, now));
        Ok(())
    }
}

// Apply event helpers
impl Customer {
    fn record(&mut self, event: CustomerEvent) {
        self.apply(event.clone());
        self.uncommitted.push(event);
    }

    fn apply_registered(&mut self, data: CustomerRegisteredData) {
        self.id = data.customer_id;
        self.name = data.name;
        self.email = data.email;
        self.status = CustomerStatus::Regular;
        self.promoted_at = None;
        self.money_spent = Money::ZERO;
        self.purchases.clear();
    }

    fn apply_movie_purchased(&mut self, data: MoviePurchasedData) {
        self.purchases.push(data.purchase);
        self.money_spent = data.money_spent;

        debug_assert_eq!(
            self.money_spent.cents(),
            self.purchases.iter().map(|p| p.price().cents()).sum::<i64>(),
            "money spent diverged from purchase history"
        );
    }

    fn apply_promoted(&mut self, data: CustomerPromotedData) {
        self.status = data.to;
        self.promoted_at = Some(data.promoted_at);
    }
}
