//! Application layer for the movie storefront.
//!
//! Wires the domain model to repositories and exposes [`CustomerService`],
//! the entry point for registering customers, selling movies and promoting
//! customers. Configuration and tracing setup live here as well; the domain
//! crate itself performs no I/O and never logs.

pub mod config;
pub mod error;
pub mod memory;
pub mod repository;
pub mod service;
pub mod telemetry;

pub use config::{Config, LogFormat};
pub use error::{RepositoryError, StorefrontError};
pub use memory::{InMemoryCustomerRepository, InMemoryMovieRepository};
pub use repository::{CustomerRepository, MovieRepository};
pub use service::CustomerService;
