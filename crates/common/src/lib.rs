//! Shared types for the movie storefront workspace.

pub mod types;

pub use types::{CustomerId, MovieId, Version};
