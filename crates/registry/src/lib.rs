//! `registry` crate — domain types, input validation, and the registry services.
//!
//! The three services are independent of each other and share nothing but
//! the database pool:
//! - [`RepositoryRegistrar`] creates source repositories.
//! - [`TargetRegistrar`] attaches replication targets to a repository.
//! - [`ListingService`] reads repositories together with their targets.

pub mod error;
pub mod listing;
pub mod models;
pub mod provider;
pub mod repositories;
pub mod targets;
pub mod validation;

pub use error::RegistryError;
pub use listing::ListingService;
pub use models::{CreateRepository, CreateTarget, Repository, Target};
pub use provider::Provider;
pub use repositories::RepositoryRegistrar;
pub use targets::TargetRegistrar;
