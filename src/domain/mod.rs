//! Domain layer - Pure business abstractions
//!
//! Trait definitions, input records and domain error types.
//! No Axum here; SeaORM only appears through the entity models.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
