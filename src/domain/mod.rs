//! Domain layer containing business entities and the storage contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the HTTP layer.

pub mod entities;
pub mod repositories;
