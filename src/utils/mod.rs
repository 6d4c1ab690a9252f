//! Utility functions shared across the application.
//!
//! - [`alias_generator`] - Alias generation and validation

pub mod alias_generator;
