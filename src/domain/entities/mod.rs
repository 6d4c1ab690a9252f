//! Core domain entities.
//!
//! The service has a single entity, [`UrlMapping`], plus [`NewUrlMapping`]
//! for inserts.

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
