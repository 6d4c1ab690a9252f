//! Alias generation and validation utilities.
//!
//! Generated aliases are drawn from an alphabet without look-alike characters
//! so they can be read aloud or retyped from print.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// Alphanumerics without `0`, `O`, `o`, `1`, `l` and `I`.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789";

/// Default length of generated aliases.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Accepted lengths for generated aliases.
pub const GENERATED_ALIAS_LENGTHS: RangeInclusive<usize> = 4..=32;

/// Longest alias a client may choose.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Path segments used by the router itself.
const RESERVED_ALIASES: &[&str] = &["url", "health"];

static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Generates a random alias of `length` characters.
///
/// Two calls are unlikely, but not guaranteed, to collide; storage uniqueness
/// remains the only guarantee.
pub fn generate_alias(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates a client-chosen alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            format!("field Alias must be 1-{MAX_ALIAS_LENGTH} characters"),
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            "field Alias may only contain letters, digits, '-' and '_'",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "field Alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
