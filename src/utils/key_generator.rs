//! Short key generation and validation utilities.
//!
//! Generated keys are short base-36 strings meant for human-shareable links,
//! not secrets: they come from a non-cryptographic thread-local RNG.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Number of characters in a generated key.
pub const KEY_LENGTH: usize = 6;

/// Maximum length of an explicitly chosen key.
pub const MAX_KEY_LENGTH: usize = 32;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a random base-36 key of [`KEY_LENGTH`] characters.
///
/// No uniqueness is implied; see
/// [`crate::application::services::LinkService`] for the collision policy.
///
/// # Examples
///
/// ```ignore
/// let key = generate_key();
/// assert_eq!(key.len(), 6);
/// assert!(key.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
/// ```
pub fn generate_key() -> String {
    let mut rng = rand::rng();

    (0..KEY_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates an explicitly chosen key.
///
/// # Rules
///
/// - Length: 1-32 characters
/// - Allowed characters: lowercase letters, digits, hyphens, underscores
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_key(key: &str) -> Result<(), AppError> {
    if key.is_empty() || key.len() > MAX_KEY_LENGTH {
        return Err(AppError::bad_request(
            "Key must be 1-32 characters",
            json!({ "provided_length": key.len() }),
        ));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Key can only contain lowercase letters, digits, hyphens and underscores",
            json!({ "key": key }),
        ));
    }

    Ok(())
}
