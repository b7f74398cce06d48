//! Password hashing and verification using bcrypt.
//!
//! Hashes are salted per call, so hashing the same password twice yields two
//! different strings that both verify. The work factor is supplied by the
//! caller from `PasswordConfig`.
//!
//! bcrypt only reads the first 72 bytes of its input. Rather than letting a
//! longer password be silently truncated, [`hash_password`] rejects it and
//! [`verify_password`] reports it as a mismatch.

use anyhow::anyhow;

use crate::errors::AppError;

/// Longest password, in bytes, that bcrypt hashes without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes `password` with the given bcrypt `cost`.
///
/// # Errors
///
/// - `400 Bad Request` if the password is empty or longer than
///   [`MAX_PASSWORD_BYTES`]
/// - `500 Internal Server Error` if bcrypt rejects the cost or fails
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    if password.is_empty() {
        return Err(AppError::bad_request(anyhow!("Password must not be empty")));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::bad_request(anyhow!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    bcrypt::hash(password, cost)
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt `hash`.
///
/// Returns `Ok(false)` on mismatch. Empty and over-long passwords never match.
///
/// # Errors
///
/// `500 Internal Server Error` if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    if password.is_empty() || password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    bcrypt::verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}
