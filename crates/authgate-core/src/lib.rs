//! # Authgate Core
//!
//! Foundational types shared by every Authgate crate:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP response mapping
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use authgate_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("Secr3t!", 10)?;
//! assert!(verify_password("Secr3t!", &hash)?);
//!
//! let error = AppError::unauthorized(anyhow::anyhow!("Invalid credentials"));
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used items at crate root
pub use errors::AppError;
pub use password::{MAX_PASSWORD_BYTES, hash_password, verify_password};
