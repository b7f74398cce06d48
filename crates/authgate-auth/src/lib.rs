//! # Authgate Auth
//!
//! Stateless bearer-token authentication for the Authgate API.
//!
//! - [`claims`]: the signed claim set (`sub`, `iat`, `exp`, `iss`)
//! - [`jwt`]: [`JwtKeys`], the token issuer and verifier built from `JwtConfig`
//! - [`bearer`]: `Authorization` header parsing and [`TokenRejection`]
//!
//! Tokens are HS256-signed JWTs. Nothing is stored server-side: a token is
//! valid exactly when its signature checks out under the configured secret,
//! its issuer matches and the current time has not passed `exp`.
//!
//! # Example
//!
//! ```ignore
//! use authgate_auth::{JwtKeys, parse_bearer};
//! use authgate_config::JwtConfig;
//!
//! let keys = JwtKeys::new(&JwtConfig::from_env()?)?;
//!
//! let token = keys.issue(42)?;
//! let header = format!("Bearer {}", token);
//!
//! let claims = keys.verify(parse_bearer(Some(&header))?)?;
//! assert_eq!(claims.user_id(), Some(42));
//! ```

pub mod bearer;
pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use bearer::{BEARER_PREFIX, TokenRejection, parse_bearer};
pub use claims::Claims;
pub use jwt::JwtKeys;
