//! # Authgate Config
//!
//! Configuration types for the Authgate API, loaded once at startup from
//! environment variables and passed explicitly to whatever needs them.
//!
//! - [`jwt`]: token signing secret, expiry window and issuer
//! - [`password`]: bcrypt work factor
//! - [`server`]: bind address, database and migration settings
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! Every loader has a `from_env` entry point and a `from_lookup` variant that
//! takes a key lookup function, which keeps parsing testable without touching
//! the process environment.
//!
//! # Example
//!
//! ```ignore
//! use authgate_config::{CorsConfig, JwtConfig, PasswordConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let password_config = PasswordConfig::from_env()?;
//! let server_config = ServerConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod password;
pub mod server;

mod env;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;
