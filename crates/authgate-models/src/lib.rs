//! # Authgate Models
//!
//! Data structures shared between the HTTP layer, the services and the
//! database layer.
//!
//! - [`users`]: the stored user record and its insert payload
//! - [`auth`]: register/login/protected request and response DTOs

pub mod auth;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{
    ErrorResponse, HealthResponse, LoginRequest, LoginResponse, ProtectedResponse,
    RegisterRequest, RegisterResponse,
};
pub use users::{NewUser, User};
