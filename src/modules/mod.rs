//! Feature modules.
//!
//! Each module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic (where there is any)
//! - `router.rs`: Axum router configuration

pub mod auth;
pub mod health;
