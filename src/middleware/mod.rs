//! Request extractors for cross-cutting concerns.
//!
//! - [`auth`]: bearer token authentication via the [`auth::AuthUser`] extractor
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` strips the prefix and verifies the token
//! 3. The handler receives the authenticated user id as a typed parameter
//!
//! Any failure short-circuits with `401 {"error": ...}` before the handler
//! runs.

pub mod auth;
