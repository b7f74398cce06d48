//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret (required, never defaulted)
//! - `JWT_ACCESS_EXPIRY`: token lifetime in seconds, at most ten years
//!   (default: 3600)
//! - `JWT_ISSUER`: value of the `iss` claim (default: `authgate`)

use anyhow::{Result, bail};
use std::fmt;

use crate::env::{optional, parsed_or, process_env, required_verbatim};

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;
/// Ten years. Keeps `iat + expiry` far from `i64` overflow.
pub const MAX_ACCESS_TOKEN_EXPIRY: i64 = 10 * 365 * 24 * 60 * 60;
pub const DEFAULT_ISSUER: &str = "authgate";

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub access_token_expiry: i64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Whitespace is part of the key; only a blank secret is rejected.
        let secret = required_verbatim(&lookup, "JWT_SECRET")?;
        let access_token_expiry =
            parsed_or(&lookup, "JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY)?;

        if access_token_expiry <= 0 {
            bail!("JWT_ACCESS_EXPIRY must be a positive number of seconds");
        }

        if access_token_expiry > MAX_ACCESS_TOKEN_EXPIRY {
            bail!(
                "JWT_ACCESS_EXPIRY must be at most {} seconds",
                MAX_ACCESS_TOKEN_EXPIRY
            );
        }

        Ok(Self {
            secret,
            access_token_expiry,
            issuer: optional(&lookup, "JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
        })
    }
}

// The secret stays out of logs and panic messages.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("issuer", &self.issuer)
            .finish()
    }
}
