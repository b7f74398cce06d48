//! JWT claim set carried by every access token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// All timestamps are integer Unix epoch seconds. `exp` is always
/// `iat` plus the configured expiry window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim), rendered as a decimal string
    pub sub: String,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    /// Issuer claim
    pub iss: String,
}

impl Claims {
    pub fn new(user_id: i64, issued_at: i64, expiry_seconds: i64, issuer: &str) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: issued_at,
            exp: issued_at + expiry_seconds,
            iss: issuer.to_string(),
        }
    }

    /// The numeric user id in `sub`, if it is one.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    /// A token stays valid through the second named by `exp`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }
}
