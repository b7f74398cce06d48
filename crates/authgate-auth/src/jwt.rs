//! JWT issuance and verification.
//!
//! [`JwtKeys`] is built once at startup from [`JwtConfig`] and shared through
//! application state. It owns the HMAC keys and a [`Validation`] pinned to
//! HS256, so a token whose header names any other algorithm is rejected
//! before its signature is even considered.
//!
//! Expiry is checked here rather than by `jsonwebtoken`, using integer epoch
//! seconds with no leeway, which lets callers verify against an explicit
//! clock with [`JwtKeys::verify_at`].
//!
//! # Example
//!
//! ```ignore
//! let keys = JwtKeys::new(&jwt_config)?;
//!
//! let token = keys.issue(user_id)?;
//! let claims = keys.verify(&token)?;
//! assert_eq!(claims.user_id(), Some(user_id));
//! ```

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fmt;

use authgate_config::JwtConfig;
use authgate_core::AppError;

use crate::bearer::TokenRejection;
use crate::claims::Claims;

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    access_token_expiry: i64,
}

impl JwtKeys {
    /// Builds the signing and verification keys.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the secret is empty.
    pub fn new(config: &JwtConfig) -> Result<Self, AppError> {
        if config.secret.is_empty() {
            return Err(AppError::internal(anyhow!("JWT secret must not be empty")));
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            access_token_expiry: config.access_token_expiry,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Token lifetime in seconds.
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Signs a fresh access token for `user_id`.
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    /// Signs an access token as if the current time were `now`.
    pub fn issue_at(&self, user_id: i64, now: i64) -> Result<String, AppError> {
        if now.checked_add(self.access_token_expiry).is_none() {
            return Err(AppError::internal(anyhow!(
                "Token expiry overflows at iat={} with window {}s",
                now,
                self.access_token_expiry
            )));
        }

        let claims = Claims::new(user_id, now, self.access_token_expiry, &self.issuer);

        encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
    }

    /// Verifies `token` against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenRejection> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies signature, algorithm, issuer and subject, then checks expiry
    /// against `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenRejection> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenRejection::InvalidToken)?;

        if claims.user_id().is_none() {
            return Err(TokenRejection::InvalidToken);
        }

        if claims.is_expired_at(now) {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("algorithm", &ALGORITHM)
            .field("issuer", &self.issuer)
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 900,
            issuer: "authgate".to_string(),
        }
    }

    fn keys() -> JwtKeys {
        JwtKeys::new(&get_test_jwt_config()).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = keys();
        let token = keys.issue(1).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.user_id(), Some(1));
        assert_eq!(claims.iss, "authgate");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_token_accepted_through_expiry_then_rejected() {
        let keys = keys();
        let token = keys.issue_at(5, NOW).unwrap();

        assert!(keys.verify_at(&token, NOW).is_ok());
        assert!(keys.verify_at(&token, NOW + 900).is_ok());
        assert_eq!(
            keys.verify_at(&token, NOW + 900 + 1),
            Err(TokenRejection::Expired)
        );
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = keys().issue(1).unwrap();

        let other = JwtKeys::new(&JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..get_test_jwt_config()
        })
        .unwrap();

        assert_eq!(other.verify(&token), Err(TokenRejection::InvalidToken));
    }

    #[test]
    fn test_verify_wrong_issuer() {
        let token = keys().issue(1).unwrap();

        let other = JwtKeys::new(&JwtConfig {
            issuer: "someone-else".to_string(),
            ..get_test_jwt_config()
        })
        .unwrap();

        assert_eq!(other.verify(&token), Err(TokenRejection::InvalidToken));
    }

    #[test]
    fn test_verify_garbage() {
        let keys = keys();

        assert_eq!(keys.verify("garbage"), Err(TokenRejection::InvalidToken));
        assert_eq!(
            keys.verify("invalid.token.here"),
            Err(TokenRejection::InvalidToken)
        );
    }

    #[test]
    fn test_verify_tampered_signature() {
        let keys = keys();
        let token = keys.issue(1).unwrap();
        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let token = format!("{}.{}{}", unsigned, flipped, &signature[1..]);

        assert_eq!(keys.verify(&token), Err(TokenRejection::InvalidToken));
    }

    #[test]
    fn test_rejects_other_algorithms_with_same_secret() {
        let config = get_test_jwt_config();
        let claims = Claims::new(1, Utc::now().timestamp(), 900, &config.issuer);
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(keys().verify(&token), Err(TokenRejection::InvalidToken));
    }

    #[test]
    fn test_rejects_non_numeric_subject() {
        let config = get_test_jwt_config();
        let claims = Claims {
            sub: "alice".to_string(),
            ..Claims::new(1, Utc::now().timestamp(), 900, &config.issuer)
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(keys().verify(&token), Err(TokenRejection::InvalidToken));
    }

    #[test]
    fn test_overflowing_expiry_is_internal_error() {
        let keys = JwtKeys::new(&JwtConfig {
            access_token_expiry: i64::MAX,
            ..get_test_jwt_config()
        })
        .unwrap();

        let err = keys.issue(1).unwrap_err();
        assert!(err.status.is_server_error());
    }

    #[test]
    fn test_empty_secret_is_internal_error() {
        let err = JwtKeys::new(&JwtConfig {
            secret: String::new(),
            ..get_test_jwt_config()
        })
        .unwrap_err();

        assert!(err.status.is_server_error());
    }

    #[test]
    fn test_debug_omits_keys() {
        let rendered = format!("{:?}", keys());
        assert!(!rendered.contains("test-secret-key"));
        assert!(rendered.contains("HS256"));
    }
}
