use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use authgate_auth::{Claims, TokenRejection, parse_bearer};
use authgate_core::AppError;

use crate::metrics::track_jwt_validation;
use crate::state::AppState;

/// Extractor that verifies the bearer token and yields the authenticated
/// user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub claims: Claims,
}

fn reject(rejection: TokenRejection) -> AppError {
    debug!(reason = rejection.reason(), "Rejected bearer token");
    track_jwt_validation(Err(rejection));
    AppError::unauthorized(rejection)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A header that isn't valid visible ASCII can't carry a token.
        let auth_header = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| reject(TokenRejection::InvalidToken))?,
            ),
            None => None,
        };

        let token = parse_bearer(auth_header).map_err(reject)?;
        let claims = state.jwt_keys.verify(token).map_err(reject)?;
        let user_id = claims
            .user_id()
            .ok_or_else(|| reject(TokenRejection::InvalidToken))?;

        track_jwt_validation(Ok(()));

        Ok(AuthUser { user_id, claims })
    }
}
