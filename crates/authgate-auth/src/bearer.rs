//! `Authorization: Bearer <token>` parsing and the reasons a request can be
//! turned away at the gate.

use thiserror::Error;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Why a request failed authentication. Every variant maps to `401`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("Authorization header required")]
    MissingHeader,
    #[error("Invalid token format")]
    InvalidFormat,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    Expired,
}

impl TokenRejection {
    /// Short label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenRejection::MissingHeader => "missing_header",
            TokenRejection::InvalidFormat => "invalid_format",
            TokenRejection::InvalidToken => "invalid_token",
            TokenRejection::Expired => "expired",
        }
    }
}

/// Pulls the token out of a raw `Authorization` header value.
///
/// A missing or blank header is [`TokenRejection::MissingHeader`]. The
/// `"Bearer "` prefix is stripped when present; a header without it is taken
/// as the raw token and left for signature verification to reject. Nothing
/// left after stripping is [`TokenRejection::InvalidFormat`].
pub fn parse_bearer(header: Option<&str>) -> Result<&str, TokenRejection> {
    let header = header
        .filter(|value| !value.trim().is_empty())
        .ok_or(TokenRejection::MissingHeader)?;

    let token = header.strip_prefix(BEARER_PREFIX).unwrap_or(header).trim();

    if token.is_empty() {
        return Err(TokenRejection::InvalidFormat);
    }

    Ok(token)
}
