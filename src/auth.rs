use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, AppState};

/// Header carrying the shared admin secret.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Extractor gating privileged handlers.
///
/// Put it before any body extractor so a rejected request is answered with
/// 401 without its body being read or validated.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let supplied = parts.headers.get(ADMIN_TOKEN_HEADER).map(|v| v.as_bytes());
        if token_matches(state.config.admin_token.as_deref(), supplied) {
            Ok(RequireAdmin)
        } else {
            tracing::warn!(path = %parts.uri.path(), "rejected privileged request");
            Err(AppError::Unauthorized)
        }
    }
}

/// Byte-for-byte comparison; an unset secret matches nothing.
pub fn token_matches(expected: Option<&str>, supplied: Option<&[u8]>) -> bool {
    match (expected, supplied) {
        (Some(expected), Some(supplied)) => !expected.is_empty() && expected.as_bytes() == supplied,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::token_matches;

    #[test]
    fn exact_match_only() {
        assert!(token_matches(Some("s3cret"), Some(b"s3cret")));
        assert!(!token_matches(Some("s3cret"), Some(b"S3CRET")));
        assert!(!token_matches(Some("s3cret"), Some(b"s3cret ")));
        assert!(!token_matches(Some("s3cret"), None));
    }

    #[test]
    fn unset_secret_rejects_everything() {
        assert!(!token_matches(None, Some(b"")));
        assert!(!token_matches(None, Some(b"anything")));
        assert!(!token_matches(Some(""), Some(b"")));
    }
}
