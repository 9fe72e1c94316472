use crate::auth::validate_token;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use blaek_common::models::auth::Claims;
use std::sync::Arc;
use uuid::Uuid;

/// Extractor that validates a bearer token and provides the caller's
/// identity. Adding it to a handler makes the route reject with 401 before
/// any repository call.
#[derive(Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub claims: Claims,
}

/// Accepts `Bearer <token>` with a case-insensitive scheme, so the
/// lowercase `bearer` form used by some clients works too.
fn strip_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match auth_header {
            Some(val) => match strip_bearer(val) {
                Some(t) => t,
                None => {
                    return Err(ApiError::Unauthorized(
                        "invalid authorization header format".to_string(),
                    ))
                }
            },
            None => {
                return Err(ApiError::Unauthorized(
                    "missing authorization header".to_string(),
                ))
            }
        };

        let claims = validate_token(token, &state.config.auth.jwt_secret)
            .map_err(|_| ApiError::Unauthorized("invalid or expired token".to_string()))?;

        let user_id = claims
            .sub
            .parse()
            .map_err(|_| ApiError::Unauthorized("invalid or expired token".to_string()))?;

        Ok(AuthUser { user_id, claims })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bearer_standard() {
        assert_eq!(strip_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn test_strip_bearer_lowercase_scheme() {
        assert_eq!(strip_bearer("bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn test_strip_bearer_wrong_scheme() {
        assert_eq!(strip_bearer("Basic dXNlcjpwdw=="), None);
    }

    #[test]
    fn test_strip_bearer_no_token() {
        assert_eq!(strip_bearer("Bearer "), None);
        assert_eq!(strip_bearer("Bearer"), None);
    }
}
