//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use daybook_core::auth_gate::SessionState;
use daybook_core::error::CoreError;
use daybook_core::types::DbId;

use crate::auth::cookie::session_from_headers;
use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the request.
///
/// The access token is read from `Authorization: Bearer <token>`, falling
/// back to the `daybook_session` cookie.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

/// Pull the raw access token from the request headers.
///
/// A malformed `Authorization` header is an error rather than a fallback to
/// the cookie.
fn token_from_headers(headers: &HeaderMap) -> Result<Option<&str>, CoreError> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| CoreError::Unauthorized("Invalid Authorization header".into()))?;
        let token = value.strip_prefix("Bearer ").ok_or_else(|| {
            CoreError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })?;
        return Ok(Some(token));
    }
    Ok(session_from_headers(headers))
}

/// Resolve the session state of a request without failing.
pub fn resolve_session(headers: &HeaderMap, jwt: &JwtConfig) -> SessionState {
    match token_from_headers(headers) {
        Ok(Some(token)) => match validate_token(token, jwt) {
            Ok(claims) => SessionState::SignedIn {
                user_id: claims.sub,
            },
            Err(_) => SessionState::SignedOut,
        },
        _ => SessionState::SignedOut,
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing access token".into()))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
