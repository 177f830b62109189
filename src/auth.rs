use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use recipebox_user::{Account, validate_token};

use crate::{error::AppError, routes::AppState};

/// Token carried by `Authorization: Token <jwt>` or `Authorization: Bearer <jwt>`.
fn token_from(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;

    value
        .strip_prefix("Token ")
        .or_else(|| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn resolve(token: &str, state: &AppState) -> Result<Account, AppError> {
    let claims = validate_token(token, &state.config.jwt.secret).map_err(|e| {
        tracing::debug!(error = %e, "Invalid or expired token");
        AppError::Unauthorized
    })?;

    let Some(account) = state.user_query.find_account(claims.sub).await? else {
        tracing::warn!("Token subject no longer exists");
        return Err(AppError::Unauthorized);
    };

    Ok(account)
}

/// Authenticated caller, rejects the request with 401 otherwise.
pub struct AuthUser(pub Account);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let Some(token) = token_from(parts) else {
            return Err(AppError::Unauthorized);
        };

        Ok(Self(resolve(token, state).await?))
    }
}

/// Caller of a public route, `None` when anonymous. A malformed or expired
/// token is still rejected.
pub struct Viewer(pub Option<Account>);

impl Viewer {
    pub fn id(&self) -> Option<&str> {
        self.0.as_ref().map(|account| account.id.as_str())
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        match token_from(parts) {
            Some(token) => Ok(Self(Some(resolve(token, state).await?))),
            None => Ok(Self(None)),
        }
    }
}
