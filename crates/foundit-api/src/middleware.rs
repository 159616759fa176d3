use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use foundit_types::api::TokenClaims;
use foundit_types::models::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller's identity, decoded once from the bearer token and handed to
/// every protected handler as an explicit extension.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn require_role(&self, role: Role, reason: &'static str) -> Result<(), ApiError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ApiError::Forbidden(reason))
        }
    }
}

/// Decode the bearer token if one is present. A malformed or expired token
/// is an error; a missing one is `None`.
pub fn optional_user(headers: &HeaderMap, jwt_secret: &str) -> Result<Option<AuthUser>, ApiError> {
    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized)?;

    Ok(Some(AuthUser {
        id: token_data.claims.sub,
        role: token_data.claims.role,
    }))
}

/// Extract and validate JWT from Authorization header.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = optional_user(req.headers(), &state.jwt_secret)?.ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
