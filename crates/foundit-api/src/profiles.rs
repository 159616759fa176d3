use axum::{
    Extension, Json,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
    response::IntoResponse,
};
use tracing::warn;

use foundit_types::api::{UpdateUsernameRequest, UploadResponse};

use crate::error::ApiError;
use crate::items::store_upload;
use crate::middleware::AuthUser;
use crate::state::{AppState, with_db};
use crate::storage::Bucket;

const MAX_USERNAME_LEN: usize = 32;

/// GET /me
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = with_db(&state, move |db| db.get_profile(user.id))
        .await?
        .ok_or(ApiError::NotFound("Profile"))?;
    Ok(Json(profile))
}

/// PUT /me/username
pub async fn update_username(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<UpdateUsernameRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let username = req.username.trim().to_string();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err(ApiError::Validation(
            "Username must be between 1 and 32 characters.".into(),
        ));
    }

    let profile = with_db(&state, move |db| {
        db.update_username(user.id, &username)?;
        db.get_profile(user.id)
    })
    .await?
    .ok_or(ApiError::NotFound("Profile"))?;

    Ok(Json(profile))
}

/// POST /me/avatar — raw image body. The previous avatar, if it was ours, is
/// removed after the profile points at the new one.
pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let obj = store_upload(&state, Bucket::Avatars, user.id, &headers, &body).await?;

    let url = obj.url.clone();
    let previous = match with_db(&state, move |db| {
        let previous = db.get_profile(user.id)?.and_then(|p| p.avatar_url);
        db.update_avatar(user.id, &url)?;
        Ok(previous)
    })
    .await
    {
        Ok(previous) => previous,
        Err(e) => {
            if let Err(cleanup) = state.storage.delete(Bucket::Avatars, &obj.path).await {
                warn!("Failed to remove orphaned avatar {}: {}", obj.path, cleanup);
            }
            return Err(e);
        }
    };

    if let Some(path) = previous.and_then(|old| state.storage.path_from_public_url(Bucket::Avatars, &old)) {
        if let Err(e) = state.storage.delete(Bucket::Avatars, &path).await {
            warn!("Failed to remove old avatar {}: {}", path, e);
        }
    }

    Ok(Json(UploadResponse {
        path: obj.path,
        url: obj.url,
    }))
}
