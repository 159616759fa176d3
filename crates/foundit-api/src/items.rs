use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use tracing::{info, warn};
use uuid::Uuid;

use foundit_db::models::ItemFields;
use foundit_types::api::{ItemDetail, ItemRequest, ItemSummary, UploadResponse};
use foundit_types::models::{Item, ItemStatus, PublicQuestion, Role};
use foundit_verify::{validate_image, validate_questions};

use crate::error::ApiError;
use crate::middleware::{AuthUser, optional_user};
use crate::state::{AppState, with_db};
use crate::storage::{Bucket, StoredObject, object_owner};

const FOUNDERS_ONLY: &str = "Only founders can post items.";

pub(crate) fn summary(item: &Item) -> ItemSummary {
    ItemSummary {
        id: item.id,
        title: item.title.clone(),
        category: item.category.clone(),
        image_url: item.image_url.clone(),
        status: item.status,
        created_at: item.created_at,
    }
}

/// GET /items — unclaimed items, newest first.
pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let items = with_db(&state, |db| db.list_items_by_status(ItemStatus::Found)).await?;
    Ok(Json(items.iter().map(summary).collect::<Vec<_>>()))
}

/// GET /items/{item_id} — public item detail. The answer key is never
/// included; a signed-in seeker also learns whether they applied and won.
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = optional_user(&headers, &state.jwt_secret)?;

    let (item, own_claim) = with_db(&state, move |db| {
        let item = db.get_item(item_id)?;
        let own_claim = match viewer {
            Some(user) if user.role == Role::Seeker => db.get_claim_for_seeker(item_id, user.id)?,
            _ => None,
        };
        Ok((item, own_claim))
    })
    .await?;
    let item = item.ok_or(ApiError::NotFound("Item"))?;

    let is_seeker = viewer.is_some_and(|u| u.role == Role::Seeker);
    let questions = item
        .questions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(PublicQuestion::from)
        .collect();

    Ok(Json(ItemDetail {
        id: item.id,
        title: item.title,
        category: item.category,
        description: item.description,
        image_url: item.image_url,
        founder_id: item.founder_id,
        status: item.status,
        questions,
        created_at: item.created_at,
        has_applied: is_seeker.then(|| own_claim.is_some()),
        is_winner: is_seeker.then(|| own_claim.as_ref().is_some_and(|c| c.is_winner)),
    }))
}

/// POST /items — a founder posts a found item.
pub async fn create_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    user.require_role(Role::Founder, FOUNDERS_ONLY)?;
    let Json(req) = payload?;
    let fields = item_fields(&state, user.id, req)?;

    let item_id = Uuid::new_v4();
    let item = with_db(&state, move |db| db.insert_item(item_id, user.id, &fields)).await?;

    info!("Item {} posted by {}", item.id, user.id);
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /items/{item_id} — the owning founder edits an item. A replaced image
/// is removed from the object store when it sits in the founder's namespace.
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    user.require_role(Role::Founder, FOUNDERS_ONLY)?;
    let Json(req) = payload?;
    let fields = item_fields(&state, user.id, req)?;

    let (item, previous) =
        with_db(&state, move |db| db.update_item(item_id, user.id, &fields)).await?;

    let replaced = previous
        .filter(|old| item.image_url.as_ref() != Some(old))
        .and_then(|old| state.storage.path_from_public_url(Bucket::ItemImages, &old));
    if let Some(path) = replaced {
        if object_owner(&path) == Some(user.id) {
            if let Err(e) = state.storage.delete(Bucket::ItemImages, &path).await {
                warn!("Failed to remove replaced image {}: {}", path, e);
            }
        } else {
            warn!("Not removing image {} outside the namespace of {}", path, user.id);
        }
    }

    Ok(Json(item))
}

/// POST /uploads/item-images — raw image body, `Content-Type: image/*`.
pub async fn upload_item_image(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    user.require_role(Role::Founder, FOUNDERS_ONLY)?;
    let obj = store_upload(&state, Bucket::ItemImages, user.id, &headers, &body).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            path: obj.path,
            url: obj.url,
        }),
    ))
}

/// Validate an image upload and write it to `bucket` under the owner's id.
/// Nothing is written when validation fails.
pub(crate) async fn store_upload(
    state: &AppState,
    bucket: Bucket,
    owner: Uuid,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<StoredObject, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let ext = validate_image(content_type, body.len())?;

    Ok(state.storage.put(bucket, owner, ext, body).await?)
}

/// Validate an item request. An image hosted by this server must come from
/// the caller's own upload namespace.
fn item_fields(state: &AppState, founder_id: Uuid, req: ItemRequest) -> Result<ItemFields, ApiError> {
    let title = req.title.trim().to_string();
    let category = req.category.trim().to_string();
    if title.is_empty() || category.is_empty() {
        return Err(ApiError::Validation("Title and category are required.".into()));
    }

    let image_url = req
        .image_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::Validation("Please select an image.".into()))?;
    if let Some(path) = state.storage.path_from_public_url(Bucket::ItemImages, &image_url) {
        if object_owner(&path) != Some(founder_id) {
            return Err(ApiError::Validation("Please upload your own image.".into()));
        }
    }

    validate_questions(&req.questions)?;

    let description = req
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(ItemFields {
        title,
        category: Some(category),
        description,
        image_url: Some(image_url),
        questions: req.questions,
    })
}
