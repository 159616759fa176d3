use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use foundit_types::api::{ClaimResponse, MyClaim, SubmitClaimRequest};
use foundit_types::models::{ItemStatus, Role};
use foundit_verify::validate_answers;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::{AppState, with_db};

/// POST /items/{item_id}/claims — a seeker submits answers for an item.
///
/// Checked before any write, in order: caller is a seeker, the item exists
/// and is still `found`, and the answer sheet covers every question. The
/// store re-checks the status inside its insert transaction, and a repeat
/// submission comes back as a conflict.
pub async fn submit_claim(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<SubmitClaimRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    user.require_role(Role::Seeker, "Only seekers can apply for items.")?;
    let Json(req) = payload?;

    let item = with_db(&state, move |db| db.get_item(item_id))
        .await?
        .ok_or(ApiError::NotFound("Item"))?;

    if item.status == ItemStatus::Claimed {
        return Err(ApiError::Conflict("This item has already been claimed.".into()));
    }

    let question_count = item.questions.as_ref().map_or(0, Vec::len);
    validate_answers(question_count, &req.answers)?;

    let claim_id = Uuid::new_v4();
    let answers = req.answers;
    let claim = with_db(&state, move |db| {
        db.insert_claim(claim_id, item_id, user.id, &answers)
    })
    .await?;

    info!("Seeker {} applied for item {}", user.id, item_id);

    Ok((
        StatusCode::CREATED,
        Json(ClaimResponse {
            id: claim.id,
            item_id: claim.item_id,
            created_at: claim.created_at,
        }),
    ))
}

/// GET /me/claims — the caller's claims with item details, newest first.
pub async fn my_claims(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = with_db(&state, move |db| db.list_claims_for_seeker(user.id)).await?;

    let claims: Vec<MyClaim> = rows
        .into_iter()
        .map(|row| MyClaim {
            id: row.claim.id,
            is_winner: row.claim.is_winner,
            created_at: row.claim.created_at,
            item: row.item,
        })
        .collect();

    Ok(Json(claims))
}
