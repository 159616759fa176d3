use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use foundit_types::api::{Applicant, ApplicantQuery, SelectWinnerRequest, SelectWinnerResponse};
use foundit_types::models::Role;
use foundit_verify::scoring::{MAX_THRESHOLD, meets_threshold, score};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::{AppState, with_db};

const FOUNDERS_ONLY: &str = "Only founders can view this dashboard.";

/// GET /dashboard/items — the founder's own items, answer keys included.
pub async fn founder_items(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    user.require_role(Role::Founder, FOUNDERS_ONLY)?;
    let items = with_db(&state, move |db| db.list_items_by_founder(user.id)).await?;
    Ok(Json(items))
}

/// GET /dashboard/items/{item_id}/claims?min_correct=N
///
/// Every applicant is scored against the item's current questions on each
/// request and kept when it has at least `min_correct` right answers.
pub async fn item_applicants(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<ApplicantQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    user.require_role(Role::Founder, FOUNDERS_ONLY)?;
    let Query(query) = query?;
    if query.min_correct > MAX_THRESHOLD {
        return Err(ApiError::Validation(format!(
            "min_correct must be between 0 and {}.",
            MAX_THRESHOLD
        )));
    }

    let (item, rows) = with_db(&state, move |db| {
        let item = db.get_item(item_id)?;
        let rows = db.list_claims_for_item(item_id)?;
        Ok((item, rows))
    })
    .await?;

    let item = item.ok_or(ApiError::NotFound("Item"))?;
    if item.founder_id != user.id {
        return Err(ApiError::Forbidden("Only the item's founder can do that."));
    }

    let questions = item.questions.as_deref();
    let applicants: Vec<Applicant> = rows
        .into_iter()
        .map(|row| {
            let score = score(questions, &row.claim.answers);
            Applicant {
                id: row.claim.id,
                seeker_id: row.claim.seeker_id,
                answers: row.claim.answers,
                is_winner: row.claim.is_winner,
                created_at: row.claim.created_at,
                score,
                seeker_profile: row.seeker_profile,
            }
        })
        .filter(|a| meets_threshold(&a.score, query.min_correct))
        .collect();

    Ok(Json(applicants))
}

/// POST /dashboard/items/{item_id}/winner — pick the winning claim and mark
/// the item claimed, atomically.
pub async fn select_winner(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<SelectWinnerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    user.require_role(Role::Founder, FOUNDERS_ONLY)?;
    let Json(req) = payload?;

    let claim_id = req.claim_id;
    let item = with_db(&state, move |db| db.select_winner(user.id, item_id, claim_id)).await?;

    info!("Founder {} selected claim {} for item {}", user.id, claim_id, item_id);

    Ok(Json(SelectWinnerResponse {
        item_id: item.id,
        winning_claim_id: claim_id,
        status: item.status,
    }))
}
