use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ItemStatus, PublicQuestion, Question, Role, Score};

// -- JWT Claims --

/// Bearer token payload. Issued at login and decoded once per request by the
/// auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub role: Role,
    pub token: String,
}

// -- Profiles --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub path: String,
    pub url: String,
}

// -- Items --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRequest {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
}

/// Item detail as seen by the public and by seekers.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub founder_id: Uuid,
    pub status: ItemStatus,
    pub questions: Vec<PublicQuestion>,
    pub created_at: DateTime<Utc>,
    /// Present only when the caller is a seeker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_applied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_winner: Option<bool>,
}

// -- Claims --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitClaimRequest {
    pub answers: Vec<Option<u8>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MyClaim {
    pub id: Uuid,
    pub is_winner: bool,
    pub created_at: DateTime<Utc>,
    pub item: ItemSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekerProfile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Applicant {
    pub id: Uuid,
    pub seeker_id: Uuid,
    pub answers: Vec<Option<u8>>,
    pub is_winner: bool,
    pub created_at: DateTime<Utc>,
    pub score: Score,
    pub seeker_profile: Option<SeekerProfile>,
}

// -- Dashboard --

#[derive(Debug, Deserialize)]
pub struct ApplicantQuery {
    #[serde(default)]
    pub min_correct: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectWinnerRequest {
    pub claim_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectWinnerResponse {
    pub item_id: Uuid,
    pub winning_claim_id: Uuid,
    pub status: ItemStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
