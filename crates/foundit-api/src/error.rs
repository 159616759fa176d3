use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use foundit_db::StoreError;
use foundit_types::api::ErrorBody;
use foundit_verify::{ImageError, QuestionError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Not logged in.")]
    Unauthorized,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0} not found.")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Image must be under 5MB.")]
    PayloadTooLarge,

    #[error("Please choose an image file.")]
    UnsupportedMediaType,

    /// Winner selection was rolled back because flags and the item disagreed.
    #[error("Winner selection failed and was rolled back; please retry.")]
    InconsistentWinner,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InconsistentWinner | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::NotFound(what),
            StoreError::NotOwner => ApiError::Forbidden("Only the item's founder can do that."),
            StoreError::AlreadyClaimed => ApiError::Conflict("Item is already claimed.".into()),
            StoreError::ClaimNotFound => ApiError::NotFound("Claim"),
            StoreError::DuplicateClaim => {
                ApiError::Conflict("You have already applied for this item.".into())
            }
            StoreError::DuplicateEmail => {
                ApiError::Conflict("An account with this email already exists.".into())
            }
            StoreError::InconsistentWinner(item_id) => {
                error!("Inconsistent winner selection on item {}", item_id);
                ApiError::InconsistentWinner
            }
            other => {
                error!("Store error: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<QuestionError> for ApiError {
    fn from(err: QuestionError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::NotAnImage => ApiError::UnsupportedMediaType,
            ImageError::TooLarge => ApiError::PayloadTooLarge,
            ImageError::Empty => ApiError::Validation(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::Validation(err.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::Validation(err.body_text())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!("Internal error: {:#}", err);
        ApiError::Internal(err.to_string())
    }
}
