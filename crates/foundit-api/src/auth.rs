use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;
use uuid::Uuid;

use foundit_db::StoreError;
use foundit_types::api::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, TokenClaims};
use foundit_types::models::Role;

use crate::error::ApiError;
use crate::state::{AppState, with_db};

const MIN_PASSWORD_LEN: usize = 6;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let email = req.email.trim().to_lowercase();
    let display_name = req.display_name.trim().to_string();

    // Validate input
    if display_name.is_empty() {
        return Err(ApiError::Validation("Please enter your name.".into()));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("Please enter your email.".into()));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters.".into(),
        ));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))?
        .to_string();

    let user_id = Uuid::new_v4();
    let role = req.role;
    {
        let email = email.clone();
        with_db(&state, move |db| {
            db.create_account(user_id, &email, &password_hash, &display_name, role)
        })
        .await?;
    }

    info!("Registered {} as {}", email, role);

    let token = create_token(&state.jwt_secret, user_id, role)?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let email = req.email.trim().to_lowercase();

    let user = with_db(&state, move |db| db.get_credentials_by_email(&email))
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| ApiError::Internal(format!("corrupt password hash: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::InvalidCredentials)?;

    let user_id = user.id;
    let profile = with_db(&state, move |db| db.get_profile(user_id))
        .await?
        .ok_or(StoreError::NotFound("Profile"))?;

    let token = create_token(&state.jwt_secret, user_id, profile.role)?;

    Ok(Json(LoginResponse {
        user_id,
        role: profile.role,
        token,
    }))
}

pub fn create_token(secret: &str, user_id: Uuid, role: Role) -> Result<String, ApiError> {
    let claims = TokenClaims {
        sub: user_id,
        role,
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token encoding failed: {}", e)))
}
