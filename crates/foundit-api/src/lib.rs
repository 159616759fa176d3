pub mod auth;
pub mod claims;
pub mod dashboard;
pub mod error;
pub mod items;
pub mod middleware;
pub mod profiles;
pub mod state;
pub mod storage;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::middleware::require_auth;
use crate::state::AppState;

/// Build the full FoundIt router. Transport layers (CORS, tracing) are added
/// by the binary.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/items", get(items::list_items))
        .route("/items/{item_id}", get(items::get_item))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/items", post(items::create_item))
        .route("/items/{item_id}", put(items::update_item))
        .route("/items/{item_id}/claims", post(claims::submit_claim))
        .route("/uploads/item-images", post(items::upload_item_image))
        .route("/me", get(profiles::get_me))
        .route("/me/username", put(profiles::update_username))
        .route("/me/avatar", post(profiles::upload_avatar))
        .route("/me/claims", get(claims::my_claims))
        .route("/dashboard/items", get(dashboard::founder_items))
        .route("/dashboard/items/{item_id}/claims", get(dashboard::item_applicants))
        .route("/dashboard/items/{item_id}/winner", post(dashboard::select_winner))
        .layer(from_fn_with_state(state.clone(), require_auth));

    let objects = ServeDir::new(state.storage.root());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/storage", objects)
        // Bodies past the image limit still reach the handler so it can
        // report the 5MB rule itself.
        .layer(DefaultBodyLimit::max(2 * foundit_verify::MAX_IMAGE_BYTES))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
