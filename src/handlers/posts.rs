use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    models::post::Post,
    models::session::AuthenticatedUser,
    services::posts as post_service,
    state::AppState,
};

/// The request payload for creating a post.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub description: String,
    pub picture_path: Option<String>,
}

/// The response payload wrapping a post listing.
#[derive(Serialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

/// Creates a post authored by the authenticated caller.
#[axum::debug_handler]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!("📝 Creating a post for {}", caller.user_id);

    let post = post_service::create_post(
        &state.db,
        caller.user_id,
        &payload.description,
        payload.picture_path.as_deref().unwrap_or(""),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(post)).into_response())
}

/// Returns the whole feed, newest post first.
#[axum::debug_handler]
pub async fn get_feed(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let posts = post_service::feed(&state.db).await?;
    Ok(Json(PostsResponse { posts }))
}

/// Returns one user's posts, newest first.
#[axum::debug_handler]
pub async fn get_user_posts(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let posts = post_service::posts_by_author(&state.db, user_id).await?;
    Ok(Json(PostsResponse { posts }))
}

/// Toggles the authenticated caller's like on a post.
#[axum::debug_handler]
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let post = post_service::toggle_like(&state.db, post_id, caller.user_id).await?;
    Ok(Json(post))
}
