use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::session::AuthenticatedUser,
    models::user::{FriendView, UserProfile},
    repositories::user as user_repo,
    services::friends as friend_service,
    state::AppState,
};

/// The response payload wrapping a single user profile.
#[derive(Serialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

/// The response payload wrapping a friend listing.
#[derive(Serialize)]
pub struct FriendsResponse {
    pub friends: Vec<FriendView>,
}

/// Returns a user's profile.
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = user_repo::find_by_id(&state.db, &user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(UserResponse {
        user: UserProfile::from(user),
    }))
}

/// Returns a user's friends as projected views.
#[axum::debug_handler]
pub async fn list_friends(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let friends = friend_service::list_friends(&state.db, user_id).await?;
    Ok(Json(FriendsResponse { friends }))
}

/// Adds a friendship between two users. Requires an authenticated caller.
#[axum::debug_handler]
pub async fn add_friend(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((user_id, friend_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    tracing::debug!(
        "Friend add requested by {}: {} -> {}",
        caller.user_id,
        user_id,
        friend_id
    );

    let friends = friend_service::add_friend(&state.db, user_id, friend_id).await?;
    Ok(Json(FriendsResponse { friends }))
}

/// Removes a friendship between two users. Requires an authenticated caller.
#[axum::debug_handler]
pub async fn remove_friend(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((user_id, friend_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    tracing::debug!(
        "Friend removal requested by {}: {} -> {}",
        caller.user_id,
        user_id,
        friend_id
    );

    let friends = friend_service::remove_friend(&state.db, user_id, friend_id).await?;
    Ok(Json(FriendsResponse { friends }))
}
