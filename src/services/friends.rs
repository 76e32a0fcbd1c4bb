use std::collections::HashMap;
use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::user::FriendView;
use crate::repositories::{friend as friend_repo, user as user_repo};

/// Adds a symmetric friendship between two users.
///
/// The relation is one normalized edge row, so after success both users see
/// each other in their friend lists; there is no window in which only one
/// side is applied.
///
/// Fails with `Validation` on self-friendship, `NotFound` when either id
/// does not resolve, and `Conflict` when the users are already friends.
/// Returns the caller's updated friend list.
pub async fn add_friend(db: &Pool, user_id: Uuid, friend_id: Uuid) -> Result<Vec<FriendView>> {
    if user_id == friend_id {
        return Err(AppError::Validation(
            "Users cannot friend themselves".to_string(),
        ));
    }

    resolve_both(db, user_id, friend_id).await?;

    if !friend_repo::add_edge(db, user_id, friend_id).await? {
        return Err(AppError::Conflict("Users are already friends".to_string()));
    }

    tracing::info!("✅ Friendship added: {} <-> {}", user_id, friend_id);
    list_friends(db, user_id).await
}

/// Removes the friendship between two users.
///
/// Removal is idempotent: removing an absent edge is a no-op, not an error.
/// Returns the caller's updated friend list.
pub async fn remove_friend(db: &Pool, user_id: Uuid, friend_id: Uuid) -> Result<Vec<FriendView>> {
    resolve_both(db, user_id, friend_id).await?;

    let removed = friend_repo::remove_edge(db, user_id, friend_id).await?;
    if removed {
        tracing::info!("✅ Friendship removed: {} <-> {}", user_id, friend_id);
    } else {
        tracing::debug!("Friendship {} <-> {} was not present", user_id, friend_id);
    }

    list_friends(db, user_id).await
}

/// Lists a user's friends as projected, non-sensitive views.
///
/// Fails closed: when the graph holds an edge whose user record cannot be
/// fetched, the whole call fails instead of returning partial results.
pub async fn list_friends(db: &Pool, user_id: Uuid) -> Result<Vec<FriendView>> {
    user_repo::find_by_id(db, &user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let friend_ids = friend_repo::list_friend_ids(db, user_id).await?;
    if friend_ids.is_empty() {
        return Ok(Vec::new());
    }

    let users = user_repo::find_many_by_ids(db, &friend_ids).await?;
    let by_id: HashMap<Uuid, &crate::models::user::User> =
        users.iter().map(|u| (u.id, u)).collect();

    // Preserve edge order while checking every id resolved.
    friend_ids
        .iter()
        .map(|id| by_id.get(id).map(|u| FriendView::from(*u)).ok_or(AppError::FriendLookup))
        .collect()
}

/// Resolves both sides of a friendship operation, failing with `NotFound`
/// if either user is missing.
async fn resolve_both(db: &Pool, user_id: Uuid, friend_id: Uuid) -> Result<()> {
    user_repo::find_by_id(db, &user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    user_repo::find_by_id(db, &friend_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(())
}
