use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::post::Post;
use crate::repositories::{post as post_repo, user as user_repo};

/// Creates a new post.
///
/// The author's current profile fields are copied into the post at creation
/// time; a later profile change does not rewrite existing posts.
pub async fn create_post(
    db: &Pool,
    author_id: Uuid,
    description: &str,
    picture_path: &str,
) -> Result<Post> {
    let author = user_repo::find_by_id(db, &author_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let post = post_repo::create_post(
        db,
        Uuid::new_v4(),
        author.id,
        &author.first_name,
        &author.last_name,
        &author.location,
        &author.picture_path,
        description,
        picture_path,
    )
    .await?;

    tracing::info!("✅ Post {} created by {}", post.id, author.id);
    Ok(post)
}

/// Returns every post, newest first.
pub async fn feed(db: &Pool) -> Result<Vec<Post>> {
    post_repo::list_feed(db).await
}

/// Returns one author's posts, newest first.
///
/// An unknown author simply has no posts; this is a read, not a mutation,
/// and does not 404.
pub async fn posts_by_author(db: &Pool, author_id: Uuid) -> Result<Vec<Post>> {
    post_repo::list_by_author(db, &author_id).await
}

/// Toggles a user's like on a post and returns the updated post.
///
/// A strict set-membership flip: present means liked, and toggling twice
/// with the same arguments restores the original like set.
pub async fn toggle_like(db: &Pool, post_id: Uuid, user_id: Uuid) -> Result<Post> {
    let mut post = post_repo::find_by_id(db, &post_id)
        .await?
        .ok_or(AppError::NotFound)?;

    post.likes = post_repo::toggle_like(db, &post_id, &user_id).await?;

    tracing::debug!(
        "Like toggled on post {} by {} ({} likes)",
        post_id,
        user_id,
        post.likes.len()
    );
    Ok(post)
}
