use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::post::Post,
};

/// A helper function to map a `tokio_postgres::Row` to a `Post`.
///
/// Expects the row to carry an aggregated `likes` uuid array column.
fn row_to_post(row: &Row) -> Result<Post> {
    Ok(Post {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        location: row.try_get("location")?,
        user_picture_path: row.try_get("user_picture_path")?,
        description: row.try_get("description")?,
        picture_path: row.try_get("picture_path")?,
        likes: row.try_get("likes")?,
        comments: row.try_get("comments")?,
        created_at: row.try_get("created_at")?,
    })
}

const POST_WITH_LIKES: &str = r#"
    SELECT p.id, p.user_id, p.first_name, p.last_name, p.location,
           p.user_picture_path, p.description, p.picture_path, p.comments,
           p.created_at,
           COALESCE(
               ARRAY_AGG(l.user_id ORDER BY l.created_at)
                   FILTER (WHERE l.user_id IS NOT NULL),
               '{}'::uuid[]
           ) AS likes
    FROM posts p
    LEFT JOIN post_likes l ON l.post_id = p.id
"#;

/// Creates a new post with the author fields already denormalized.
pub async fn create_post(
    pool: &Pool,
    id: Uuid,
    user_id: Uuid,
    first_name: &str,
    last_name: &str,
    location: &str,
    user_picture_path: &str,
    description: &str,
    picture_path: &str,
) -> Result<Post> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO posts (id, user_id, first_name, last_name, location,
                               user_picture_path, description, picture_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, first_name, last_name, location,
                      user_picture_path, description, picture_path, comments,
                      created_at, '{}'::uuid[] AS likes
            "#,
            &[
                &id,
                &user_id,
                &first_name,
                &last_name,
                &location,
                &user_picture_path,
                &description,
                &picture_path,
            ],
        )
        .await?;
    row_to_post(&row)
}

/// Finds a post by its ID, including its current like set.
pub async fn find_by_id(pool: &Pool, post_id: &Uuid) -> Result<Option<Post>> {
    let client = pool.get().await?;
    let query = format!("{} WHERE p.id = $1 GROUP BY p.id", POST_WITH_LIKES);
    let row = client.query_opt(query.as_str(), &[post_id]).await?;
    row.map(|r| row_to_post(&r)).transpose()
}

/// Lists all posts, newest first.
pub async fn list_feed(pool: &Pool) -> Result<Vec<Post>> {
    let client = pool.get().await?;
    let query = format!(
        "{} GROUP BY p.id ORDER BY p.created_at DESC",
        POST_WITH_LIKES
    );
    let rows = client.query(query.as_str(), &[]).await?;
    rows.iter().map(row_to_post).collect()
}

/// Lists all posts by one author, newest first.
pub async fn list_by_author(pool: &Pool, author_id: &Uuid) -> Result<Vec<Post>> {
    let client = pool.get().await?;
    let query = format!(
        "{} WHERE p.user_id = $1 GROUP BY p.id ORDER BY p.created_at DESC",
        POST_WITH_LIKES
    );
    let rows = client.query(query.as_str(), &[author_id]).await?;
    rows.iter().map(row_to_post).collect()
}

/// Flips a user's like on a post and returns the updated like set.
///
/// The flip is one atomic statement executed by the database: the like row
/// is deleted if present, inserted otherwise. Concurrent toggles by
/// different users touch different rows and cannot lose each other's
/// updates; there is no application-side read-modify-write.
pub async fn toggle_like(pool: &Pool, post_id: &Uuid, user_id: &Uuid) -> Result<Vec<Uuid>> {
    let client = pool.get().await?;
    let result = client
        .execute(
            r#"
            WITH removed AS (
                DELETE FROM post_likes
                WHERE post_id = $1 AND user_id = $2
                RETURNING user_id
            )
            INSERT INTO post_likes (post_id, user_id)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM removed)
            ON CONFLICT DO NOTHING
            "#,
            &[post_id, user_id],
        )
        .await;

    match result {
        Ok(_) => {}
        // The post (or the liker) disappeared between lookup and toggle.
        Err(e) if e.code() == Some(&SqlState::FOREIGN_KEY_VIOLATION) => {
            return Err(AppError::NotFound);
        }
        Err(e) => return Err(e.into()),
    }

    let row = client
        .query_one(
            r#"
            SELECT ARRAY(
                SELECT user_id FROM post_likes
                WHERE post_id = $1
                ORDER BY created_at
            ) AS likes
            "#,
            &[post_id],
        )
        .await?;
    row.try_get("likes").map_err(Into::into)
}
