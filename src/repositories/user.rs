use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::user::User,
};

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        picture_path: row.try_get("picture_path")?,
        location: row.try_get("location")?,
        occupation: row.try_get("occupation")?,
        viewed_profile: row.try_get("viewed_profile")?,
        impressions: row.try_get("impressions")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Creates a new user in the database.
///
/// The UNIQUE constraint on `email` is the sole source of truth for
/// duplicates: there is no check-then-insert window, the constraint
/// violation itself surfaces as a `Conflict`.
pub async fn create_user(
    pool: &Pool,
    id: Uuid,
    first_name: &str,
    last_name: &str,
    email: &str,
    password_hash: &str,
    picture_path: &str,
    location: &str,
    occupation: &str,
) -> Result<User> {
    let client = pool.get().await?;
    let result = client
        .query_one(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password,
                               picture_path, location, occupation)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, email, password, picture_path,
                      location, occupation, viewed_profile, impressions,
                      created_at, updated_at
            "#,
            &[
                &id,
                &first_name,
                &last_name,
                &email,
                &password_hash,
                &picture_path,
                &location,
                &occupation,
            ],
        )
        .await;

    match result {
        Ok(row) => row_to_user(&row),
        Err(e) if e.code() == Some(&SqlState::UNIQUE_VIOLATION) => Err(AppError::Conflict(
            "User already exists, please login".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Finds a user by their email address.
pub async fn find_by_email(pool: &Pool, email: &str) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, first_name, last_name, email, password, picture_path,
                   location, occupation, viewed_profile, impressions,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
            &[&email],
        )
        .await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Finds a user by their ID.
pub async fn find_by_id(pool: &Pool, user_id: &Uuid) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, first_name, last_name, email, password, picture_path,
                   location, occupation, viewed_profile, impressions,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
            &[user_id],
        )
        .await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Fetches all users matching the given ids in one round trip.
///
/// The result carries no ordering guarantee and may be shorter than `ids`
/// when some ids do not resolve; callers decide how to treat the gap.
pub async fn find_many_by_ids(pool: &Pool, ids: &[Uuid]) -> Result<Vec<User>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, first_name, last_name, email, password, picture_path,
                   location, occupation, viewed_profile, impressions,
                   created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            "#,
            &[&ids],
        )
        .await?;
    rows.iter().map(row_to_user).collect()
}
