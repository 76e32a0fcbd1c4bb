use deadpool_postgres::Pool;
use uuid::Uuid;
use crate::error::Result;

/// Normalizes an unordered pair of user ids into its stored form.
///
/// Edges are stored with `user_a < user_b`, so the symmetric relation is one
/// row and both directions resolve to the same edge.
fn normalize_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a < b { (a, b) } else { (b, a) }
}

/// Inserts the friendship edge between two users.
///
/// Returns `true` if the edge was created and `false` if it already existed.
/// The write is a single statement on a single row, so the symmetric
/// relation can never be half-applied.
pub async fn add_edge(pool: &Pool, user_id: Uuid, friend_id: Uuid) -> Result<bool> {
    let (user_a, user_b) = normalize_pair(user_id, friend_id);
    let client = pool.get().await?;
    let inserted = client
        .execute(
            r#"
            INSERT INTO friendships (user_a, user_b)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
            &[&user_a, &user_b],
        )
        .await?;
    Ok(inserted == 1)
}

/// Removes the friendship edge between two users.
///
/// Returns `true` if an edge was removed, `false` if none existed. Removal
/// is idempotent; the caller treats `false` as a no-op, not an error.
pub async fn remove_edge(pool: &Pool, user_id: Uuid, friend_id: Uuid) -> Result<bool> {
    let (user_a, user_b) = normalize_pair(user_id, friend_id);
    let client = pool.get().await?;
    let removed = client
        .execute(
            r#"
            DELETE FROM friendships
            WHERE user_a = $1 AND user_b = $2
            "#,
            &[&user_a, &user_b],
        )
        .await?;
    Ok(removed == 1)
}

/// Lists the ids of all friends of a user, oldest edge first.
pub async fn list_friend_ids(pool: &Pool, user_id: Uuid) -> Result<Vec<Uuid>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT CASE WHEN user_a = $1 THEN user_b ELSE user_a END AS friend_id
            FROM friendships
            WHERE user_a = $1 OR user_b = $1
            ORDER BY created_at ASC
            "#,
            &[&user_id],
        )
        .await?;
    rows.iter()
        .map(|row| row.try_get("friend_id").map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_normalization_is_order_insensitive() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(normalize_pair(a, b), normalize_pair(b, a));
    }

    #[test]
    fn normalized_pair_is_ordered() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let (lo, hi) = normalize_pair(a, b);
        assert!(lo < hi);
    }
}
