use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a post in the feed.
///
/// Author fields are denormalized into the post at creation time and are not
/// re-synced if the author's profile later changes.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// The unique identifier for the post.
    pub id: Uuid,
    /// The ID of the user who authored the post.
    pub user_id: Uuid,
    /// The author's first name at creation time.
    pub first_name: String,
    /// The author's last name at creation time.
    pub last_name: String,
    /// The author's location at creation time.
    pub location: String,
    /// A reference to the author's profile picture at creation time.
    pub user_picture_path: String,
    /// The text of the post.
    pub description: String,
    /// A reference to the post's picture.
    pub picture_path: String,
    /// The set of user ids with an active like on this post.
    pub likes: Vec<Uuid>,
    /// Comments on the post, append-only.
    pub comments: Vec<String>,
    /// The timestamp when the post was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_likes_as_id_array() {
        let liker = Uuid::new_v4();
        let post = Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            location: "London".to_string(),
            user_picture_path: "p1.jpg".to_string(),
            description: "hello".to_string(),
            picture_path: "".to_string(),
            likes: vec![liker],
            comments: vec![],
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&post).unwrap();
        assert!(json.contains("\"userPicturePath\""));
        assert!(json.contains(&format!("\"likes\":[\"{}\"]", liker)));
        assert!(json.contains("\"comments\":[]"));
    }
}
