use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a user in the system.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The user's email address. Globally unique.
    pub email: String,
    /// The user's hashed password.
    pub password: String,
    /// A reference to the user's profile picture.
    pub picture_path: String,
    /// The user's location.
    pub location: String,
    /// The user's occupation.
    pub occupation: String,
    /// How often the profile has been viewed.
    pub viewed_profile: i32,
    /// How often the user's content has been shown.
    pub impressions: i32,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The outward-facing view of a user. Never carries the password hash.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub picture_path: String,
    pub location: String,
    pub occupation: String,
    pub viewed_profile: i32,
    pub impressions: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            picture_path: user.picture_path,
            location: user.location,
            occupation: user.occupation,
            viewed_profile: user.viewed_profile,
            impressions: user.impressions,
            created_at: user.created_at,
        }
    }
}

/// The projected, non-sensitive view of a friend returned by friend listings.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FriendView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub picture_path: String,
    pub occupation: String,
    pub location: String,
}

impl From<&User> for FriendView {
    fn from(user: &User) -> Self {
        FriendView {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            picture_path: user.picture_path.clone(),
            occupation: user.occupation.clone(),
            location: user.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "$argon2id$v=19$m=19456,t=3,p=6$abc$def".to_string(),
            picture_path: "p1.jpg".to_string(),
            location: "London".to_string(),
            occupation: "Engineer".to_string(),
            viewed_profile: 0,
            impressions: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn profile_serializes_camel_case_without_password() {
        let profile = UserProfile::from(sample_user());
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"firstName\""));
        assert!(json.contains("\"picturePath\""));
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn friend_view_projects_non_sensitive_fields() {
        let user = sample_user();
        let view = FriendView::from(&user);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"occupation\":\"Engineer\""));
        assert!(!json.contains("viewedProfile"));
        assert!(!json.contains("argon2id"));
    }
}
