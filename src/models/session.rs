use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The claims carried by a signed session token.
///
/// Tokens are stateless: nothing is persisted server-side, so verification
/// is signature check plus expiry check and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the ID of the user the token was issued to.
    pub sub: Uuid,
    /// The email the token was issued for.
    pub email: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// The verified caller identity injected into protected requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The ID of the authenticated user.
    pub user_id: Uuid,
    /// The authenticated user's email.
    pub email: String,
}
