use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::session::Claims;

/// Issues a signed session token for the given user.
///
/// The token carries exactly one validity window starting now.
///
/// # Arguments
///
/// * `user_id` - The ID of the user the token is issued to.
/// * `email` - The user's email address.
/// * `secret` - The HS256 signing secret.
/// * `ttl_minutes` - The validity window in minutes.
///
/// # Returns
///
/// A `Result` containing the encoded token.
pub fn issue_token(
    user_id: Uuid,
    email: &str,
    secret: &[u8],
    ttl_minutes: i64,
) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
        .map_err(|e| AppError::Signing(format!("Failed to sign session token: {}", e)))
}

/// Verifies a session token and returns its claims.
///
/// Fails with `InvalidToken` if the signature does not check out or the
/// expiry has elapsed.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_token_round_trips() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, "ada@example.com", SECRET, 60).unwrap();

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ada@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token(Uuid::new_v4(), "ada@example.com", SECRET, -5).unwrap();

        match verify_token(&token, SECRET) {
            Err(AppError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {:?}", other.map(|c| c.email)),
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), "ada@example.com", SECRET, 60).unwrap();

        assert!(matches!(
            verify_token(&token, b"another-secret-another-secret-32"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            verify_token("not.a.token", SECRET),
            Err(AppError::InvalidToken)
        ));
    }
}
