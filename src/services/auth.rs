use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use deadpool_postgres::Pool;
use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;
use zeroize::Zeroize;

use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::repositories::user as user_repo;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 6;

/// Hashes a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the hashed password.
pub fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng.fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Internal(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Internal(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    Ok(password_hash)
}

/// Verifies a password against a hash.
///
/// Argon2 verification re-derives the full hash, so the comparison effort
/// does not depend on how much of the password matches.
///
/// # Arguments
///
/// * `password` - The password to verify.
/// * `hash` - The hash to verify against.
///
/// # Returns
///
/// A `Result` containing `true` if the password is valid, `false` otherwise.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Hash parse error: {}", e)))?;
    let argon2 = Argon2::default();
    let result = argon2.verify_password(&password_bytes, &parsed_hash).is_ok();

    password_bytes.zeroize();
    Ok(result)
}

/// Registers a new user.
///
/// Duplicate emails surface as `Conflict` straight from the database's
/// UNIQUE constraint; no existence check runs first.
pub async fn register(
    db: &Pool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
    picture_path: &str,
    location: &str,
    occupation: &str,
) -> Result<User> {
    tracing::debug!("🔐 Creating user: {}", email);
    let hashed_password = hash_password(password)?;

    let user = user_repo::create_user(
        db,
        Uuid::new_v4(),
        first_name,
        last_name,
        email,
        &hashed_password,
        picture_path,
        location,
        occupation,
    )
    .await?;

    tracing::info!("✅ User created with ID: {}", user.id);
    Ok(user)
}

/// Authenticates a user by email and password.
///
/// An unknown email and a wrong password return the same error, so the API
/// never reveals which of the two was wrong.
pub async fn authenticate(db: &Pool, email: &str, password: &str) -> Result<User> {
    tracing::debug!("🔐 Authenticating user: {}", email);

    let user = user_repo::find_by_email(db, email).await?.ok_or_else(|| {
        AppError::Authentication("Invalid credentials, could not log you in".to_string())
    })?;

    if !verify_password(password, &user.password)? {
        return Err(AppError::Authentication(
            "Invalid credentials, could not log you in".to_string(),
        ));
    }

    tracing::info!("✅ User authenticated: {}", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("secret12").unwrap();
        assert!(verify_password("secret12", &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("secret12").unwrap();
        assert!(!verify_password("secret13", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("secret12").unwrap();
        let second = hash_password("secret12").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn garbage_hash_is_an_error_not_a_match() {
        assert!(verify_password("secret12", "not-a-phc-string").is_err());
    }
}
