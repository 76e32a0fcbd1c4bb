use crate::error::{AppError, Result};

/// Validates an email address.
///
/// # Arguments
///
/// * `email` - The email address to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the email is valid.
pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("Email cannot be empty".to_string()));
    }

    if email.len() > 50 {
        return Err(AppError::Validation(
            "Email must be at most 50 characters".to_string(),
        ));
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::Validation(
            "Email must be a valid address".to_string(),
        ));
    }

    Ok(())
}

/// Validates a password.
///
/// # Arguments
///
/// * `password` - The password to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the password is valid.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 7 {
        return Err(AppError::Validation(
            "Password must be at least 7 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be at most 128 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a first or last name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }

    if name.len() > 50 {
        return Err(AppError::Validation(
            "Name must be at most 50 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_email() {
        assert!(validate_email("a@x.com").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@nodot").is_err());
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("secret12").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn name_bounds() {
        assert!(validate_name("Ada").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }
}
