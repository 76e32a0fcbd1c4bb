use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// The pool could not hand out a database connection.
    #[error("Database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// A database error.
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// Credential verification failed (unknown email or wrong password).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No bearer token was supplied on a protected route.
    #[error("Missing bearer token")]
    MissingToken,

    /// The bearer token failed signature or expiry verification.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// A resource not found error.
    #[error("Resource not found")]
    NotFound,

    /// A conflict with existing state (duplicate email, already friends).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A friend id resolved from the graph had no matching user record.
    #[error("Friend lookup failed")]
    FriendLookup,

    /// Token signing failed.
    #[error("Token signing error: {0}")]
    Signing(String),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Pool(ref e) => {
                tracing::error!("Database pool error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }

            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }

            AppError::Authentication(ref msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                (StatusCode::FORBIDDEN, msg.clone())
            }

            AppError::MissingToken => {
                tracing::warn!("Request without bearer token");
                (StatusCode::FORBIDDEN, "Authentication failed".to_string())
            }

            AppError::InvalidToken => {
                tracing::warn!("Token verification failed");
                (StatusCode::FORBIDDEN, "Authentication failed".to_string())
            }

            AppError::NotFound => {
                tracing::debug!("Resource not found");
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }

            AppError::Conflict(ref msg) => {
                tracing::debug!("Conflict: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            AppError::FriendLookup => {
                tracing::error!("Friend lookup failed: graph edge without user record");
                (StatusCode::INTERNAL_SERVER_ERROR, "Could not fetch the friends".to_string())
            }

            AppError::Signing(ref msg) => {
                tracing::error!("Token signing error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = sonic_rs::to_string(&sonic_rs::json!({
            "error": message
        }))
        .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string());

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_422() {
        let response = AppError::Conflict("already friends".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn token_failures_map_to_403() {
        assert_eq!(
            AppError::MissingToken.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InvalidToken.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn bad_credentials_map_to_403_not_404() {
        let response =
            AppError::Authentication("Invalid credentials".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = AppError::Validation("bad input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
