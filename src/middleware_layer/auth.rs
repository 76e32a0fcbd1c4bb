use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use http::header;

use crate::{
    crypto::token,
    error::AppError,
    models::session::AuthenticatedUser,
    state::AppState,
};

/// Extracts the bearer token from the `Authorization` header.
fn extract_bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// A middleware that requires a valid session token.
///
/// This is the sole authentication gate for mutating operations: the token
/// is verified here, once, and the verified identity is handed to handlers
/// as an [`AuthenticatedUser`] extension. Handlers never re-derive the
/// caller from request state.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response`, or an `AppError` that maps to a 403.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = extract_bearer_token(&request).ok_or_else(|| {
        tracing::warn!("❌ No bearer token on protected route");
        AppError::MissingToken
    })?;

    let claims = token::verify_token(bearer, &state.config.token_secret)?;

    tracing::debug!("✅ User authenticated: {}", claims.sub);

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
