use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    crypto::token,
    error::Result,
    models::user::UserProfile,
    services::auth as auth_service,
    state::AppState,
    validation::auth::*,
};

/// The request payload for user registration.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub location: Option<String>,
    pub occupation: Option<String>,
    pub picture_path: Option<String>,
}

/// The request payload for user login.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The response payload for successful registration and login.
#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!("📝 Register attempt: {}", payload.email);
    validate_name(&payload.first_name)?;
    validate_name(&payload.last_name)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;

    let user = auth_service::register(
        &state.db,
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &payload.password,
        payload.picture_path.as_deref().unwrap_or(""),
        payload.location.as_deref().unwrap_or(""),
        payload.occupation.as_deref().unwrap_or(""),
    )
    .await?;

    let token = token::issue_token(
        user.id,
        &user.email,
        &state.config.token_secret,
        state.config.token_ttl_minutes,
    )?;

    tracing::info!("✅ User registered: {}", user.id);

    let response = AuthResponse {
        user: UserProfile::from(user),
        token,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt: {}", payload.email);
    validate_email(&payload.email)?;

    let user = auth_service::authenticate(&state.db, &payload.email, &payload.password).await?;

    let token = token::issue_token(
        user.id,
        &user.email,
        &state.config.token_secret,
        state.config.token_ttl_minutes,
    )?;

    tracing::info!("✅ User logged in: {}", user.id);

    let response = AuthResponse {
        user: UserProfile::from(user),
        token,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
