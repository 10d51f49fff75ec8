//! Authentication route handlers: register, login, logout.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body.
///
/// Fields are optional so a missing field is a 400 with a useful message
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Create a new account.
///
/// POST /register
///
/// # Errors
///
/// 400 for missing or invalid fields, 409 if the username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let (Some(username), Some(password), Some(email)) =
        (body.username, body.password, body.email)
    else {
        return Err(AppError::BadRequest("Please fill all fields".to_owned()));
    };

    let auth = AuthService::new(state.pool());
    let user = auth.register(&username, &email, &password).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in and establish a session.
///
/// POST /login
///
/// # Errors
///
/// 401 for an unknown username or wrong password; the response does not say
/// which.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<User>> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(AppError::BadRequest("Please fill all fields".to_owned()));
    };

    let auth = AuthService::new(state.pool());
    let user = auth.login(&username, &password).await?;

    let current = CurrentUser {
        id: user.id,
        username: user.username.clone(),
    };
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(user))
}

/// Log out, dropping the session identity.
///
/// POST /logout
///
/// # Errors
///
/// 500 if the session store fails.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}
