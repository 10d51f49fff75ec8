//! User route handlers.
//!
//! Plain pass-through reads plus the username/email update. Password hashes
//! never appear in any response here.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use clementine_core::{Email, UserId, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::state::AppState;

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// List all users.
///
/// GET /users
///
/// # Errors
///
/// 500 on database failure.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// Look up a user by ID.
///
/// GET /users/{userId}
///
/// # Errors
///
/// 404 if no such user exists.
pub async fn show(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<User>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(Json(user))
}

/// Update a user's username and email.
///
/// PUT /users/{userId}
///
/// # Errors
///
/// 400 for missing or invalid fields, 404 for an unknown user, 409 if the
/// new username is already taken.
pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    let (Some(username), Some(email)) = (body.username, body.email) else {
        return Err(AppError::BadRequest(
            "Please provide a username and email".to_owned(),
        ));
    };

    let username =
        Username::parse(&username).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = UserRepository::new(state.pool())
        .update(user_id, &username, &email)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("User not found".to_owned()),
            RepositoryError::Conflict(msg) => AppError::Conflict(msg),
            other => AppError::Database(other),
        })?;

    Ok(Json(user))
}
