//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use clementine_core::{Email, UserId, Username};

/// A registered user.
///
/// The password hash is deliberately absent: it lives only in the `users`
/// table and in the login path, and is never serialized into a response.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across the shop.
    pub username: Username,
    /// Contact email address.
    pub email: Email,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user record was last updated.
    pub updated_at: DateTime<Utc>,
}
