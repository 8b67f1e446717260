//! User entity model and DTOs.

use colist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`PublicUser`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub login: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl User {
    /// Project the row to its public identity.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            login: self.login.clone(),
            created_at: self.created_at,
        }
    }
}

/// Public user identity for API responses (no password hash).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: DbId,
    pub name: String,
    pub login: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub login: String,
    pub password_hash: String,
}
