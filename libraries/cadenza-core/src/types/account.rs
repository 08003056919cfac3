/// Listener and admin account types
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An end-user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener {
    /// Database id
    pub id: i64,

    /// Display name (max 50 chars)
    pub name: String,

    /// Email address, unique per account
    pub email: String,

    /// Ban flag; banned listeners cannot sign in
    pub banned: bool,

    /// Current profile picture row
    pub profile_picture_id: i64,

    /// SHA-256 hex digest of the password
    pub password_hash: String,

    /// Registration date
    pub created_at: NaiveDate,
}

/// An administrator account, independent of listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    /// Database id
    pub id: i64,

    /// Login name
    pub login: String,

    /// SHA-256 hex digest of the password
    pub password_hash: String,
}

/// A profile picture row. Rows are append-only: a new upload inserts a
/// fresh row and the listener's foreign key is repointed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePicture {
    /// Database id
    pub id: i64,

    /// Path of the stored image file
    pub file_path: String,
}
