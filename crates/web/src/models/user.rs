//! User domain type.

use chrono::{DateTime, Utc};

use greenbasket_core::{UserId, Username};

/// A registered account.
///
/// The password hash never leaves the repository layer; handlers only see
/// this type.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across the system.
    pub username: Username,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
