//! User domain types.

use chrono::{DateTime, Utc};

use silver_pizza_core::{UserId, Username};

/// A site account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// Whether this user may manage the catalog.
    pub is_staff: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
