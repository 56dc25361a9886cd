//! Database operations for the pizza shop `PostgreSQL` instance.
//!
//! ## Tables
//!
//! - `app_user` - Site authentication (username + argon2 password hash)
//! - `customer` - Shop profile attached to a user (bonus points)
//! - `pizza` - The catalog
//! - `customer_order` - Orders; the single incomplete order per customer is
//!   that customer's cart
//! - `order_item` - Line items linking orders to pizzas
//! - `shipping_info` - Address/phone collected at checkout
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p silver-pizza-cli -- migrate
//! ```
//!
//! Queries use the runtime `sqlx::query_as` API with `FromRow` row structs;
//! rows are converted into validated domain types at the repository boundary.

pub mod customers;
pub mod orders;
pub mod pizzas;
pub mod shipping;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
