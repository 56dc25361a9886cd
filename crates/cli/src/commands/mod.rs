//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod staff;

use secrecy::SecretString;

/// Errors shared by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error from the web crate.
    #[error("Repository error: {0}")]
    Repository(#[from] silver_pizza_web::db::RepositoryError),

    /// Authentication/validation error from the web crate.
    #[error("Auth error: {0}")]
    Auth(#[from] silver_pizza_web::services::auth::AuthError),

    /// Invalid username.
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] silver_pizza_core::UsernameError),
}

/// Read the database URL from `PIZZA_DATABASE_URL` or `DATABASE_URL`.
pub(crate) fn database_url() -> Result<SecretString, CliError> {
    if let Ok(value) = std::env::var("PIZZA_DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(CliError::MissingEnvVar("PIZZA_DATABASE_URL"))
}
