//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! sp-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `PIZZA_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! Migration files live in `crates/web/migrations/` and are embedded at
//! compile time.

use super::{CliError, database_url};

/// Run database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails, or
/// a migration fails to apply.
pub async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = silver_pizza_web::db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
