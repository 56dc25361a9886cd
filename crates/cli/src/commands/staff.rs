//! Staff-rights management command.
//!
//! # Usage
//!
//! ```bash
//! sp-cli staff grant -u someone
//! sp-cli staff revoke -u someone
//! ```

use tracing::info;

use silver_pizza_core::Username;
use silver_pizza_web::db::users::UserRepository;

use super::{CliError, database_url};

/// Set or clear the staff flag for a user.
///
/// # Errors
///
/// Returns an error if the username is invalid, the user does not exist, or
/// the database is unreachable.
pub async fn set_staff(username: &str, is_staff: bool) -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let username = Username::parse(username)?;

    let database_url = database_url()?;
    let pool = silver_pizza_web::db::create_pool(&database_url).await?;

    UserRepository::new(&pool).set_staff(&username, is_staff).await?;

    if is_staff {
        info!(%username, "Granted staff rights");
    } else {
        info!(%username, "Revoked staff rights");
    }

    Ok(())
}
