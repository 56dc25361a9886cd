//! User repository for database operations.
//!
//! Provides database access for site accounts. Creating an account also
//! creates the attached customer profile in the same transaction, so a user
//! can never exist without one.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use silver_pizza_core::{UserId, Username};

use super::RepositoryError;
use crate::models::User;

/// Raw `app_user` row; converted into [`User`] at the repository boundary.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    is_staff: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_domain(self) -> Result<User, RepositoryError> {
        let username = Username::parse(&self.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            username,
            is_staff: self.is_staff,
            created_at: self.created_at,
        })
    }
}

/// Row shape for credential lookups.
#[derive(sqlx::FromRow)]
struct UserPasswordRow {
    id: i32,
    username: String,
    is_staff: bool,
    created_at: DateTime<Utc>,
    password_hash: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their login name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored username is invalid.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, is_staff, created_at
            FROM app_user
            WHERE username = $1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_domain).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored username is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, is_staff, created_at
            FROM app_user
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_domain).transpose()
    }

    /// Get a user's password hash by login name.
    ///
    /// Returns `None` if the user doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserPasswordRow>(
            r"
            SELECT id, username, is_staff, created_at, password_hash
            FROM app_user
            WHERE username = $1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let hash = r.password_hash.clone();
        let user = UserRow {
            id: r.id,
            username: r.username,
            is_staff: r.is_staff,
            created_at: r.created_at,
        }
        .into_domain()?;

        Ok(Some((user, hash)))
    }

    /// Create a new account with a password hash, together with its customer
    /// profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO app_user (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, is_staff, created_at
            ",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        // Every account gets a customer profile, like the signal-created
        // profile in the original shop.
        sqlx::query(
            r"
            INSERT INTO customer (user_id)
            VALUES ($1)
            ",
        )
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_domain()
    }

    /// Set or clear the staff flag for a user, by login name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_staff(
        &self,
        username: &Username,
        is_staff: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE app_user
            SET is_staff = $1
            WHERE username = $2
            ",
        )
        .bind(is_staff)
        .bind(username.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
