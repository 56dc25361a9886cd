//! Customer repository for database operations.

use sqlx::PgPool;

use silver_pizza_core::{CustomerId, UserId};

use super::RepositoryError;
use crate::models::Customer;

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    user_id: i32,
    name: Option<String>,
    bonus_points: i64,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Self {
            id: CustomerId::new(r.id),
            user_id: UserId::new(r.user_id),
            name: r.name,
            bonus_points: r.bonus_points,
        }
    }
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the customer profile for a user, creating it if missing.
    ///
    /// Profiles are normally created together with the account; the insert
    /// here repairs accounts that predate that rule.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Customer, RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO customer (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(user_id.as_i32())
        .execute(self.pool)
        .await?;

        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, user_id, name, bonus_points
            FROM customer
            WHERE user_id = $1
            ",
        )
        .bind(user_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get the customer profile for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, user_id, name, bonus_points
            FROM customer
            WHERE user_id = $1
            ",
        )
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }
}
