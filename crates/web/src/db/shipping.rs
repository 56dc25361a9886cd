//! Shipping repository for database operations.

use sqlx::PgPool;

use silver_pizza_core::ShippingInfoId;

use super::RepositoryError;
use crate::models::order::NewShipping;

#[derive(sqlx::FromRow)]
struct ShippingIdRow {
    id: i32,
}

/// Repository for shipping-record database operations.
pub struct ShippingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShippingRepository<'a> {
    /// Create a new shipping repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a shipping record with no owning order.
    ///
    /// Used by guest checkout, where the cart lives in a cookie and there is
    /// no persisted order to reference. Authenticated checkout goes through
    /// [`crate::db::orders::OrderRepository::finalize`] instead, which links
    /// the record to its order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_unlinked(
        &self,
        shipping: &NewShipping,
    ) -> Result<ShippingInfoId, RepositoryError> {
        let row = sqlx::query_as::<_, ShippingIdRow>(
            r"
            INSERT INTO shipping_info (order_id, address, phone)
            VALUES (NULL, $1, $2)
            RETURNING id
            ",
        )
        .bind(&shipping.address)
        .bind(&shipping.phone)
        .fetch_one(self.pool)
        .await?;

        Ok(ShippingInfoId::new(row.id))
    }
}
