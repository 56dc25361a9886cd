//! Order repository for database operations.
//!
//! The single incomplete order per customer is that customer's cart. A
//! partial unique index on `customer_order (customer_id) WHERE NOT complete`
//! enforces the invariant at the storage layer, so get-or-create is safe
//! under concurrent requests from the same customer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use silver_pizza_core::{CustomerId, OrderId, PizzaId};

use super::RepositoryError;
use crate::models::order::NewShipping;
use crate::models::{Order, OrderLine};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_id: i32,
    complete: bool,
    transaction_id: Option<String>,
    date_ordered: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(r: OrderRow) -> Self {
        Self {
            id: OrderId::new(r.id),
            customer_id: CustomerId::new(r.customer_id),
            complete: r.complete,
            transaction_id: r.transaction_id,
            date_ordered: r.date_ordered,
        }
    }
}

/// Line item joined with its pizza, as the cart displays it.
#[derive(sqlx::FromRow)]
struct LineRow {
    pizza_id: i32,
    name: String,
    image_url: String,
    unit_price: i64,
    quantity: i32,
}

impl From<LineRow> for OrderLine {
    fn from(r: LineRow) -> Self {
        Self {
            pizza_id: PizzaId::new(r.pizza_id),
            name: r.name,
            image_url: r.image_url,
            unit_price: r.unit_price,
            quantity: i64::from(r.quantity),
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuantityRow {
    quantity: i32,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the customer's open order, creating it if none exists.
    ///
    /// The insert races benignly: `ON CONFLICT DO NOTHING` against the
    /// partial unique index means concurrent callers all converge on the
    /// same row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create_open(
        &self,
        customer_id: CustomerId,
    ) -> Result<Order, RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO customer_order (customer_id)
            VALUES ($1)
            ON CONFLICT (customer_id) WHERE NOT complete DO NOTHING
            ",
        )
        .bind(customer_id.as_i32())
        .execute(self.pool)
        .await?;

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, customer_id, complete, transaction_id, date_ordered
            FROM customer_order
            WHERE customer_id = $1 AND NOT complete
            ",
        )
        .bind(customer_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Load an order's line items joined with their catalog data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, LineRow>(
            r"
            SELECT p.id AS pizza_id, p.name, p.image_url, p.price AS unit_price, oi.quantity
            FROM order_item oi
            JOIN pizza p ON p.id = oi.pizza_id
            WHERE oi.order_id = $1
            ORDER BY oi.date_added, oi.id
            ",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderLine::from).collect())
    }

    /// Adjust a line item's quantity by `delta`, creating the line on first
    /// use and deleting it when the quantity drops to zero or below.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn adjust_item(
        &self,
        order_id: OrderId,
        pizza_id: PizzaId,
        delta: i32,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO order_item (order_id, pizza_id, quantity)
            VALUES ($1, $2, 0)
            ON CONFLICT (order_id, pizza_id) DO NOTHING
            ",
        )
        .bind(order_id.as_i32())
        .bind(pizza_id.as_i32())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, QuantityRow>(
            r"
            UPDATE order_item
            SET quantity = quantity + $3
            WHERE order_id = $1 AND pizza_id = $2
            RETURNING quantity
            ",
        )
        .bind(order_id.as_i32())
        .bind(pizza_id.as_i32())
        .bind(delta)
        .fetch_one(&mut *tx)
        .await?;

        if row.quantity <= 0 {
            sqlx::query(
                r"
                DELETE FROM order_item
                WHERE order_id = $1 AND pizza_id = $2
                ",
            )
            .bind(order_id.as_i32())
            .bind(pizza_id.as_i32())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Finalize a checkout in one transaction: persist the shipping record
    /// linked to the order, credit bonus points to the customer, and mark the
    /// order complete with its transaction id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order is missing or already
    /// complete.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn finalize(
        &self,
        order_id: OrderId,
        customer_id: CustomerId,
        shipping: &NewShipping,
        transaction_id: &str,
        bonus_points: i64,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO shipping_info (order_id, address, phone)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(order_id.as_i32())
        .bind(&shipping.address)
        .bind(&shipping.phone)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            UPDATE customer
            SET bonus_points = bonus_points + $2
            WHERE id = $1
            ",
        )
        .bind(customer_id.as_i32())
        .bind(bonus_points)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r"
            UPDATE customer_order
            SET complete = TRUE, transaction_id = $2
            WHERE id = $1 AND NOT complete
            ",
        )
        .bind(order_id.as_i32())
        .bind(transaction_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}
