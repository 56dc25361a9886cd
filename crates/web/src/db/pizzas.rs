//! Pizza repository for catalog database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use silver_pizza_core::{PizzaId, PizzaKind, UserId};

use super::RepositoryError;
use crate::models::{NewPizza, Pizza};

/// Raw `pizza` row; the kind code is validated during conversion.
#[derive(sqlx::FromRow)]
struct PizzaRow {
    id: i32,
    author_id: i32,
    name: String,
    description: String,
    image_url: String,
    price: i64,
    rating: i32,
    kind: i16,
    created_at: DateTime<Utc>,
}

impl PizzaRow {
    fn into_domain(self) -> Result<Pizza, RepositoryError> {
        let kind = PizzaKind::from_code(self.kind).ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "invalid pizza kind code {} for pizza {}",
                self.kind, self.id
            ))
        })?;

        Ok(Pizza {
            id: PizzaId::new(self.id),
            author_id: UserId::new(self.author_id),
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            price: self.price,
            rating: self.rating,
            kind,
            created_at: self.created_at,
        })
    }
}

const PIZZA_COLUMNS: &str = "id, author_id, name, description, image_url, price, rating, kind, created_at";

/// Repository for catalog database operations.
pub struct PizzaRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PizzaRepository<'a> {
    /// Create a new pizza repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the catalog, optionally restricted to a single kind.
    ///
    /// `None` returns the full unfiltered assortment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored kind code is invalid.
    pub async fn list(&self, kind: Option<PizzaKind>) -> Result<Vec<Pizza>, RepositoryError> {
        let rows = match kind {
            Some(kind) => {
                sqlx::query_as::<_, PizzaRow>(&format!(
                    "SELECT {PIZZA_COLUMNS} FROM pizza WHERE kind = $1 ORDER BY id"
                ))
                .bind(kind.code())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PizzaRow>(&format!(
                    "SELECT {PIZZA_COLUMNS} FROM pizza ORDER BY id"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(PizzaRow::into_domain).collect()
    }

    /// List the catalog ordered by rating, best first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored kind code is invalid.
    pub async fn top_rated(&self) -> Result<Vec<Pizza>, RepositoryError> {
        let rows = sqlx::query_as::<_, PizzaRow>(&format!(
            "SELECT {PIZZA_COLUMNS} FROM pizza ORDER BY rating DESC, id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(PizzaRow::into_domain).collect()
    }

    /// Get a single pizza by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored kind code is invalid.
    pub async fn get(&self, id: PizzaId) -> Result<Option<Pizza>, RepositoryError> {
        let row = sqlx::query_as::<_, PizzaRow>(&format!(
            "SELECT {PIZZA_COLUMNS} FROM pizza WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(PizzaRow::into_domain).transpose()
    }

    /// Get several pizzas by ID in one round trip.
    ///
    /// IDs that do not exist are simply absent from the result; callers that
    /// care (the guest-cart aggregator) detect the gaps themselves.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored kind code is invalid.
    pub async fn get_many(&self, ids: &[PizzaId]) -> Result<Vec<Pizza>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i32> = ids.iter().map(PizzaId::as_i32).collect();
        let rows = sqlx::query_as::<_, PizzaRow>(&format!(
            "SELECT {PIZZA_COLUMNS} FROM pizza WHERE id = ANY($1)"
        ))
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(PizzaRow::into_domain).collect()
    }

    /// Insert a new catalog item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    /// Returns `RepositoryError::DataCorruption` if the returned row is invalid.
    pub async fn create(&self, pizza: &NewPizza) -> Result<Pizza, RepositoryError> {
        let row = sqlx::query_as::<_, PizzaRow>(&format!(
            r"
            INSERT INTO pizza (author_id, name, description, image_url, price, rating, kind)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PIZZA_COLUMNS}
            "
        ))
        .bind(pizza.author_id.as_i32())
        .bind(&pizza.name)
        .bind(&pizza.description)
        .bind(&pizza.image_url)
        .bind(pizza.price)
        .bind(pizza.rating)
        .bind(pizza.kind.code())
        .fetch_one(self.pool)
        .await?;

        row.into_domain()
    }
}
