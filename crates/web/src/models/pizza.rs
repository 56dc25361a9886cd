//! Catalog domain types.

use chrono::{DateTime, Utc};

use silver_pizza_core::{PizzaId, PizzaKind, UserId};

/// A purchasable catalog item.
#[derive(Debug, Clone)]
pub struct Pizza {
    /// Unique pizza ID.
    pub id: PizzaId,
    /// Staff member who added this pizza to the catalog.
    pub author_id: UserId,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Image URL shown in the catalog and cart.
    pub image_url: String,
    /// Price in whole currency units.
    pub price: i64,
    /// Manually assigned rating; drives the top-sellers ordering.
    pub rating: i32,
    /// One of the four fixed type codes.
    pub kind: PizzaKind,
    /// When the pizza was added.
    pub created_at: DateTime<Utc>,
}

/// Data for a new catalog item, validated by the staff form.
#[derive(Debug, Clone)]
pub struct NewPizza {
    pub author_id: UserId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: i64,
    pub rating: i32,
    pub kind: PizzaKind,
}
