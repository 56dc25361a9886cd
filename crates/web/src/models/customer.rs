//! Customer domain types.

use silver_pizza_core::{CustomerId, UserId};

/// A shop customer.
///
/// One-to-one extension of an [`crate::models::User`] account, created
/// automatically when the account is created.
#[derive(Debug, Clone)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// The account this customer profile belongs to.
    pub user_id: UserId,
    /// Optional display name.
    pub name: Option<String>,
    /// Loyalty credit, accrued as 5% of each completed order's total.
    pub bonus_points: i64,
}
