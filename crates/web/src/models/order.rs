//! Order domain types.

use chrono::{DateTime, Utc};

use silver_pizza_core::{CustomerId, OrderId, PizzaId};

/// An order.
///
/// The single order per customer with `complete == false` functions as that
/// customer's persistent shopping cart.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Whether the order has been finalized at checkout.
    pub complete: bool,
    /// External transaction id, stamped when the order completes.
    pub transaction_id: Option<String>,
    /// When the order row was created.
    pub date_ordered: DateTime<Utc>,
}

/// A line item joined with its catalog data, as the cart displays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// The pizza this line refers to.
    pub pizza_id: PizzaId,
    /// Pizza name at display time.
    pub name: String,
    /// Pizza image at display time.
    pub image_url: String,
    /// Unit price in whole currency units.
    pub unit_price: i64,
    /// Number of units.
    pub quantity: i64,
}

impl OrderLine {
    /// Derived line total: unit price × quantity.
    #[must_use]
    pub const fn line_total(&self) -> i64 {
        self.unit_price * self.quantity
    }
}

/// Shipping contact data collected by the checkout form.
#[derive(Debug, Clone)]
pub struct NewShipping {
    /// Delivery address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
}
