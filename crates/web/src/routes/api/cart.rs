//! Quantity-update endpoint.
//!
//! The client-side cart script posts `{"pizzaId": n, "action": "add"|"remove"}`
//! here for signed-in visitors; guests mutate their cookie instead.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use silver_pizza_core::PizzaId;

use crate::db::customers::CustomerRepository;
use crate::db::orders::OrderRepository;
use crate::db::pizzas::PizzaRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Acknowledgement payload, fixed regardless of which action ran.
const ACK: &str = "Item Was Added";

/// Requested cart action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartAction {
    Add,
    Remove,
}

impl CartAction {
    const fn delta(self) -> i32 {
        match self {
            Self::Add => 1,
            Self::Remove => -1,
        }
    }
}

/// Quantity-update request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub pizza_id: PizzaId,
    pub action: CartAction,
}

/// Adjust a line item of the caller's open order by exactly one unit.
///
/// Creates the line on first add; deletes it when the quantity drops to zero.
/// Unknown pizza ids are a designed 404 rather than an unhandled failure.
#[instrument(skip(state))]
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<&'static str>> {
    let pizza = PizzaRepository::new(state.pool())
        .get(request.pizza_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no such pizza: {}", request.pizza_id)))?;

    let customer = CustomerRepository::new(state.pool())
        .get_or_create(user.id)
        .await?;

    let orders = OrderRepository::new(state.pool());
    let order = orders.get_or_create_open(customer.id).await?;
    orders
        .adjust_item(order.id, pizza.id, request.action.delta())
        .await?;

    tracing::debug!(
        pizza_id = %pizza.id,
        order_id = %order.id,
        action = ?request.action,
        "Cart line adjusted"
    );

    Ok(Json(ACK))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_field_names() {
        let request: UpdateItemRequest =
            serde_json::from_str(r#"{"pizzaId": 3, "action": "add"}"#).expect("valid body");
        assert_eq!(request.pizza_id, PizzaId::new(3));
        assert_eq!(request.action, CartAction::Add);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result =
            serde_json::from_str::<UpdateItemRequest>(r#"{"pizzaId": 3, "action": "clear"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_action_deltas() {
        assert_eq!(CartAction::Add.delta(), 1);
        assert_eq!(CartAction::Remove.delta(), -1);
    }
}
