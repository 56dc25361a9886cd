//! Cart aggregation.
//!
//! Reduces either a signed-in customer's persisted open order or a guest's
//! cookie-encoded cart into one uniform [`CartSummary`] for the templates.
//!
//! The guest cookie is client-held mutable state with no integrity
//! protection, so it parses through a strict schema and the summary carries
//! an explicit [`CartFidelity`] instead of silently dropping entries.
//! Guest aggregation never fails past this boundary; a broken cookie
//! degrades to an empty cart. Authenticated aggregation reads the database
//! and propagates repository errors, which are server faults rather than
//! degraded carts.

use std::collections::HashMap;

use serde::Deserialize;
use sqlx::PgPool;

use silver_pizza_core::PizzaId;

use crate::db::RepositoryError;
use crate::db::customers::CustomerRepository;
use crate::db::orders::OrderRepository;
use crate::db::pizzas::PizzaRepository;
use crate::models::{CurrentUser, Order, OrderLine, Pizza};

/// Name of the guest-cart cookie, maintained by the client-side script.
pub const GUEST_CART_COOKIE: &str = "cart";

/// One entry of the guest-cart cookie: `{"<pizza id>": {"quantity": n}}`.
#[derive(Debug, Deserialize)]
struct GuestCartEntry {
    quantity: i64,
}

/// Parsed guest-cart cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestCart {
    /// No cookie present.
    Missing,
    /// The cookie was not a JSON object of the expected shape.
    Malformed,
    /// Well-formed entries, plus the count of entries dropped during parsing
    /// (non-numeric ids, missing or non-positive quantities).
    Entries {
        entries: Vec<(PizzaId, i64)>,
        skipped: usize,
    },
}

impl GuestCart {
    /// Parse the raw cookie value.
    ///
    /// The top level must be a JSON object; anything else is `Malformed`.
    /// Individual entries that fail validation are skipped and counted, so a
    /// single stale entry does not take the rest of the cart with it.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Ok(map) = serde_json::from_str::<HashMap<String, serde_json::Value>>(raw) else {
            return Self::Malformed;
        };

        let mut entries = Vec::with_capacity(map.len());
        let mut skipped = 0;
        for (key, value) in map {
            let id = key.parse::<i32>();
            let entry = serde_json::from_value::<GuestCartEntry>(value);
            match (id, entry) {
                (Ok(id), Ok(entry)) if entry.quantity >= 1 => {
                    entries.push((PizzaId::new(id), entry.quantity));
                }
                _ => skipped += 1,
            }
        }

        // HashMap iteration order is arbitrary; keep the cart stable across
        // renders.
        entries.sort_by_key(|(id, _)| id.as_i32());

        Self::Entries { entries, skipped }
    }
}

/// How faithful a [`CartSummary`] is to what the requester asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartFidelity {
    /// Every entry resolved.
    Complete,
    /// Some guest-cart entries were dropped (stale pizza references or
    /// malformed values); the count is reported rather than silently lost.
    Partial { skipped: usize },
    /// The guest-cart cookie was unreadable; the cart degraded to empty.
    Malformed,
}

/// Uniform cart summary handed to the templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Resolved line items.
    pub lines: Vec<OrderLine>,
    /// Total number of units across all lines (the notifications badge).
    pub item_count: i64,
    /// Total of all line totals.
    pub cart_total: i64,
    /// Loyalty credit this cart would earn: floor(5% of the total).
    pub bonus_points: i64,
    /// How faithful this summary is.
    pub fidelity: CartFidelity,
}

impl CartSummary {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            item_count: 0,
            cart_total: 0,
            bonus_points: 0,
            fidelity: CartFidelity::Complete,
        }
    }

    /// An empty cart produced from an unreadable cookie.
    #[must_use]
    pub const fn malformed() -> Self {
        Self {
            lines: Vec::new(),
            item_count: 0,
            cart_total: 0,
            bonus_points: 0,
            fidelity: CartFidelity::Malformed,
        }
    }

    /// Build a summary from resolved lines.
    #[must_use]
    pub fn from_lines(lines: Vec<OrderLine>, fidelity: CartFidelity) -> Self {
        let item_count = lines.iter().map(|l| l.quantity).sum();
        let cart_total = lines.iter().map(OrderLine::line_total).sum();

        Self {
            item_count,
            cart_total,
            bonus_points: bonus_points_for_total(cart_total),
            lines,
            fidelity,
        }
    }

    /// Whether any guest entries were dropped.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        !matches!(self.fidelity, CartFidelity::Complete)
    }
}

/// Loyalty credit for an order total: floor(0.05 × total).
#[must_use]
pub const fn bonus_points_for_total(total: i64) -> i64 {
    total * 5 / 100
}

/// Build a guest summary from parsed entries and the pizzas they resolved to.
///
/// Entries referencing pizzas absent from `pizzas` are dropped and added to
/// the skip count; a skipped entry contributes nothing to the item count.
fn build_guest_summary(
    entries: &[(PizzaId, i64)],
    parse_skipped: usize,
    pizzas: &HashMap<PizzaId, Pizza>,
) -> CartSummary {
    let mut lines = Vec::with_capacity(entries.len());
    let mut skipped = parse_skipped;

    for &(pizza_id, quantity) in entries {
        match pizzas.get(&pizza_id) {
            Some(pizza) => lines.push(OrderLine {
                pizza_id,
                name: pizza.name.clone(),
                image_url: pizza.image_url.clone(),
                unit_price: pizza.price,
                quantity,
            }),
            None => skipped += 1,
        }
    }

    let fidelity = if skipped == 0 {
        CartFidelity::Complete
    } else {
        CartFidelity::Partial { skipped }
    };

    CartSummary::from_lines(lines, fidelity)
}

/// Get the signed-in customer's open order together with its summary.
///
/// Checkout uses the order half; every page uses the summary half.
///
/// # Errors
///
/// Returns `RepositoryError` if a database operation fails.
pub async fn open_order_summary(
    pool: &PgPool,
    user: &CurrentUser,
) -> Result<(Order, CartSummary), RepositoryError> {
    let customer = CustomerRepository::new(pool).get_or_create(user.id).await?;
    let orders = OrderRepository::new(pool);
    let order = orders.get_or_create_open(customer.id).await?;
    let lines = orders.lines(order.id).await?;

    Ok((order, CartSummary::from_lines(lines, CartFidelity::Complete)))
}

/// Produce the cart summary for any request.
///
/// # Errors
///
/// Returns `RepositoryError` only for authenticated requests whose database
/// reads fail; the guest path always degrades instead of failing.
pub async fn summarize(
    pool: &PgPool,
    user: Option<&CurrentUser>,
    guest: &GuestCart,
) -> Result<CartSummary, RepositoryError> {
    if let Some(user) = user {
        let (_, summary) = open_order_summary(pool, user).await?;
        return Ok(summary);
    }

    match guest {
        GuestCart::Missing => Ok(CartSummary::empty()),
        GuestCart::Malformed => Ok(CartSummary::malformed()),
        GuestCart::Entries { entries, skipped } => {
            let ids: Vec<PizzaId> = entries.iter().map(|&(id, _)| id).collect();
            let pizzas = match PizzaRepository::new(pool).get_many(&ids).await {
                Ok(pizzas) => pizzas,
                Err(e) => {
                    // Guest carts degrade rather than fail the page.
                    tracing::warn!("Failed to resolve guest cart pizzas: {e}");
                    return Ok(CartSummary::malformed());
                }
            };

            let by_id: HashMap<PizzaId, Pizza> =
                pizzas.into_iter().map(|p| (p.id, p)).collect();

            Ok(build_guest_summary(entries, *skipped, &by_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use silver_pizza_core::{PizzaKind, UserId};

    fn pizza(id: i32, price: i64) -> Pizza {
        Pizza {
            id: PizzaId::new(id),
            author_id: UserId::new(1),
            name: format!("Pizza {id}"),
            description: String::new(),
            image_url: String::new(),
            price,
            rating: 0,
            kind: PizzaKind::Chicken,
            created_at: Utc::now(),
        }
    }

    fn line(pizza_id: i32, unit_price: i64, quantity: i64) -> OrderLine {
        OrderLine {
            pizza_id: PizzaId::new(pizza_id),
            name: format!("Pizza {pizza_id}"),
            image_url: String::new(),
            unit_price,
            quantity,
        }
    }

    #[test]
    fn test_guest_cookie_totals() {
        let cart = GuestCart::parse(r#"{"1": {"quantity": 2}, "2": {"quantity": 3}}"#);
        let GuestCart::Entries { entries, skipped } = cart else {
            panic!("expected entries");
        };
        assert_eq!(skipped, 0);

        let pizzas: HashMap<PizzaId, Pizza> = [pizza(1, 500), pizza(2, 300)]
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let summary = build_guest_summary(&entries, skipped, &pizzas);
        assert_eq!(summary.item_count, 5);
        assert_eq!(summary.cart_total, 2400);
        assert_eq!(summary.fidelity, CartFidelity::Complete);
    }

    #[test]
    fn test_order_totals_and_bonus_points() {
        let summary = CartSummary::from_lines(
            vec![line(1, 100, 2), line(2, 50, 1)],
            CartFidelity::Complete,
        );
        assert_eq!(summary.cart_total, 250);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.bonus_points, 12);
    }

    #[test]
    fn test_bonus_points_floor() {
        assert_eq!(bonus_points_for_total(0), 0);
        assert_eq!(bonus_points_for_total(19), 0);
        assert_eq!(bonus_points_for_total(20), 1);
        assert_eq!(bonus_points_for_total(250), 12);
        assert_eq!(bonus_points_for_total(2400), 120);
    }

    #[test]
    fn test_malformed_cookie_degrades_to_empty() {
        assert_eq!(GuestCart::parse("not json at all"), GuestCart::Malformed);
        assert_eq!(GuestCart::parse("[1, 2, 3]"), GuestCart::Malformed);

        let summary = CartSummary::malformed();
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.cart_total, 0);
        assert!(summary.is_degraded());
    }

    #[test]
    fn test_bad_entries_are_skipped_not_counted() {
        let cart = GuestCart::parse(
            r#"{"1": {"quantity": 2}, "abc": {"quantity": 1}, "2": {"quantity": 0}, "3": {"wrong": 1}}"#,
        );
        let GuestCart::Entries { entries, skipped } = cart else {
            panic!("expected entries");
        };
        assert_eq!(entries, vec![(PizzaId::new(1), 2)]);
        assert_eq!(skipped, 3);

        let pizzas: HashMap<PizzaId, Pizza> =
            [pizza(1, 500)].into_iter().map(|p| (p.id, p)).collect();
        let summary = build_guest_summary(&entries, skipped, &pizzas);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.fidelity, CartFidelity::Partial { skipped: 3 });
    }

    #[test]
    fn test_stale_reference_is_partial() {
        let cart = GuestCart::parse(r#"{"1": {"quantity": 2}, "99": {"quantity": 1}}"#);
        let GuestCart::Entries { entries, skipped } = cart else {
            panic!("expected entries");
        };
        assert_eq!(skipped, 0);

        // Pizza 99 no longer exists in the catalog.
        let pizzas: HashMap<PizzaId, Pizza> =
            [pizza(1, 500)].into_iter().map(|p| (p.id, p)).collect();

        let summary = build_guest_summary(&entries, skipped, &pizzas);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.cart_total, 1000);
        assert_eq!(summary.fidelity, CartFidelity::Partial { skipped: 1 });
    }

    #[test]
    fn test_entries_are_sorted_by_id() {
        let cart = GuestCart::parse(r#"{"9": {"quantity": 1}, "2": {"quantity": 1}}"#);
        let GuestCart::Entries { entries, .. } = cart else {
            panic!("expected entries");
        };
        assert_eq!(entries, vec![(PizzaId::new(2), 1), (PizzaId::new(9), 1)]);
    }
}
