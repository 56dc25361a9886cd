//! Top-sellers page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::pizzas::PizzaRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{GuestCartCookie, OptionalAuth};
use crate::models::{CurrentUser, Pizza};
use crate::services::cart::{self, CartSummary};
use crate::state::AppState;

/// Top-sellers page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/topsellers.html")]
pub struct TopSellersTemplate {
    pub pagename: &'static str,
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
    pub pizzas: Vec<Pizza>,
}

/// Display the catalog ordered by rating, best first.
#[instrument(skip(state, guest))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    GuestCartCookie(guest): GuestCartCookie,
) -> Result<TopSellersTemplate> {
    let pizzas = PizzaRepository::new(state.pool()).top_rated().await?;
    let cart = cart::summarize(state.pool(), user.as_ref(), &guest).await?;

    Ok(TopSellersTemplate {
        pagename: "Top sellers",
        current_user: user,
        cart,
        pizzas,
    })
}
