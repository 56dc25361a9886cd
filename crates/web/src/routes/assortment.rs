//! Catalog page route handlers.
//!
//! The filter form submits a single kind slug; unrecognized selections fall
//! back to the unfiltered assortment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::instrument;

use silver_pizza_core::PizzaKind;

use crate::db::pizzas::PizzaRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{GuestCartCookie, OptionalAuth};
use crate::models::{CurrentUser, Pizza};
use crate::services::cart::{self, CartSummary};
use crate::state::AppState;

/// Filter form data.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    pub list_of_types: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/assortment.html")]
pub struct AssortmentTemplate {
    pub pagename: &'static str,
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
    pub pizzas: Vec<Pizza>,
    pub active_filter: Option<&'static str>,
    pub kinds: [PizzaKind; 4],
}

async fn render(
    state: &AppState,
    user: Option<CurrentUser>,
    guest: &cart::GuestCart,
    selection: Option<&str>,
) -> Result<AssortmentTemplate> {
    let kind = selection.and_then(PizzaKind::from_slug);
    let pizzas = PizzaRepository::new(state.pool()).list(kind).await?;
    let cart = cart::summarize(state.pool(), user.as_ref(), guest).await?;

    Ok(AssortmentTemplate {
        pagename: "Assortment",
        current_user: user,
        cart,
        pizzas,
        active_filter: kind.map(PizzaKind::label),
        kinds: PizzaKind::ALL,
    })
}

/// Display the unfiltered catalog.
#[instrument(skip(state, guest))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    GuestCartCookie(guest): GuestCartCookie,
) -> Result<AssortmentTemplate> {
    render(&state, user, &guest, None).await
}

/// Display the catalog filtered by the submitted kind.
#[instrument(skip(state, guest))]
pub async fn filter(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    GuestCartCookie(guest): GuestCartCookie,
    Form(form): Form<FilterForm>,
) -> Result<AssortmentTemplate> {
    render(&state, user, &guest, form.list_of_types.as_deref()).await
}
