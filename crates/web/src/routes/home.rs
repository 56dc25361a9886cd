//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{GuestCartCookie, OptionalAuth};
use crate::models::CurrentUser;
use crate::services::cart::{self, CartSummary};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/index.html")]
pub struct HomeTemplate {
    pub pagename: &'static str,
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
}

/// Display the home page.
#[instrument(skip(state, guest))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    GuestCartCookie(guest): GuestCartCookie,
) -> Result<HomeTemplate> {
    let cart = cart::summarize(state.pool(), user.as_ref(), &guest).await?;

    Ok(HomeTemplate {
        pagename: "Silver Pizza",
        current_user: user,
        cart,
    })
}
