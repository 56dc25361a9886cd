//! Payment stub page route handler.
//!
//! Payment-gateway integration is out of scope; this page only confirms what
//! the visitor is about to pay for.

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

/// Payment page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/payment.html")]
pub struct PaymentTemplate {
    pub pagename: &'static str,
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
}

/// Display the payment stub page.
#[instrument(skip(state, guest))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    GuestCartCookie(guest): GuestCartCookie,
) -> Result<PaymentTemplate> {
    let cart = cart::summarize(state.pool(), user.as_ref(), &guest).await?;

    Ok(PaymentTemplate {
        pagename: "Payment",
        current_user: user,
        cart,
    })
}
