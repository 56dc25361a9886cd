//! Checkout route handlers.
//!
//! Collects the shipping address and phone. A valid authenticated submission
//! finalizes the open order in one transaction (shipping record linked to the
//! order, bonus points credited, order marked complete) and redirects to the
//! payment stub. Guest submissions persist the shipping record without an
//! owning order; cookie carts carry no customer to credit.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::orders::OrderRepository;
use crate::db::shipping::ShippingRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{GuestCartCookie, OptionalAuth};
use crate::models::CurrentUser;
use crate::models::order::NewShipping;
use crate::services::cart::{self, CartSummary};
use crate::state::AppState;

/// Checkout form data.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutForm {
    pub address: String,
    pub phone: String,
}

/// Field-level validation errors for the checkout form.
#[derive(Debug, Default)]
pub struct CheckoutFormErrors {
    pub address: Option<&'static str>,
    pub phone: Option<&'static str>,
}

impl CheckoutFormErrors {
    fn validate(form: &CheckoutForm) -> Self {
        Self {
            address: form
                .address
                .trim()
                .is_empty()
                .then_some("Please enter a delivery address"),
            phone: form
                .phone
                .trim()
                .is_empty()
                .then_some("Please enter a phone number"),
        }
    }

    fn is_empty(&self) -> bool {
        self.address.is_none() && self.phone.is_none()
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/checkout.html")]
pub struct CheckoutTemplate {
    pub pagename: &'static str,
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
    pub form: CheckoutForm,
    pub errors: CheckoutFormErrors,
}

/// Display the checkout page.
#[instrument(skip(state, guest))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    GuestCartCookie(guest): GuestCartCookie,
) -> Result<CheckoutTemplate, AppError> {
    let cart = cart::summarize(state.pool(), user.as_ref(), &guest).await?;

    Ok(CheckoutTemplate {
        pagename: "Checkout",
        current_user: user,
        cart,
        form: CheckoutForm::default(),
        errors: CheckoutFormErrors::default(),
    })
}

/// Handle the checkout form submission.
///
/// Invalid submissions re-render the page with field errors and persist
/// nothing.
#[instrument(skip(state, guest, form))]
pub async fn submit(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    GuestCartCookie(guest): GuestCartCookie,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, AppError> {
    let errors = CheckoutFormErrors::validate(&form);
    if !errors.is_empty() {
        let cart = cart::summarize(state.pool(), user.as_ref(), &guest).await?;
        return Ok(CheckoutTemplate {
            pagename: "Checkout",
            current_user: user,
            cart,
            form,
            errors,
        }
        .into_response());
    }

    let shipping = NewShipping {
        address: form.address.trim().to_owned(),
        phone: form.phone.trim().to_owned(),
    };

    match &user {
        Some(user) => {
            let (order, summary) = cart::open_order_summary(state.pool(), user).await?;
            let transaction_id = Uuid::new_v4().to_string();

            OrderRepository::new(state.pool())
                .finalize(
                    order.id,
                    order.customer_id,
                    &shipping,
                    &transaction_id,
                    summary.bonus_points,
                )
                .await?;

            tracing::info!(
                order_id = %order.id,
                bonus_points = summary.bonus_points,
                "Order finalized at checkout"
            );
        }
        None => {
            // Guest checkout: the cart lives in a cookie, so there is no
            // order row to link and no customer to credit.
            ShippingRepository::new(state.pool())
                .create_unlinked(&shipping)
                .await?;
        }
    }

    Ok(Redirect::to("/payment/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_flags_empty_fields() {
        let errors = CheckoutFormErrors::validate(&CheckoutForm {
            address: "  ".to_string(),
            phone: String::new(),
        });
        assert!(errors.address.is_some());
        assert!(errors.phone.is_some());
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_validate_accepts_filled_form() {
        let errors = CheckoutFormErrors::validate(&CheckoutForm {
            address: "1 Pizza Lane".to_string(),
            phone: "+7 900 000-00-00".to_string(),
        });
        assert!(errors.is_empty());
    }
}
