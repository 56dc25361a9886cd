//! Profile page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use silver_pizza_core::Username;

use crate::db::customers::CustomerRepository;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::services::cart::{self, CartSummary, GuestCart};
use crate::state::AppState;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/profile.html")]
pub struct ProfileTemplate {
    pub pagename: &'static str,
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
    pub profile_username: String,
    pub bonus_points: i64,
}

/// Display a profile with accumulated bonus points.
///
/// Requires login; unknown usernames are a 404.
#[instrument(skip(state))]
pub async fn details(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(username): Path<String>,
) -> Result<ProfileTemplate> {
    let username = Username::parse(&username)
        .map_err(|_| AppError::NotFound(format!("no such user: {username}")))?;

    let profile_user = UserRepository::new(state.pool())
        .get_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no such user: {username}")))?;

    // Bonus points belong to the signed-in customer, like the original page.
    let customer = CustomerRepository::new(state.pool())
        .get_or_create(user.id)
        .await?;

    let cart = cart::summarize(state.pool(), Some(&user), &GuestCart::Missing).await?;

    Ok(ProfileTemplate {
        pagename: "Profile",
        current_user: Some(user),
        cart,
        profile_username: profile_user.username.into_inner(),
        bonus_points: customer.bonus_points,
    })
}
