//! Authentication route handlers.
//!
//! Handles registration, login, and logout against the local account store.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{GuestCartCookie, OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::services::auth::AuthError;
use crate::services::cart::{self, CartSummary};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

/// Query parameters for success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub pagename: &'static str,
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub pagename: &'static str,
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
    pub form: RegisterForm,
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(state, guest))]
pub async fn login_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    GuestCartCookie(guest): GuestCartCookie,
    Query(query): Query<MessageQuery>,
) -> Result<LoginTemplate, AppError> {
    let cart = cart::summarize(state.pool(), user.as_ref(), &guest).await?;

    Ok(LoginTemplate {
        pagename: "Log in",
        current_user: user,
        cart,
        error: None,
        success: query.success,
    })
}

/// Handle login form submission.
#[instrument(skip(state, session, guest, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    GuestCartCookie(guest): GuestCartCookie,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let service = AuthService::new(state.pool());

    match service.login(&form.username, &form.password).await {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                username: user.username,
                is_staff: user.is_staff,
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {e}");
                return Err(AppError::Internal("session store failed".to_string()));
            }

            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::Repository(e)) => Err(AppError::Database(e)),
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            let cart = cart::summarize(state.pool(), None, &guest).await?;
            Ok(LoginTemplate {
                pagename: "Log in",
                current_user: None,
                cart,
                error: Some("Invalid username or password".to_string()),
                success: None,
            }
            .into_response())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
#[instrument(skip(state, guest))]
pub async fn register_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    GuestCartCookie(guest): GuestCartCookie,
) -> Result<RegisterTemplate, AppError> {
    let cart = cart::summarize(state.pool(), user.as_ref(), &guest).await?;

    Ok(RegisterTemplate {
        pagename: "Register",
        current_user: user,
        cart,
        form: RegisterForm::default(),
        error: None,
    })
}

/// Handle registration form submission.
///
/// Invalid submissions re-render the form with an error and persist nothing.
#[instrument(skip(state, guest, form))]
pub async fn register(
    State(state): State<AppState>,
    GuestCartCookie(guest): GuestCartCookie,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if form.password1 != form.password2 {
        return render_register_error(&state, &guest, form, "Passwords do not match").await;
    }

    let service = AuthService::new(state.pool());
    match service.register(&form.username, &form.password1).await {
        Ok(user) => {
            tracing::info!(username = %user.username, "Account registered");
            Ok(Redirect::to("/auth/login?success=registered").into_response())
        }
        Err(AuthError::UserAlreadyExists) => {
            render_register_error(&state, &guest, form, "This username is already taken").await
        }
        Err(AuthError::InvalidUsername(e)) => {
            let message = e.to_string();
            render_register_error(&state, &guest, form, &message).await
        }
        Err(AuthError::WeakPassword(message)) => {
            render_register_error(&state, &guest, form, &message).await
        }
        Err(AuthError::Repository(e)) => Err(AppError::Database(e)),
        Err(e) => Err(AppError::Auth(e)),
    }
}

async fn render_register_error(
    state: &AppState,
    guest: &cart::GuestCart,
    mut form: RegisterForm,
    message: &str,
) -> Result<Response, AppError> {
    // Never echo passwords back into the page.
    form.password1 = String::new();
    form.password2 = String::new();

    let cart = cart::summarize(state.pool(), None, guest).await?;
    Ok(RegisterTemplate {
        pagename: "Register",
        current_user: None,
        cart,
        form,
        error: Some(message.to_string()),
    }
    .into_response())
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    Redirect::to("/").into_response()
}
