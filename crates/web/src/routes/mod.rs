//! HTTP route handlers for the pizza shop.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /assortment/            - Catalog listing
//! POST /assortment/            - Catalog listing with kind filter
//! GET  /topsellers/            - Catalog ordered by rating
//!
//! # Cart & checkout
//! POST /update_item/           - Quantity update (JSON, authenticated)
//! GET  /checkout/              - Cart summary + shipping form
//! POST /checkout/              - Submit shipping, finalize order
//! GET  /payment/               - Payment stub page
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth)
//! GET  /profile/{username}     - Profile with bonus points
//!
//! # Staff (requires staff)
//! GET  /staff/pizzas/new       - Add-to-assortment form
//! POST /staff/pizzas/new       - Create catalog item
//! ```

pub mod api;
pub mod assortment;
pub mod auth;
pub mod checkout;
pub mod home;
pub mod payment;
pub mod profile;
pub mod staff;
pub mod topsellers;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the staff routes router.
pub fn staff_routes() -> Router<AppState> {
    Router::new().route("/pizzas/new", get(staff::new_pizza_page).post(staff::create_pizza))
}

/// Create all routes for the shop.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route(
            "/assortment/",
            get(assortment::index).post(assortment::filter),
        )
        .route("/topsellers/", get(topsellers::index))
        // Cart & checkout
        .route("/update_item/", post(api::cart::update_item))
        .route("/checkout/", get(checkout::show).post(checkout::submit))
        .route("/payment/", get(payment::show))
        // Account
        .route("/profile/{username}", get(profile::details))
        // Auth routes
        .nest("/auth", auth_routes())
        // Staff routes
        .nest("/staff", staff_routes())
}
