//! Business-logic services for the pizza shop.

pub mod auth;
pub mod cart;

pub use auth::AuthService;
