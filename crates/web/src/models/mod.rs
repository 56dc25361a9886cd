//! Domain models for the pizza shop.
//!
//! These types represent validated domain objects separate from database row
//! types; repositories convert rows into them at the query boundary.

pub mod customer;
pub mod order;
pub mod pizza;
pub mod session;
pub mod user;

pub use customer::Customer;
pub use order::{Order, OrderLine};
pub use pizza::{NewPizza, Pizza};
pub use session::{CurrentUser, session_keys};
pub use user::User;
