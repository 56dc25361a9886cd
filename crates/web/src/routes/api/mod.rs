//! JSON API route handlers.

pub mod cart;
