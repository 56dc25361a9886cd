//! Core types for Silver Pizza.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod kind;
pub mod username;

pub use id::*;
pub use kind::PizzaKind;
pub use username::{Username, UsernameError};
