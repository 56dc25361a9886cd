//! Silver Pizza Core - Shared types library.
//!
//! This crate provides common types used across all Silver Pizza components:
//! - `web` - Server-rendered pizza shop (catalog, cart, checkout)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, the pizza kind enum, and
//!   the username type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
