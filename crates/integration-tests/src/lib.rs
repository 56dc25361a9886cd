//! Integration tests for Silver Pizza.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations and start the server
//! cargo run -p silver-pizza-cli -- migrate
//! cargo run -p silver-pizza-web
//!
//! # Run integration tests (ignored by default)
//! cargo test -p silver-pizza-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a running server over HTTP; set `PIZZA_BASE_URL` to
//! point them somewhere other than `http://localhost:8000`.
