//! Guest-cart cookie extractor.
//!
//! Reads the `cart` cookie maintained by the client-side script and hands the
//! parsed (never failing) result to handlers. The cookie is untrusted input;
//! all validation lives in [`crate::services::cart::GuestCart::parse`].

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};
use tower_sessions::cookie::Cookie;

use crate::services::cart::{GUEST_CART_COOKIE, GuestCart};

/// Extractor for the guest-cart cookie.
///
/// Extraction is infallible: a missing cookie yields [`GuestCart::Missing`],
/// an unreadable one [`GuestCart::Malformed`].
pub struct GuestCartCookie(pub GuestCart);

impl<S> FromRequestParts<S> for GuestCartCookie
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(std::result::Result::ok)
            .find(|cookie| cookie.name() == GUEST_CART_COOKIE)
            .map(|cookie| cookie.value().to_owned());

        let cart = raw.map_or(GuestCart::Missing, |value| GuestCart::parse(&value));

        Ok(Self(cart))
    }
}
