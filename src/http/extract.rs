//! Caller identity extraction.
//!
//! The application sits behind a proxy that authenticates the session and
//! forwards the caller's id and role as headers. Parsing those headers is the
//! only place the HTTP layer touches identity; everything past this point
//! works with an explicit [`Actor`].

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    errors::Error,
    identity::{Actor, Role},
};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated role.
pub const ROLE_HEADER: &str = "x-user-role";

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::validation("x-user-id", "missing identity header"))?;

        let role: Role = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::validation("x-user-role", "missing identity header"))?
            .trim()
            .parse()?;

        Ok(Self::new(user_id, role))
    }
}
