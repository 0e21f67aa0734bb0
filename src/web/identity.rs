//! Request identity.
//!
//! Authentication happens upstream: the proxy in front of the storefront puts
//! the signed-in user's id in the `x-user-id` header. Handlers that act for a
//! user take a [`CurrentUser`] argument and pass its id down explicitly.

use crate::errors::Error;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Opaque user identifier from the identity provider
    pub user_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
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
            .filter(|value| !value.is_empty());

        user_id.map_or_else(
            || {
                warn!(path = %parts.uri.path(), "Missing or invalid {USER_ID_HEADER} header");
                Err(Error::Unauthenticated)
            },
            |user_id| {
                Ok(Self {
                    user_id: user_id.to_string(),
                })
            },
        )
    }
}
