//! Request identity forwarded by the credential service.
//!
//! The upstream service authenticates users and passes the verified id and
//! role in headers. This API trusts those headers as-is.

use crate::error::HttpError;
use crate::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use hyper::HeaderMap;
use techforum_core::constants::{USER_ID_HEADER, USER_ROLE_HEADER};
use techforum_core::models::{Actor, Role};

/// Caller of a route that requires a signed-in user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

/// Caller of a public route; `None` when anonymous.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Actor>);

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, AppError> {
    match headers.get(name) {
        Some(value) => value
            .to_str()
            .map(|value| Some(value.trim()))
            .map_err(|_| AppError::BadRequest(format!("Header '{}' is not valid text", name))),
        None => Ok(None),
    }
}

/// Read the actor from identity headers.
///
/// # Returns
/// `Ok(None)` when no user id is present.
///
/// # Errors
/// [`AppError::BadRequest`] when a header is not text or the role is unknown.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Option<Actor>, AppError> {
    let Some(id) = header_str(headers, USER_ID_HEADER)?.filter(|id| !id.is_empty()) else {
        return Ok(None);
    };
    let role = match header_str(headers, USER_ROLE_HEADER)? {
        Some(raw) => raw.parse::<Role>()?,
        None => Role::User,
    };
    Ok(Some(Actor::new(id, role)))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match actor_from_headers(&parts.headers)? {
            Some(actor) => Ok(AuthUser(actor)),
            None => Err(AppError::Unauthorized("Authentication required".to_string()).into()),
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(actor_from_headers(&parts.headers)?))
    }
}
