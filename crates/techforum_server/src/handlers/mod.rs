//! HTTP request handlers.

/// Answer endpoints.
pub mod answer;
/// Category endpoints.
pub mod category;
/// Liveness endpoint.
pub mod health;
/// Question endpoints.
pub mod question;
/// Per-user listings.
pub mod user;

use crate::{error::HttpError, AppError};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use techforum_core::pagination::{Page, Paginated};

/// JSON request body whose rejection is a 400 in the API error envelope.
pub struct ApiJson<T>(pub T);

fn invalid_body(rejection: JsonRejection) -> HttpError {
    AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text())).into()
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(invalid_body)?;
        Ok(ApiJson(value))
    }
}

/// Response envelope shared by every successful endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Page>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            pagination: None,
        }
    }

    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            message: Some(message),
            ..Self::data(data)
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn page(page: Paginated<T>) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(page.data),
            pagination: Some(page.pagination),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &'static str) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: None,
            pagination: None,
        }
    }
}

/// Body of the vote endpoints. Kept as a string so an unknown direction gets
/// the "Invalid vote type" message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub vote_type: String,
}
