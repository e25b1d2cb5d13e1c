//! Request extractors that reject with [`ApiError`]
//!
//! Axum's stock `Json` and `Path` rejections render as plain text. These
//! wrappers route every parsing and validation failure through the JSON
//! error body instead.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use crate::error::ApiError;

/// JSON body that has passed `serde` parsing and then [`Validate`]
///
/// Unknown fields are ignored; missing `Content-Type: application/json`,
/// malformed JSON and type mismatches all become a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Numeric `:id` path segment
#[derive(Debug, Clone, Copy, Deserialize, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Id(pub i64);
