//! Request extractors whose rejections render through [`ApiError`].
//!
//! axum's stock `Json` and `Path` reject with plain-text bodies. These wrap
//! them so a malformed body or id reads as `BAD_REQUEST` like every other
//! error the gateway emits.

use axum::async_trait;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use helpdesk_core::error::HelpdeskError;

use super::ApiError;

/// JSON request body.
#[derive(Debug)]
pub struct Body<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Body<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                tracing::debug!(error = %e.body_text(), "request body rejected");
                ApiError(HelpdeskError::BadRequest(e.body_text()))
            })?;
        Ok(Body(value))
    }
}

/// Typed path segment.
#[derive(Debug)]
pub struct Id<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Id<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| ApiError(HelpdeskError::BadRequest(e.body_text())))?;
        Ok(Id(value))
    }
}
