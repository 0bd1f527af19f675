//! Request body extraction for product creation.
//!
//! Any body that is missing, not JSON, or not a JSON object is rejected as a
//! bad request before the store is touched.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;
use service_core::error::AppError;

use crate::models::Product;

/// A product taken verbatim from the request body.
#[derive(Debug, Clone)]
pub struct ProductPayload(pub Product);

#[async_trait]
impl<S> FromRequest<S> for ProductPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(reason = %rejection.body_text(), "Rejected product payload");
                AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
            })?;

        let product = Product::try_from(value).map_err(|e| {
            tracing::warn!(reason = %e, "Rejected product payload");
            e
        })?;

        Ok(Self(product))
    }
}
