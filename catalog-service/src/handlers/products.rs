//! Catalog product handlers.
//!
//! Each handler makes exactly one store call. Store failures are not retried;
//! they surface to the caller as server errors.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::{
    middleware::ProductPayload,
    models::Product,
    services::metrics::{record_product_added, record_products_listed, record_store_error},
    startup::AppState,
};

/// List every product, identity field omitted.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.store.find_all().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list products");
        record_store_error("find_all");
        e
    })?;

    tracing::debug!(count = products.len(), "Listed products");
    record_products_listed(products.len());

    Ok(Json(products))
}

/// Insert the request body as a new product.
pub async fn add_product(
    State(state): State<AppState>,
    ProductPayload(product): ProductPayload,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let field_count = product.fields().len();

    let id = state.store.insert(product).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to add product");
        if matches!(e, AppError::DatabaseError(_)) {
            record_store_error("insert");
        }
        e
    })?;

    tracing::info!(product_id = %id, fields = field_count, "Product added");
    record_product_added();

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added" })),
    ))
}
