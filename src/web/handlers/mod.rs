//! HTTP handlers, grouped by the part of the storefront they serve.

/// Cart mutation routes and the order summary
pub mod cart;
/// Catalog listing and product detail
pub mod catalog;
/// Billing address form and submission
pub mod checkout;

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
