//! Web layer - axum routes, request identity and flash messages
//!
//! This module exposes the storefront over HTTP. Handlers are thin: they pull
//! the caller's identity out of the request, call into [`crate::core`], and turn
//! outcomes into either a JSON view or a redirect carrying a flash message.

/// Cookie-backed one-shot messages
pub mod flash;
/// Route handlers
pub mod handlers;
/// The authenticated-user extractor
pub mod identity;

use axum::{Json, Router, routing::get};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use self::flash::FlashMessage;

pub(crate) const HOME_PATH: &str = "/";
pub(crate) const ORDER_SUMMARY_PATH: &str = "/order-summary";
pub(crate) const CHECKOUT_PATH: &str = "/checkout";

pub(crate) fn product_path(slug: &str) -> String {
    format!("/product/{slug}")
}

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub db: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// A JSON view: the page data plus the flash messages drained for it
#[derive(Debug, Serialize)]
pub struct View<T> {
    /// Page payload
    #[serde(flatten)]
    pub data: T,
    /// Messages left by earlier requests
    pub messages: Vec<FlashMessage>,
}

impl<T: Serialize> View<T> {
    /// Wraps page data and messages into a JSON response body.
    pub const fn render(data: T, messages: Vec<FlashMessage>) -> Json<Self> {
        Json(Self { data, messages })
    }
}

/// Builds the storefront router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::catalog::home))
        .route("/health", get(handlers::health))
        .route("/product/:slug", get(handlers::catalog::product_detail))
        .route("/order-summary", get(handlers::cart::order_summary))
        .route(
            "/checkout",
            get(handlers::checkout::checkout_page).post(handlers::checkout::submit_checkout),
        )
        .route("/add-to-cart/:slug", get(handlers::cart::add_to_cart))
        .route(
            "/remove-from-cart/:slug",
            get(handlers::cart::remove_from_cart),
        )
        .route("/remove-item/:slug", get(handlers::cart::remove_single_item))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
