//! Unified error type for the storefront.
//!
//! Anticipated failures of the cart flow (no active order, a rejected checkout
//! form) are outcomes, not errors. Everything here either becomes a 404/401 or
//! surfaces as a generic server error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by configuration, persistence and the HTTP layer.
#[derive(Debug, Error)]
pub enum Error {
    /// No catalog item carries the requested slug
    #[error("No item with slug '{slug}'")]
    ItemNotFound {
        /// The slug that was looked up
        slug: String,
    },

    /// A catalog page past the last one (or page zero) was requested
    #[error("Catalog page {page} does not exist")]
    PageNotFound {
        /// The requested 1-based page number
        page: u64,
    },

    /// A protected route was called without an identity
    #[error("Authentication required")]
    Unauthenticated,

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The HTTP server failed to bind or serve
    #[error("Server error: {message}")]
    Server {
        /// Human-readable description of the problem
        message: String,
    },

    /// Any `SeaORM` failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    const fn status(&self) -> StatusCode {
        match self {
            Self::ItemNotFound { .. } | Self::PageNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Config { .. } | Self::Server { .. } | Self::Database(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "Responding with server error");
            json!({ "error": "An internal error occurred" })
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Responding with client error");
            json!({ "error": self.to_string() })
        };
        (status, Json(body)).into_response()
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
