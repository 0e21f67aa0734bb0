/// Catalog seed configuration loaded from catalog.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;

/// HTTP server settings from environment variables
pub mod server;
