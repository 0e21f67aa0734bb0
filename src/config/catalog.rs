//! Catalog configuration loading from catalog.toml
//!
//! Items are seeded externally: the catalog file lists the items the store
//! sells, and startup inserts any whose slug is not in the database yet.

use crate::entities::item::{Category, Label};
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Items to seed
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// Configuration for a single catalog item
#[derive(Debug, Deserialize, Clone)]
pub struct ItemConfig {
    /// Display name
    pub name: String,
    /// Unit price in dollars, exact to the cent as written
    pub price: Decimal,
    /// Unique URL handle
    pub slug: String,
    /// Catalog category (`shirt`, `sport_wear`, `outwear`)
    pub category: Category,
    /// Optional badge (`primary`, `secondary`, `danger`)
    #[serde(default)]
    pub label: Option<Label>,
    /// Long-form description
    #[serde(default)]
    pub description: String,
    /// Image path or URL
    #[serde(default)]
    pub image: String,
}

/// Loads the catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or an enum value is unknown
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })
}
