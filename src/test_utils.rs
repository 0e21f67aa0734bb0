//! Shared test utilities for the storefront.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::catalog::ItemConfig,
    core::catalog,
    entities::{
        self,
        item::{Category, Label},
        order_item,
    },
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds an item configuration with the given name, slug and price.
///
/// # Defaults
/// * `category`: shirt
/// * `label`: primary
pub fn item_config(name: &str, slug: &str, price: Decimal) -> ItemConfig {
    ItemConfig {
        name: name.to_string(),
        price,
        slug: slug.to_string(),
        category: Category::Shirt,
        label: Some(Label::Primary),
        description: format!("Description of {name}"),
        image: format!("img/{slug}.jpg"),
    }
}

/// Creates a test item priced at 10.0, named after its slug.
pub async fn create_test_item(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<entities::item::Model> {
    create_custom_item(db, slug, Decimal::TEN).await
}

/// Creates a test item with a custom price.
pub async fn create_custom_item(
    db: &DatabaseConnection,
    slug: &str,
    price: Decimal,
) -> Result<entities::item::Model> {
    catalog::create_item(db, &item_config(slug, slug, price)).await
}

/// Inserts an unordered order item directly, without attaching it to any order.
pub async fn insert_order_item(
    db: &DatabaseConnection,
    item_id: i64,
    user_id: &str,
    quantity: i32,
) -> Result<entities::order_item::Model> {
    order_item::ActiveModel {
        item_id: Set(item_id),
        user_id: Set(user_id.to_string()),
        ordered: Set(false),
        quantity: Set(quantity),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Sets up a database holding a single item with slug `red-shirt`.
/// Returns (db, item) for cart scenarios.
pub async fn setup_with_item() -> Result<(DatabaseConnection, entities::item::Model)> {
    let db = setup_test_db().await?;
    let item = create_test_item(&db, "red-shirt").await?;
    Ok((db, item))
}
