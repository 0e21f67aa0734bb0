//! Database configuration module for the storefront.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the database schema always matches the Rust structs without hand-written SQL.

use crate::entities::{
    BillingAddress, Item, Order, OrderItem, OrderItemColumn, OrderLine, OrderLineColumn,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
    sea_query::{Index, IndexCreateStatement},
};
use std::path::Path;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/storefront.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    tracing::debug!(%database_url, "Connecting to database");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the parent directory of a file-backed `SQLite` URL.
///
/// In-memory and non-`SQLite` URLs are left alone.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_sqlite_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
        _ => {}
    }
    Ok(())
}

/// Creates all tables and composite unique indexes that do not exist yet.
///
/// Parents are created before the tables holding foreign keys to them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Item).await?;
    create_table(db, BillingAddress).await?;
    create_table(db, Order).await?;
    create_table(db, OrderItem).await?;
    create_table(db, OrderLine).await?;

    // One order item per item, user and ordered state
    create_index(
        db,
        Index::create()
            .name("idx_order_items_item_user_ordered")
            .table(OrderItem)
            .col(OrderItemColumn::ItemId)
            .col(OrderItemColumn::UserId)
            .col(OrderItemColumn::Ordered)
            .unique(),
    )
    .await?;
    // An order item is attached to an order at most once
    create_index(
        db,
        Index::create()
            .name("idx_order_lines_order_order_item")
            .table(OrderLine)
            .col(OrderLineColumn::OrderId)
            .col(OrderLineColumn::OrderItemId)
            .unique(),
    )
    .await?;
    Ok(())
}

async fn create_index(db: &DatabaseConnection, statement: &mut IndexCreateStatement) -> Result<()> {
    let builder = db.get_database_backend();
    statement.if_not_exists();
    db.execute(builder.build(&*statement)).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}
