//! Catalog business logic - Read access to items and startup seeding.
//!
//! The cart flow never mutates items. Listing is paginated ten items per page
//! with 1-based page numbers, and items are addressed by their unique slug.

use crate::{
    config::catalog::ItemConfig,
    entities::{Item, item},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Number of items on one catalog page
pub const PAGE_SIZE: u64 = 10;

/// One page of the catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    /// Items on this page, ordered by id
    pub items: Vec<item::Model>,
    /// 1-based page number
    pub page: u64,
    /// Total number of pages (at least 1)
    pub num_pages: u64,
    /// Whether a later page exists
    pub has_next: bool,
    /// Whether an earlier page exists
    pub has_previous: bool,
}

/// Retrieves one page of the catalog.
///
/// Page 1 always exists, even for an empty catalog.
///
/// # Errors
/// Returns `Error::PageNotFound` for page 0 or a page past the last one, or an
/// error if the database query fails.
#[instrument(skip(db))]
pub async fn list_items(db: &DatabaseConnection, page: u64) -> Result<CatalogPage> {
    let paginator = Item::find()
        .order_by_asc(item::Column::Id)
        .paginate(db, PAGE_SIZE);
    let num_pages = paginator.num_pages().await?.max(1);

    if page == 0 || page > num_pages {
        return Err(Error::PageNotFound { page });
    }

    let items = paginator.fetch_page(page - 1).await?;
    debug!("Fetched {} items for catalog page {page}/{num_pages}", items.len());

    Ok(CatalogPage {
        items,
        page,
        num_pages,
        has_next: page < num_pages,
        has_previous: page > 1,
    })
}

/// Finds an item by slug, returning None if no item carries it.
pub async fn find_item_by_slug<C>(db: &C, slug: &str) -> Result<Option<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find()
        .filter(item::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an item by slug.
///
/// # Errors
/// Returns `Error::ItemNotFound` if no item carries the slug, or an error if the
/// database query fails.
pub async fn get_item_by_slug<C>(db: &C, slug: &str) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    find_item_by_slug(db, slug)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            slug: slug.to_string(),
        })
}

/// Inserts a new catalog item, validating the name, slug and price.
///
/// # Errors
/// Returns an error if:
/// - The name or slug is empty or whitespace-only
/// - The price is negative
/// - The slug is already taken or the insert fails
pub async fn create_item(db: &DatabaseConnection, config: &ItemConfig) -> Result<item::Model> {
    if config.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Item name cannot be empty".to_string(),
        });
    }

    let slug = config.slug.trim();
    if slug.is_empty() {
        return Err(Error::Config {
            message: format!("Item '{}' has an empty slug", config.name),
        });
    }

    // Slugs end up in redirect locations
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::Config {
            message: format!("Item '{}' has invalid slug '{slug}'", config.name),
        });
    }

    if config.price < Decimal::ZERO {
        return Err(Error::Config {
            message: format!("Item '{}' has invalid price {}", config.name, config.price),
        });
    }

    let item = item::ActiveModel {
        name: Set(config.name.trim().to_string()),
        price: Set(config.price),
        slug: Set(slug.to_string()),
        category: Set(config.category),
        label: Set(config.label),
        description: Set(config.description.clone()),
        image: Set(config.image.clone()),
        ..Default::default()
    };
    item.insert(db).await.map_err(Into::into)
}

/// Inserts every configured item whose slug is not in the database yet.
///
/// Existing items are left untouched. Returns the number of items inserted.
#[instrument(skip(db, items), fields(configured = items.len()))]
pub async fn seed_catalog(db: &DatabaseConnection, items: &[ItemConfig]) -> Result<usize> {
    let mut inserted = 0;
    for config in items {
        if find_item_by_slug(db, config.slug.trim()).await?.is_some() {
            debug!(slug = %config.slug, "Item already exists. Skipping.");
            continue;
        }
        create_item(db, config).await?;
        inserted += 1;
    }
    info!("Seeded {inserted} new catalog items.");
    Ok(inserted)
}
