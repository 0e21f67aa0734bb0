//! Catalog listing and product detail views.

use crate::{
    core::catalog::{self, CatalogPage},
    entities::item,
    errors::Result,
    web::{AppState, View, flash},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::instrument;

/// Query string of the catalog listing
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
}

/// `GET /` - one page of the catalog
#[instrument(name = "handler::home", skip(state, cookies))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    cookies: Cookies,
) -> Result<Json<View<CatalogPage>>> {
    let page = catalog::list_items(&state.db, query.page.unwrap_or(1)).await?;
    Ok(View::render(page, flash::take(&cookies)))
}

/// `GET /product/:slug` - a single item
#[instrument(name = "handler::product_detail", skip(state, cookies))]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    cookies: Cookies,
) -> Result<Json<View<item::Model>>> {
    let item = catalog::get_item_by_slug(&state.db, &slug).await?;
    Ok(View::render(item, flash::take(&cookies)))
}
