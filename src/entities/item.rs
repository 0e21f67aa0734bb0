//! Item entity - Represents a product in the storefront catalog.
//!
//! Items are seeded from the catalog file and are never mutated by the cart flow.
//! Each item is addressed publicly by its unique slug.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog category, stored as its short code
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Shirts
    #[sea_orm(string_value = "S")]
    Shirt,
    /// Sport wear
    #[sea_orm(string_value = "SW")]
    SportWear,
    /// Outwear
    #[sea_orm(string_value = "OW")]
    Outwear,
}

/// Badge style shown next to an item
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Primary badge
    #[sea_orm(string_value = "P")]
    Primary,
    /// Secondary badge
    #[sea_orm(string_value = "S")]
    Secondary,
    /// Danger badge
    #[sea_orm(string_value = "D")]
    Danger,
}

/// Item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Red Shirt")
    pub name: String,
    /// Unit price in dollars
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price: Decimal,
    /// URL-safe unique handle (e.g., "red-shirt")
    #[sea_orm(unique)]
    pub slug: String,
    /// Catalog category
    pub category: Category,
    /// Optional badge
    pub label: Option<Label>,
    /// Long-form description
    pub description: String,
    /// Image path or URL
    pub image: String,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One item appears in many order items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
