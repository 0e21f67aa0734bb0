//! Order item entity - One catalog item and its quantity within a user's cart.
//!
//! Order items are attached to an order through the `order_lines` link table.
//! Detaching an item from an order removes the link, never the order item row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the order item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the catalog item
    pub item_id: i64,
    /// Identity of the owning user
    pub user_id: String,
    /// Whether the order item belongs to a placed order
    pub ordered: bool,
    /// Number of units, never below 1
    pub quantity: i32,
}

/// Defines relationships between `OrderItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order item refers to one catalog item
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
    /// An order item is linked to orders through order lines
    #[sea_orm(has_many = "super::order_line::Entity")]
    OrderLines,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_line::Relation::Order.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_line::Relation::OrderItem.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
