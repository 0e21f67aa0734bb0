//! Order entity - A user's cart and, once placed, their order.
//!
//! A user has at most one order with `ordered = false` (the active cart). The
//! `active_owner` column carries the owner's identity while the order is active
//! and is UNIQUE, so the database rejects a second active cart for the same user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity of the owning user
    pub user_id: String,
    /// When the cart was started
    pub start_date: DateTimeUtc,
    /// When the order was dated
    pub ordered_date: Option<DateTimeUtc>,
    /// Whether the order has been placed
    pub ordered: bool,
    /// Billing address submitted at checkout
    pub billing_address_id: Option<i64>,
    /// Owner identity while this order is the active cart, NULL once placed
    #[sea_orm(unique)]
    pub active_owner: Option<String>,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An order may point at one billing address
    #[sea_orm(
        belongs_to = "super::billing_address::Entity",
        from = "Column::BillingAddressId",
        to = "super::billing_address::Column::Id"
    )]
    BillingAddress,
    /// One order has many order lines
    #[sea_orm(has_many = "super::order_line::Entity")]
    OrderLines,
}

impl Related<super::billing_address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillingAddress.def()
    }
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_line::Relation::OrderItem.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_line::Relation::Order.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
