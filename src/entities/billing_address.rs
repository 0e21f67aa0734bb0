//! Billing address entity - Address details submitted at checkout.
//!
//! A new row is written for every accepted submission; rows are never updated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Billing address database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "billing_addresses")]
pub struct Model {
    /// Unique identifier for the address
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity of the submitting user
    pub user_id: String,
    /// Street and house number
    pub street_address: String,
    /// Apartment, suite or unit, may be empty
    pub apartment_address: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    /// Postal code
    pub zip_code: String,
}

/// Defines relationships between `BillingAddress` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Orders pointing at this address
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
