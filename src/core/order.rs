//! Order business logic - Active cart lookup, creation and the order summary.
//!
//! The active order of a user is the order with `ordered = false`. Creation goes
//! through the UNIQUE `active_owner` column, so a user can never end up with two
//! active carts even when two requests race to create one.

use crate::{
    entities::{Item, Order, OrderItem, OrderLine, item, order, order_item, order_line},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, SqlErr, prelude::*};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Returns the user's active order (`ordered = false`), if any.
pub async fn get_active_order<C>(db: &C, user_id: &str) -> Result<Option<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find()
        .filter(order::Column::UserId.eq(user_id))
        .filter(order::Column::Ordered.eq(false))
        .order_by_asc(order::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new active order for the user, dated now.
///
/// If another request created the user's active order first, the UNIQUE
/// constraint rejects this insert and the existing order is returned instead.
#[instrument(skip(db))]
pub async fn create_active_order<C>(db: &C, user_id: &str) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now();
    let order = order::ActiveModel {
        user_id: Set(user_id.to_string()),
        start_date: Set(now),
        ordered_date: Set(Some(now)),
        ordered: Set(false),
        billing_address_id: Set(None),
        active_owner: Set(Some(user_id.to_string())),
        ..Default::default()
    };

    match order.insert(db).await {
        Ok(created) => {
            info!(order_id = created.id, "Created active order for user {user_id}");
            Ok(created)
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            warn!("Active order for user {user_id} was created concurrently, reusing it");
            get_active_order(db, user_id)
                .await?
                .ok_or(Error::Database(e))
        }
        Err(e) => Err(e.into()),
    }
}

/// Finds the order item for `item_id` that is attached to `order`.
///
/// This is the "does the cart already contain this item" check.
pub async fn find_attached_order_item<C>(
    db: &C,
    order: &order::Model,
    item_id: i64,
) -> Result<Option<order_item::Model>>
where
    C: ConnectionTrait,
{
    order
        .find_related(OrderItem)
        .filter(order_item::Column::ItemId.eq(item_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Links an order item to an order. Linking an already-linked pair is a no-op.
pub async fn attach_order_item<C>(db: &C, order_id: i64, order_item_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let existing = OrderLine::find()
        .filter(order_line::Column::OrderId.eq(order_id))
        .filter(order_line::Column::OrderItemId.eq(order_item_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let inserted = order_line::ActiveModel {
        order_id: Set(order_id),
        order_item_id: Set(order_item_id),
        ..Default::default()
    }
    .insert(db)
    .await;

    match inserted {
        Ok(_) => {
            debug!(order_id, order_item_id, "Attached order item");
            Ok(())
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Unlinks an order item from an order. The order item row itself is kept.
pub async fn detach_order_item<C>(db: &C, order_id: i64, order_item_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = OrderLine::delete_many()
        .filter(order_line::Column::OrderId.eq(order_id))
        .filter(order_line::Column::OrderItemId.eq(order_item_id))
        .exec(db)
        .await?;
    debug!(
        order_id,
        order_item_id,
        rows = result.rows_affected,
        "Detached order item"
    );
    Ok(())
}

/// One line of the order summary
#[derive(Debug, Clone, Serialize)]
pub struct SummaryLine {
    /// The order item row
    pub order_item: order_item::Model,
    /// The catalog item it refers to
    pub item: item::Model,
    /// `item.price * quantity`
    pub line_total: Decimal,
}

/// The active order with its attached lines and total
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    /// The active order
    pub order: order::Model,
    /// Attached lines, in the order they were created
    pub lines: Vec<SummaryLine>,
    /// Sum of all line totals
    pub total: Decimal,
}

/// Builds the summary of the user's active order, or None if there is no active order.
#[instrument(skip(db))]
pub async fn order_summary(db: &DatabaseConnection, user_id: &str) -> Result<Option<OrderSummary>> {
    let Some(order) = get_active_order(db, user_id).await? else {
        return Ok(None);
    };

    let rows = order
        .find_related(OrderItem)
        .find_also_related(Item)
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await?;

    let mut lines = Vec::with_capacity(rows.len());
    for (order_item, item) in rows {
        let item = item.ok_or_else(|| {
            Error::Database(DbErr::RecordNotFound(format!(
                "item {} of order item {}",
                order_item.item_id, order_item.id
            )))
        })?;
        let line_total = item.price * Decimal::from(order_item.quantity);
        lines.push(SummaryLine {
            order_item,
            item,
            line_total,
        });
    }
    let total: Decimal = lines.iter().map(|line| line.line_total).sum();

    debug!(order_id = order.id, lines = lines.len(), %total, "Built order summary");
    Ok(Some(OrderSummary {
        order,
        lines,
        total,
    }))
}
