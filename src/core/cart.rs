//! Cart business logic - Adding, removing and decrementing cart lines.
//!
//! Each operation runs inside one database transaction. The caller's identity is
//! passed in explicitly as `user_id`; nothing here knows about HTTP.
//!
//! A cart line is an order item attached to the user's active order. Removing a
//! line detaches it and keeps the order item row, so adding the same item again
//! re-attaches the retained row with its retained quantity.

use crate::{
    core::{catalog, order},
    entities::{OrderItem, order_item},
    errors::{Error, Result},
};
use sea_orm::{Set, SqlErr, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// What a cart operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// The item was attached to the cart
    Added,
    /// An existing line's quantity went up
    QuantityUpdated,
    /// One unit was taken off a line, detaching it when it was the last
    QuantityReduced,
    /// The line was detached from the cart
    Removed,
    /// The cart exists but does not contain the item
    NotInCart,
    /// The user has no active order
    NoActiveOrder,
}

/// Finds the user's unordered order item for `item_id`, creating one with quantity 1 if absent.
pub async fn find_or_create_order_item<C>(
    db: &C,
    item_id: i64,
    user_id: &str,
) -> Result<order_item::Model>
where
    C: ConnectionTrait,
{
    if let Some(found) = find_unordered_order_item(db, item_id, user_id).await? {
        return Ok(found);
    }

    let created = order_item::ActiveModel {
        item_id: Set(item_id),
        user_id: Set(user_id.to_string()),
        ordered: Set(false),
        quantity: Set(1),
        ..Default::default()
    }
    .insert(db)
    .await;

    match created {
        Ok(created) => {
            debug!(order_item_id = created.id, item_id, "Created order item");
            Ok(created)
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            debug!(item_id, "Order item was created concurrently, reusing it");
            find_unordered_order_item(db, item_id, user_id)
                .await?
                .ok_or(Error::Database(e))
        }
        Err(e) => Err(e.into()),
    }
}

async fn find_unordered_order_item<C>(
    db: &C,
    item_id: i64,
    user_id: &str,
) -> Result<Option<order_item::Model>>
where
    C: ConnectionTrait,
{
    OrderItem::find()
        .filter(order_item::Column::ItemId.eq(item_id))
        .filter(order_item::Column::UserId.eq(user_id))
        .filter(order_item::Column::Ordered.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn set_quantity<C>(
    db: &C,
    order_item: order_item::Model,
    quantity: i32,
) -> Result<order_item::Model>
where
    C: ConnectionTrait,
{
    let mut active: order_item::ActiveModel = order_item.into();
    active.quantity = Set(quantity);
    active.update(db).await.map_err(Into::into)
}

/// Adds one unit of the item with `slug` to the user's cart.
///
/// Creates the active order on first use. If the cart already holds the item its
/// quantity goes up by one, otherwise the item's line is attached.
///
/// # Errors
/// Returns `Error::ItemNotFound` if no item carries the slug, or an error if a
/// database operation fails.
#[instrument(skip(db))]
pub async fn add_to_cart(db: &DatabaseConnection, user_id: &str, slug: &str) -> Result<CartOutcome> {
    let txn = db.begin().await?;

    let item = catalog::get_item_by_slug(&txn, slug).await?;
    let order_item = find_or_create_order_item(&txn, item.id, user_id).await?;

    let outcome = match order::get_active_order(&txn, user_id).await? {
        Some(active) => {
            if order::find_attached_order_item(&txn, &active, item.id)
                .await?
                .is_some()
            {
                let quantity = order_item.quantity + 1;
                set_quantity(&txn, order_item, quantity).await?;
                info!("Quantity of '{slug}' in cart of {user_id} is now {quantity}");
                CartOutcome::QuantityUpdated
            } else {
                order::attach_order_item(&txn, active.id, order_item.id).await?;
                info!("Added '{slug}' to cart of {user_id}");
                CartOutcome::Added
            }
        }
        None => {
            let created = order::create_active_order(&txn, user_id).await?;
            order::attach_order_item(&txn, created.id, order_item.id).await?;
            info!("Added '{slug}' to new cart of {user_id}");
            CartOutcome::Added
        }
    };

    txn.commit().await?;
    Ok(outcome)
}

/// Detaches the item with `slug` from the user's cart, whatever its quantity.
///
/// # Errors
/// Returns `Error::ItemNotFound` if no item carries the slug, or an error if a
/// database operation fails.
#[instrument(skip(db))]
pub async fn remove_from_cart(
    db: &DatabaseConnection,
    user_id: &str,
    slug: &str,
) -> Result<CartOutcome> {
    let txn = db.begin().await?;

    let item = catalog::get_item_by_slug(&txn, slug).await?;
    let Some(active) = order::get_active_order(&txn, user_id).await? else {
        debug!("No active order for {user_id}");
        return Ok(CartOutcome::NoActiveOrder);
    };
    let Some(line) = order::find_attached_order_item(&txn, &active, item.id).await? else {
        debug!("'{slug}' is not in cart of {user_id}");
        return Ok(CartOutcome::NotInCart);
    };

    order::detach_order_item(&txn, active.id, line.id).await?;
    txn.commit().await?;

    info!("Removed '{slug}' from cart of {user_id}");
    Ok(CartOutcome::Removed)
}

/// Takes one unit of the item with `slug` out of the user's cart.
///
/// A line holding a single unit is detached instead of dropping to zero.
///
/// # Errors
/// Returns `Error::ItemNotFound` if no item carries the slug, or an error if a
/// database operation fails.
#[instrument(skip(db))]
pub async fn remove_single_item_from_cart(
    db: &DatabaseConnection,
    user_id: &str,
    slug: &str,
) -> Result<CartOutcome> {
    let txn = db.begin().await?;

    let item = catalog::get_item_by_slug(&txn, slug).await?;
    let Some(active) = order::get_active_order(&txn, user_id).await? else {
        debug!("No active order for {user_id}");
        return Ok(CartOutcome::NoActiveOrder);
    };
    let Some(line) = order::find_attached_order_item(&txn, &active, item.id).await? else {
        debug!("'{slug}' is not in cart of {user_id}");
        return Ok(CartOutcome::NotInCart);
    };

    if line.quantity > 1 {
        let quantity = line.quantity - 1;
        set_quantity(&txn, line, quantity).await?;
        info!("Quantity of '{slug}' in cart of {user_id} is now {quantity}");
    } else {
        order::detach_order_item(&txn, active.id, line.id).await?;
        info!("Removed last '{slug}' from cart of {user_id}");
    }

    txn.commit().await?;
    Ok(CartOutcome::QuantityReduced)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        entities::{Order, OrderLine},
        errors::Error,
        test_utils::*,
    };
    use sea_orm::PaginatorTrait;

    async fn cart_quantities(db: &DatabaseConnection, user_id: &str) -> Result<Vec<(String, i32)>> {
        let summary = order::order_summary(db, user_id).await?;
        Ok(summary
            .map(|s| {
                s.lines
                    .into_iter()
                    .map(|line| (line.item.slug, line.order_item.quantity))
                    .collect()
            })
            .unwrap_or_default())
    }

    #[tokio::test]
    async fn test_add_to_empty_cart_creates_order_and_line() -> Result<()> {
        let (db, item) = setup_with_item().await?;

        let outcome = add_to_cart(&db, "alice", "red-shirt").await?;
        assert_eq!(outcome, CartOutcome::Added);

        let orders = Order::find().all(&db).await?;
        assert_eq!(orders.len(), 1);
        assert!(!orders[0].ordered);
        assert_eq!(orders[0].user_id, "alice");

        let order_items = OrderItem::find().all(&db).await?;
        assert_eq!(order_items.len(), 1);
        assert_eq!(order_items[0].item_id, item.id);
        assert_eq!(order_items[0].quantity, 1);
        assert!(!order_items[0].ordered);

        assert_eq!(cart_quantities(&db, "alice").await?, vec![("red-shirt".to_string(), 1)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_same_item_twice_increments_quantity() -> Result<()> {
        let (db, _item) = setup_with_item().await?;

        add_to_cart(&db, "alice", "red-shirt").await?;
        let outcome = add_to_cart(&db, "alice", "red-shirt").await?;
        assert_eq!(outcome, CartOutcome::QuantityUpdated);

        assert_eq!(Order::find().count(&db).await?, 1);
        assert_eq!(OrderItem::find().count(&db).await?, 1);
        assert_eq!(cart_quantities(&db, "alice").await?, vec![("red-shirt".to_string(), 2)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_second_item_to_existing_cart() -> Result<()> {
        let (db, _item) = setup_with_item().await?;
        create_test_item(&db, "rain-jacket").await?;

        add_to_cart(&db, "alice", "red-shirt").await?;
        let outcome = add_to_cart(&db, "alice", "rain-jacket").await?;
        assert_eq!(outcome, CartOutcome::Added);

        assert_eq!(Order::find().count(&db).await?, 1);
        assert_eq!(
            cart_quantities(&db, "alice").await?,
            vec![("red-shirt".to_string(), 1), ("rain-jacket".to_string(), 1)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_carts_are_per_user() -> Result<()> {
        let (db, _item) = setup_with_item().await?;

        add_to_cart(&db, "alice", "red-shirt").await?;
        add_to_cart(&db, "bob", "red-shirt").await?;

        assert_eq!(Order::find().count(&db).await?, 2);
        assert_eq!(cart_quantities(&db, "alice").await?, vec![("red-shirt".to_string(), 1)]);
        assert_eq!(cart_quantities(&db, "bob").await?, vec![("red-shirt".to_string(), 1)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_to_cart(&db, "alice", "missing").await;
        assert!(matches!(result, Err(Error::ItemNotFound { .. })));
        let result = remove_from_cart(&db, "alice", "missing").await;
        assert!(matches!(result, Err(Error::ItemNotFound { .. })));
        let result = remove_single_item_from_cart(&db, "alice", "missing").await;
        assert!(matches!(result, Err(Error::ItemNotFound { .. })));

        // Nothing was created by the failed add
        assert_eq!(Order::find().count(&db).await?, 0);
        assert_eq!(OrderItem::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_without_active_order() -> Result<()> {
        let (db, _item) = setup_with_item().await?;

        assert_eq!(
            remove_from_cart(&db, "alice", "red-shirt").await?,
            CartOutcome::NoActiveOrder
        );
        assert_eq!(
            remove_single_item_from_cart(&db, "alice", "red-shirt").await?,
            CartOutcome::NoActiveOrder
        );
        assert_eq!(Order::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_item_not_in_cart() -> Result<()> {
        let (db, _item) = setup_with_item().await?;
        create_test_item(&db, "rain-jacket").await?;
        add_to_cart(&db, "alice", "red-shirt").await?;

        assert_eq!(
            remove_from_cart(&db, "alice", "rain-jacket").await?,
            CartOutcome::NotInCart
        );
        assert_eq!(
            remove_single_item_from_cart(&db, "alice", "rain-jacket").await?,
            CartOutcome::NotInCart
        );
        assert_eq!(cart_quantities(&db, "alice").await?, vec![("red-shirt".to_string(), 1)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_detaches_without_deleting() -> Result<()> {
        let (db, _item) = setup_with_item().await?;
        add_to_cart(&db, "alice", "red-shirt").await?;

        let outcome = remove_from_cart(&db, "alice", "red-shirt").await?;
        assert_eq!(outcome, CartOutcome::Removed);

        assert!(cart_quantities(&db, "alice").await?.is_empty());
        assert_eq!(OrderLine::find().count(&db).await?, 0);
        assert_eq!(OrderItem::find().count(&db).await?, 1);
        // The (now empty) cart itself stays active
        assert!(order::get_active_order(&db, "alice").await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_whole_line_regardless_of_quantity() -> Result<()> {
        let (db, _item) = setup_with_item().await?;
        for _ in 0..3 {
            add_to_cart(&db, "alice", "red-shirt").await?;
        }

        assert_eq!(
            remove_from_cart(&db, "alice", "red-shirt").await?,
            CartOutcome::Removed
        );
        assert!(cart_quantities(&db, "alice").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_from_three_keeps_line() -> Result<()> {
        let (db, _item) = setup_with_item().await?;
        for _ in 0..3 {
            add_to_cart(&db, "alice", "red-shirt").await?;
        }

        let outcome = remove_single_item_from_cart(&db, "alice", "red-shirt").await?;
        assert_eq!(outcome, CartOutcome::QuantityReduced);
        assert_eq!(cart_quantities(&db, "alice").await?, vec![("red-shirt".to_string(), 2)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_last_unit_detaches() -> Result<()> {
        let (db, _item) = setup_with_item().await?;
        add_to_cart(&db, "alice", "red-shirt").await?;

        let outcome = remove_single_item_from_cart(&db, "alice", "red-shirt").await?;
        assert_eq!(outcome, CartOutcome::QuantityReduced);
        assert!(cart_quantities(&db, "alice").await?.is_empty());

        let order_items = OrderItem::find().all(&db).await?;
        assert_eq!(order_items.len(), 1);
        assert_eq!(order_items[0].quantity, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_re_add_after_removal_reuses_retained_line() -> Result<()> {
        let (db, _item) = setup_with_item().await?;
        add_to_cart(&db, "alice", "red-shirt").await?;
        add_to_cart(&db, "alice", "red-shirt").await?;
        remove_from_cart(&db, "alice", "red-shirt").await?;

        let outcome = add_to_cart(&db, "alice", "red-shirt").await?;
        assert_eq!(outcome, CartOutcome::Added);

        assert_eq!(OrderItem::find().count(&db).await?, 1);
        assert_eq!(cart_quantities(&db, "alice").await?, vec![("red-shirt".to_string(), 2)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_or_create_order_item_is_idempotent() -> Result<()> {
        let (db, item) = setup_with_item().await?;

        let first = find_or_create_order_item(&db, item.id, "alice").await?;
        let second = find_or_create_order_item(&db, item.id, "alice").await?;
        assert_eq!(first, second);
        assert_eq!(first.quantity, 1);

        let other = find_or_create_order_item(&db, item.id, "bob").await?;
        assert_ne!(other.id, first.id);
        Ok(())
    }
}
