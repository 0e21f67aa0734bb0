//! Cart mutation routes and the order summary view.
//!
//! Mutations always answer with a redirect and leave a flash message behind.

use crate::{
    core::{
        cart::{self, CartOutcome},
        order::{self, OrderSummary},
    },
    errors::Result,
    web::{
        AppState, HOME_PATH, ORDER_SUMMARY_PATH, View,
        flash::{self, Level},
        identity::CurrentUser,
        product_path,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;
use tracing::instrument;

const NO_ACTIVE_ORDER: &str = "You do not have an active order";

fn redirect_for(cookies: &Cookies, outcome: CartOutcome, slug: &str) -> Redirect {
    match outcome {
        CartOutcome::Added => {
            flash::push(cookies, Level::Info, "Item was added to cart");
            Redirect::to(ORDER_SUMMARY_PATH)
        }
        CartOutcome::QuantityUpdated => {
            flash::push(cookies, Level::Info, "Item quantity was updated");
            Redirect::to(ORDER_SUMMARY_PATH)
        }
        CartOutcome::QuantityReduced => {
            flash::push(cookies, Level::Warning, "Item quantity was updated");
            Redirect::to(ORDER_SUMMARY_PATH)
        }
        CartOutcome::Removed => {
            flash::push(cookies, Level::Warning, "Item was removed from cart");
            Redirect::to(ORDER_SUMMARY_PATH)
        }
        CartOutcome::NotInCart => {
            flash::push(cookies, Level::Info, "Item was not in your cart");
            Redirect::to(&product_path(slug))
        }
        CartOutcome::NoActiveOrder => {
            flash::push(cookies, Level::Info, NO_ACTIVE_ORDER);
            Redirect::to(&product_path(slug))
        }
    }
}

/// `GET /add-to-cart/:slug`
#[instrument(name = "handler::add_to_cart", skip(state, cookies), fields(user_id = %user.user_id))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(slug): Path<String>,
    cookies: Cookies,
) -> Result<Redirect> {
    let outcome = cart::add_to_cart(&state.db, &user.user_id, &slug).await?;
    Ok(redirect_for(&cookies, outcome, &slug))
}

/// `GET /remove-from-cart/:slug`
#[instrument(name = "handler::remove_from_cart", skip(state, cookies), fields(user_id = %user.user_id))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(slug): Path<String>,
    cookies: Cookies,
) -> Result<Redirect> {
    let outcome = cart::remove_from_cart(&state.db, &user.user_id, &slug).await?;
    Ok(redirect_for(&cookies, outcome, &slug))
}

/// `GET /remove-item/:slug`
#[instrument(name = "handler::remove_single_item", skip(state, cookies), fields(user_id = %user.user_id))]
pub async fn remove_single_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(slug): Path<String>,
    cookies: Cookies,
) -> Result<Redirect> {
    let outcome = cart::remove_single_item_from_cart(&state.db, &user.user_id, &slug).await?;
    Ok(redirect_for(&cookies, outcome, &slug))
}

/// `GET /order-summary` - the active cart, or back home when there is none
#[instrument(name = "handler::order_summary", skip(state, cookies), fields(user_id = %user.user_id))]
pub async fn order_summary(
    State(state): State<AppState>,
    user: CurrentUser,
    cookies: Cookies,
) -> Result<Response> {
    let Some(summary) = order::order_summary(&state.db, &user.user_id).await? else {
        flash::push(&cookies, Level::Error, NO_ACTIVE_ORDER);
        return Ok(Redirect::to(HOME_PATH).into_response());
    };
    let view: Json<View<OrderSummary>> = View::render(summary, flash::take(&cookies));
    Ok(view.into_response())
}
