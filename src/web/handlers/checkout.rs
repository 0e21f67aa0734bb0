//! Billing address form and submission.

use crate::{
    core::checkout::{self, CheckoutForm, CheckoutOutcome},
    errors::Result,
    web::{
        AppState, CHECKOUT_PATH, ORDER_SUMMARY_PATH, View,
        flash::{self, Level},
        identity::CurrentUser,
    },
};
use axum::{
    Form, Json,
    extract::State,
    response::Redirect,
};
use serde::Serialize;
use tower_cookies::Cookies;
use tracing::instrument;

/// The blank checkout form
#[derive(Debug, Serialize)]
pub struct CheckoutPage {
    /// Field names with empty initial values
    pub form: CheckoutForm,
}

/// `GET /checkout`
pub async fn checkout_page(cookies: Cookies) -> Json<View<CheckoutPage>> {
    View::render(
        CheckoutPage {
            form: CheckoutForm::default(),
        },
        flash::take(&cookies),
    )
}

/// `POST /checkout` - form-encoded billing address
#[instrument(name = "handler::submit_checkout", skip(state, cookies, form), fields(user_id = %user.user_id))]
pub async fn submit_checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    cookies: Cookies,
    Form(form): Form<CheckoutForm>,
) -> Result<Redirect> {
    let redirect = match checkout::submit_checkout(&state.db, &user.user_id, &form).await? {
        CheckoutOutcome::Saved(_) => {
            flash::push(&cookies, Level::Success, "Billing address saved");
            Redirect::to(CHECKOUT_PATH)
        }
        CheckoutOutcome::Invalid(_) => {
            flash::push(&cookies, Level::Warning, "Failed checkout");
            Redirect::to(CHECKOUT_PATH)
        }
        CheckoutOutcome::NoActiveOrder => {
            flash::push(&cookies, Level::Error, "You do not have an active order");
            Redirect::to(ORDER_SUMMARY_PATH)
        }
    };
    Ok(redirect)
}
