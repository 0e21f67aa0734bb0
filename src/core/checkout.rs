//! Checkout business logic - Validating and saving the billing address.
//!
//! The submitted form is validated up front into an [`AddressInput`] with named
//! field errors. An accepted submission always writes a fresh billing address row
//! and points the active order at it; earlier addresses are never updated.
//! Checkout does not place the order.

use crate::{
    core::order,
    entities::{billing_address, order as order_entity},
    errors::Result,
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

const MAX_ADDRESS_LEN: usize = 100;
const MAX_ZIP_LEN: usize = 20;

/// Raw checkout fields as submitted. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckoutForm {
    /// Street and house number
    #[serde(default)]
    pub street_address: String,
    /// Apartment, suite or unit
    #[serde(default)]
    pub apartment_address: String,
    /// Country code
    #[serde(default)]
    pub country: String,
    /// Postal code
    #[serde(default)]
    pub zip_code: String,
}

/// A validated billing address ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInput {
    /// Trimmed street address
    pub street_address: String,
    /// Trimmed apartment address, may be empty
    pub apartment_address: String,
    /// Upper-case ISO 3166-1 alpha-2 code
    pub country: String,
    /// Trimmed postal code
    pub zip_code: String,
}

/// A rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    required: bool,
    max: usize,
) {
    if required && value.is_empty() {
        errors.push(FieldError::new(field, "This field is required."));
    } else if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("Ensure this value has at most {max} characters."),
        ));
    }
}

impl CheckoutForm {
    /// Validates the form, collecting an error for every bad field.
    ///
    /// # Errors
    /// Returns the list of field errors if any field is rejected.
    pub fn validate(&self) -> std::result::Result<AddressInput, Vec<FieldError>> {
        let street_address = self.street_address.trim();
        let apartment_address = self.apartment_address.trim();
        let country = self.country.trim().to_ascii_uppercase();
        let zip_code = self.zip_code.trim();

        let mut errors = Vec::new();
        check_length(&mut errors, "street_address", street_address, true, MAX_ADDRESS_LEN);
        check_length(
            &mut errors,
            "apartment_address",
            apartment_address,
            false,
            MAX_ADDRESS_LEN,
        );

        if country.is_empty() {
            errors.push(FieldError::new("country", "This field is required."));
        } else if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.push(FieldError::new(
                "country",
                "Select a valid two-letter country code.",
            ));
        }

        check_length(&mut errors, "zip_code", zip_code, true, MAX_ZIP_LEN);
        if !zip_code.is_empty()
            && !zip_code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
        {
            errors.push(FieldError::new(
                "zip_code",
                "Use only letters, digits, spaces and dashes.",
            ));
        }

        if errors.is_empty() {
            Ok(AddressInput {
                street_address: street_address.to_string(),
                apartment_address: apartment_address.to_string(),
                country,
                zip_code: zip_code.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

/// What a checkout submission did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// A new billing address was stored and attached to the active order
    Saved(billing_address::Model),
    /// The form was rejected; nothing was written
    Invalid(Vec<FieldError>),
    /// The user has no active order; nothing was written
    NoActiveOrder,
}

/// Stores the submitted billing address against the user's active order.
///
/// The active order is checked before the form, so a user without a cart is
/// told so even when the form is also invalid.
///
/// # Errors
/// Returns an error if a database operation fails.
#[instrument(skip(db, form))]
pub async fn submit_checkout(
    db: &DatabaseConnection,
    user_id: &str,
    form: &CheckoutForm,
) -> Result<CheckoutOutcome> {
    let txn = db.begin().await?;

    let Some(active) = order::get_active_order(&txn, user_id).await? else {
        warn!("Checkout by {user_id} without an active order");
        return Ok(CheckoutOutcome::NoActiveOrder);
    };

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            warn!(?errors, "Checkout form from {user_id} rejected");
            return Ok(CheckoutOutcome::Invalid(errors));
        }
    };

    let address = billing_address::ActiveModel {
        user_id: Set(user_id.to_string()),
        street_address: Set(input.street_address),
        apartment_address: Set(input.apartment_address),
        country: Set(input.country),
        zip_code: Set(input.zip_code),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let order_id = active.id;
    let mut active: order_entity::ActiveModel = active.into();
    active.billing_address_id = Set(Some(address.id));
    active.update(&txn).await?;

    txn.commit().await?;
    info!(
        order_id,
        billing_address_id = address.id,
        "Saved billing address for {user_id}"
    );
    Ok(CheckoutOutcome::Saved(address))
}
