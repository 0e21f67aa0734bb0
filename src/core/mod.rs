//! Core business logic - framework-agnostic catalog, cart, order and checkout operations.
//!
//! Every operation takes the database connection and, where it acts for a user,
//! the caller's identity as an explicit `user_id`.

/// Item listing, lookup and catalog seeding
pub mod catalog;

/// Add, remove and decrement cart lines
pub mod cart;

/// Billing address validation and submission
pub mod checkout;

/// Active order lookup, creation and summary
pub mod order;
