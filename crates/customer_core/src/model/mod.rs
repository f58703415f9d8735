//! Domain model for the customer store.
//!
//! # Responsibility
//! - Define the canonical `Customer` record and its write payload.

pub mod customer;
