//! HTTP surface for the customer store.
//!
//! # Endpoints
//!
//! - `/` - liveness message
//! - `/customers` - list (GET) and create (POST)
//! - `/customer?id=` - read (GET), replace (PUT), delete (DELETE)

pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::ServerConfig;
pub use envelope::{Envelope, Reply};
pub use error::ApiError;
pub use handlers::AppState;
pub use server::{build_router, CustomerServer};
