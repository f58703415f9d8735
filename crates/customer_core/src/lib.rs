//! Core persistence logic for the customer service.
//! This crate owns the store schema, seeding and CRUD invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{initialize_store, open_existing_db, DbError, InitMode, SeedReport};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::customer::{Customer, CustomerDraft, CustomerId};
pub use repo::customer_repo::{
    CustomerRepository, RepoError, RepoResult, SqliteCustomerRepository,
};
pub use service::customer_service::CustomerService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
