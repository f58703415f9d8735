//! Customer use-case service.
//!
//! # Responsibility
//! - Provide the single CRUD contract shared by both HTTP endpoints.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - `update_existing_customer` never writes when the target row is absent.
//! - Service layer remains storage-agnostic.

use crate::model::customer::{Customer, CustomerDraft, CustomerId};
use crate::repo::customer_repo::{CustomerRepository, RepoError, RepoResult};
use log::debug;

/// Use-case service wrapper for customer CRUD operations.
pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every customer ordered by id.
    pub fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        self.repo.list_customers()
    }

    /// Appends one customer and returns its store-assigned id.
    pub fn create_customer(&self, draft: &CustomerDraft) -> RepoResult<CustomerId> {
        let id = self.repo.create_customer(draft)?;
        debug!("event=customer_create module=service status=ok id={id}");
        Ok(id)
    }

    pub fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        self.repo.get_customer(id)
    }

    /// Replaces `name`/`age` of an existing customer.
    ///
    /// # Contract
    /// - Returns `RepoError::NotFound(id)` when no row matches `id`.
    /// - Applying the same draft twice yields the same final row.
    pub fn update_existing_customer(
        &self,
        id: CustomerId,
        draft: &CustomerDraft,
    ) -> RepoResult<()> {
        if self.repo.get_customer(id)?.is_none() {
            return Err(RepoError::NotFound(id));
        }
        self.repo.update_customer(id, draft)?;
        debug!("event=customer_update module=service status=ok id={id}");
        Ok(())
    }

    /// Deletes a customer; absent ids are a no-op.
    pub fn delete_customer(&self, id: CustomerId) -> RepoResult<()> {
        self.repo.delete_customer(id)
    }
}
