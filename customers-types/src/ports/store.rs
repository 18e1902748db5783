//! Customer store port traits.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory) implement these traits.

use crate::domain::{Customer, CustomerId, NewCustomer};
use crate::error::RepoError;

use super::InsertRoutines;

/// Entry point of a customer store: hands out transactions.
#[async_trait::async_trait]
pub trait CustomerStore: Send + Sync + 'static {
    type Tx: CustomerTx;

    /// Opens a transaction.
    async fn begin(&self) -> Result<Self::Tx, RepoError>;
}

/// An open store transaction.
///
/// Every read and write of one service operation goes through a single
/// value of this type. Dropping it without calling [`CustomerTx::commit`]
/// rolls back everything done through it.
#[async_trait::async_trait]
pub trait CustomerTx: InsertRoutines + Sized {
    // ─────────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists every customer. Order is adapter-defined.
    async fn list_all(&mut self) -> Result<Vec<Customer>, RepoError>;

    /// Finds a customer by id.
    ///
    /// A found row stays present until the transaction ends.
    async fn find_by_id(&mut self, id: CustomerId) -> Result<Option<Customer>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────────

    /// Inserts a customer and returns it with its new id.
    async fn insert(&mut self, customer: NewCustomer) -> Result<Customer, RepoError>;

    /// Persists every field of an existing customer.
    ///
    /// Returns `RepoError::NotFound` when the row no longer exists.
    async fn update(&mut self, customer: &Customer) -> Result<(), RepoError>;

    /// Deletes a customer. Returns `false` when it was already gone.
    async fn delete(&mut self, customer: &Customer) -> Result<bool, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Scope
    // ─────────────────────────────────────────────────────────────────────────────

    async fn commit(self) -> Result<(), RepoError>;

    async fn rollback(self) -> Result<(), RepoError>;
}
