//! Server-side insert routine port.
//!
//! The routines live in the database and are versioned outside this service.
//! Adapters without stored routines provide an in-process equivalent.

use rust_decimal::Decimal;

use crate::error::RepoError;

/// Capability to create customers through server-side routines.
#[async_trait::async_trait]
pub trait InsertRoutines: Send {
    /// Calls the insert procedure. The procedure reports nothing back.
    async fn call_insert_procedure(
        &mut self,
        name: Option<&str>,
        balance: Decimal,
    ) -> Result<(), RepoError>;

    /// Calls the insert function.
    ///
    /// Returns the identifier the function produced, or `None` when it
    /// returned NULL or a non-numeric value.
    async fn call_insert_function(
        &mut self,
        name: Option<&str>,
        balance: Decimal,
    ) -> Result<Option<i64>, RepoError>;
}
