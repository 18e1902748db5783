//! Customer Application Service
//!
//! Orchestrates customer operations through the store port.
//! Contains NO infrastructure logic - pure business orchestration.
//!
//! Every operation opens exactly one store transaction and either commits it
//! or lets it roll back, so a half-applied operation is never observable.

use customers_types::{
    AppError, CustomerData, CustomerId, CustomerStore, CustomerTx, FunctionInsertOutcome, InsertRoutines,
    NewCustomer, RepoError,
};

/// Application service for customer operations.
///
/// Generic over `S: CustomerStore` - the adapter is injected at compile time.
/// This enables:
/// - Swapping stores without code changes
/// - Testing with an in-memory store
/// - Compile-time checks for port implementation
pub struct CustomerService<S: CustomerStore> {
    store: S,
}

impl<S: CustomerStore> CustomerService<S> {
    /// Creates a new customer service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists all customers. A NULL stored balance is reported as zero.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CustomerData>, AppError> {
        let mut tx = self.store.begin().await?;
        let customers = tx.list_all().await?;
        tx.commit().await?;

        Ok(customers.into_iter().map(CustomerData::from).collect())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Inserts a customer directly and returns it with its new id.
    #[tracing::instrument(skip(self, data))]
    pub async fn create_direct(&self, data: CustomerData) -> Result<CustomerData, AppError> {
        let new = NewCustomer::new(data.name, data.balance);

        let mut tx = self.store.begin().await?;
        let customer = tx.insert(new).await?;
        tx.commit().await?;

        tracing::debug!(customer_id = %customer.id, "customer created");
        Ok(customer.into())
    }

    /// Creates a customer through the insert procedure.
    ///
    /// The procedure does not report the new id back.
    #[tracing::instrument(skip(self, data))]
    pub async fn create_via_procedure(&self, data: CustomerData) -> Result<(), AppError> {
        let new = NewCustomer::new(data.name, data.balance);

        let mut tx = self.store.begin().await?;
        tx.call_insert_procedure(new.name.as_deref(), new.balance)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    /// Creates a customer through the insert function.
    ///
    /// A routine that returns nothing usable yields
    /// [`FunctionInsertOutcome::Rejected`] rather than an error.
    #[tracing::instrument(skip(self, data))]
    pub async fn create_via_function(
        &self,
        data: CustomerData,
    ) -> Result<FunctionInsertOutcome, AppError> {
        let new = NewCustomer::new(data.name, data.balance);

        let mut tx = self.store.begin().await?;
        let result = tx
            .call_insert_function(new.name.as_deref(), new.balance)
            .await?;
        tx.commit().await?;

        let outcome = match result {
            Some(raw) => match CustomerId::try_from_generated(raw) {
                Ok(id) => FunctionInsertOutcome::Created(id),
                Err(e) => FunctionInsertOutcome::Rejected {
                    reason: e.to_string(),
                },
            },
            None => FunctionInsertOutcome::Rejected {
                reason: "insert function returned no identifier".into(),
            },
        };

        if let FunctionInsertOutcome::Rejected { reason } = &outcome {
            tracing::warn!(%reason, "insert function rejected customer");
        }

        Ok(outcome)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Applies a partial patch to a customer.
    ///
    /// Returns `false` when the customer does not exist. An empty name or a
    /// missing balance leaves the stored value untouched.
    #[tracing::instrument(skip(self, data), fields(customer_id = %id))]
    pub async fn update(&self, id: CustomerId, data: CustomerData) -> Result<bool, AppError> {
        let mut tx = self.store.begin().await?;

        let Some(mut customer) = tx.find_by_id(id).await? else {
            tracing::debug!("customer not found");
            tx.rollback().await?;
            return Ok(false);
        };

        customer.apply_patch(data.name.as_deref(), data.balance);
        match tx.update(&customer).await {
            Ok(()) => {}
            // Deleted by a concurrent writer after the lookup
            Err(RepoError::NotFound) => return Ok(false),
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;

        Ok(true)
    }

    /// Deletes a customer. Returns `false` when it does not exist.
    #[tracing::instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete(&self, id: CustomerId) -> Result<bool, AppError> {
        let mut tx = self.store.begin().await?;

        let Some(customer) = tx.find_by_id(id).await? else {
            tracing::debug!("customer not found");
            tx.rollback().await?;
            return Ok(false);
        };

        let deleted = tx.delete(&customer).await?;
        tx.commit().await?;

        Ok(deleted)
    }
}
