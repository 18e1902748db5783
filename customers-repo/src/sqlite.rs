//! SQLite store adapter.
//!
//! SQLite has no stored routines, so the insert procedure and insert function
//! are emulated inside the open transaction with the same contract as the
//! PostgreSQL reference routines: a blank name makes the procedure fail and
//! the function return no identifier.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use customers_types::{
    Customer, CustomerId, CustomerStore, CustomerTx, InsertRoutines, NewCustomer, RepoError,
    RoutineNames,
};

use crate::RepoOptions;
use crate::types::SqliteCustomerRow;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
    routines: Arc<RoutineNames>,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str, options: RepoOptions) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` opens a fresh database, so keep exactly one alive
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<std::time::Duration>)
                .max_lifetime(None::<std::time::Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(options.max_connections)
        };
        let pool = pool_options.connect_with(connect_options).await?;

        if options.migrate {
            sqlx::raw_sql(include_str!("../migrations/0001_create_customer.sql"))
                .execute(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration 0001 failed: {}", e))?;
        }

        Ok(Self {
            pool,
            routines: Arc::new(options.routines),
        })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CustomerStore for SqliteRepo {
    type Tx = SqliteTx;

    async fn begin(&self) -> Result<SqliteTx, RepoError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        Ok(SqliteTx {
            tx,
            routines: self.routines.clone(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction
// ─────────────────────────────────────────────────────────────────────────────

/// An open SQLite transaction. Rolls back on drop.
pub struct SqliteTx {
    tx: Transaction<'static, Sqlite>,
    routines: Arc<RoutineNames>,
}

impl SqliteTx {
    async fn insert_row(
        &mut self,
        name: Option<&str>,
        balance: Decimal,
    ) -> Result<i64, sqlx::Error> {
        let (id,): (i64,) =
            sqlx::query_as(r#"INSERT INTO customer (name, balance) VALUES (?, ?) RETURNING id"#)
                .bind(name)
                .bind(balance.to_string())
                .fetch_one(&mut *self.tx)
                .await?;

        Ok(id)
    }
}

#[async_trait]
impl CustomerTx for SqliteTx {
    async fn list_all(&mut self) -> Result<Vec<Customer>, RepoError> {
        let rows: Vec<SqliteCustomerRow> =
            sqlx::query_as(r#"SELECT id, name, balance FROM customer ORDER BY id"#)
                .fetch_all(&mut *self.tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqliteCustomerRow::into_domain).collect()
    }

    async fn find_by_id(&mut self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
        let row: Option<SqliteCustomerRow> =
            sqlx::query_as(r#"SELECT id, name, balance FROM customer WHERE id = ?"#)
                .bind(id.as_i64())
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqliteCustomerRow::into_domain).transpose()
    }

    async fn insert(&mut self, customer: NewCustomer) -> Result<Customer, RepoError> {
        let id = self
            .insert_row(customer.name.as_deref(), customer.balance)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Customer::from_parts(
            CustomerId::from_i64(id),
            customer.name,
            Some(customer.balance),
        ))
    }

    async fn update(&mut self, customer: &Customer) -> Result<(), RepoError> {
        let result = sqlx::query(r#"UPDATE customer SET name = ?, balance = ? WHERE id = ?"#)
            .bind(customer.name.as_deref())
            .bind(customer.balance.map(|b| b.to_string()))
            .bind(customer.id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn delete(&mut self, customer: &Customer) -> Result<bool, RepoError> {
        let result = sqlx::query(r#"DELETE FROM customer WHERE id = ?"#)
            .bind(customer.id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(self) -> Result<(), RepoError> {
        self.tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))
    }

    async fn rollback(self) -> Result<(), RepoError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Emulated routines
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl InsertRoutines for SqliteTx {
    async fn call_insert_procedure(
        &mut self,
        name: Option<&str>,
        balance: Decimal,
    ) -> Result<(), RepoError> {
        let procedure = self.routines.procedure().to_string();
        tracing::debug!(%procedure, "emulating insert procedure");

        let Some(name) = required_name(name) else {
            return Err(RepoError::Routine {
                routine: procedure,
                message: "customer name is required".into(),
            });
        };

        self.insert_row(Some(name), balance)
            .await
            .map_err(|e| RepoError::Routine {
                routine: procedure,
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn call_insert_function(
        &mut self,
        name: Option<&str>,
        balance: Decimal,
    ) -> Result<Option<i64>, RepoError> {
        let function = self.routines.function().to_string();
        tracing::debug!(%function, "emulating insert function");

        let Some(name) = required_name(name) else {
            return Ok(None);
        };

        let id = self
            .insert_row(Some(name), balance)
            .await
            .map_err(|e| RepoError::Routine {
                routine: function,
                message: e.to_string(),
            })?;

        Ok(Some(id))
    }
}

/// Name check shared by both emulated routines.
fn required_name(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.trim().is_empty())
}
