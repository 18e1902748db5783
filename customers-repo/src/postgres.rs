//! PostgreSQL store adapter.
//!
//! Lookups inside a transaction take a row lock (`FOR UPDATE`) so that a
//! find-then-write sequence cannot interleave with a concurrent writer on the
//! same customer. The insert routines are the real server-side procedure and
//! function.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row, Transaction};

use customers_types::{
    Customer, CustomerId, CustomerStore, CustomerTx, InsertRoutines, NewCustomer, RepoError,
    RoutineNames,
};

use crate::RepoOptions;
use crate::types::PgCustomerRow;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository with row-level locking.
pub struct PostgresRepo {
    pool: PgPool,
    routines: Arc<RoutineNames>,
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::raw_sql(include_str!("../migrations/0001_create_customer_pg.sql"))
        .execute(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration 0001 failed: {}", e))?;

    Ok(())
}

impl PostgresRepo {
    /// Connects to PostgreSQL and, unless disabled, runs migrations.
    pub async fn new(database_url: &str, options: RepoOptions) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .connect(database_url)
            .await?;

        if options.migrate {
            run_migrations(&pool).await?;
        } else {
            tracing::info!("Skipping migrations, schema is managed externally");
        }

        Ok(Self {
            pool,
            routines: Arc::new(options.routines),
        })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CustomerStore for PostgresRepo {
    type Tx = PostgresTx;

    async fn begin(&self) -> Result<PostgresTx, RepoError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        Ok(PostgresTx {
            tx,
            routines: self.routines.clone(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction
// ─────────────────────────────────────────────────────────────────────────────

/// An open PostgreSQL transaction. Rolls back on drop.
pub struct PostgresTx {
    tx: Transaction<'static, Postgres>,
    routines: Arc<RoutineNames>,
}

#[async_trait]
impl CustomerTx for PostgresTx {
    async fn list_all(&mut self) -> Result<Vec<Customer>, RepoError> {
        let rows: Vec<PgCustomerRow> =
            sqlx::query_as(r#"SELECT id, name, balance FROM customer ORDER BY id"#)
                .fetch_all(&mut *self.tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PgCustomerRow::into_domain).collect())
    }

    async fn find_by_id(&mut self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
        // Lock the row until the transaction ends
        let row: Option<PgCustomerRow> =
            sqlx::query_as(r#"SELECT id, name, balance FROM customer WHERE id = $1 FOR UPDATE"#)
                .bind(id.as_i64())
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(PgCustomerRow::into_domain))
    }

    async fn insert(&mut self, customer: NewCustomer) -> Result<Customer, RepoError> {
        let row: PgCustomerRow = sqlx::query_as(
            r#"INSERT INTO customer (name, balance) VALUES ($1, $2) RETURNING id, name, balance"#,
        )
        .bind(customer.name.as_deref())
        .bind(customer.balance)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.into_domain())
    }

    async fn update(&mut self, customer: &Customer) -> Result<(), RepoError> {
        let result = sqlx::query(r#"UPDATE customer SET name = $1, balance = $2 WHERE id = $3"#)
            .bind(customer.name.as_deref())
            .bind(customer.balance)
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
        let result = sqlx::query(r#"DELETE FROM customer WHERE id = $1"#)
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

#[async_trait]
impl InsertRoutines for PostgresTx {
    async fn call_insert_procedure(
        &mut self,
        name: Option<&str>,
        balance: Decimal,
    ) -> Result<(), RepoError> {
        let procedure = self.routines.procedure();
        tracing::debug!(%procedure, "calling insert procedure");

        let sql = format!("CALL {}($1, $2)", procedure);
        sqlx::query(&sql)
            .bind(name)
            .bind(balance)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepoError::Routine {
                routine: procedure.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn call_insert_function(
        &mut self,
        name: Option<&str>,
        balance: Decimal,
    ) -> Result<Option<i64>, RepoError> {
        let function = self.routines.function();
        tracing::debug!(%function, "calling insert function");

        let sql = format!("SELECT {}($1, $2)", function);
        let row: PgRow = sqlx::query(&sql)
            .bind(name)
            .bind(balance)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| RepoError::Routine {
                routine: function.to_string(),
                message: e.to_string(),
            })?;

        Ok(numeric_result(&row))
    }
}

/// Reads the function result as an integer, whatever numeric type the
/// routine declares. NULL and non-numeric results yield `None`.
fn numeric_result(row: &PgRow) -> Option<i64> {
    if let Ok(value) = row.try_get::<Option<i64>, _>(0) {
        return value;
    }
    if let Ok(value) = row.try_get::<Option<i32>, _>(0) {
        return value.map(i64::from);
    }
    if let Ok(value) = row.try_get::<Option<i16>, _>(0) {
        return value.map(i64::from);
    }
    if let Ok(value) = row.try_get::<Option<Decimal>, _>(0) {
        return value.and_then(|d| d.trunc().to_i64());
    }

    tracing::warn!("insert function returned a non-numeric value");
    None
}
