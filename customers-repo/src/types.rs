//! Database row types, one per backend, and their domain conversions.

use sqlx::FromRow;

use customers_types::{Customer, CustomerId};

#[cfg(feature = "sqlite")]
use customers_types::RepoError;
#[cfg(feature = "sqlite")]
use std::str::FromStr;

use rust_decimal::Decimal;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Customer row from PostgreSQL (`NUMERIC` balance).
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgCustomerRow {
    pub id: i64,
    pub name: Option<String>,
    pub balance: Option<Decimal>,
}

/// Customer row from SQLite, where balances are stored as decimal text.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteCustomerRow {
    pub id: i64,
    pub name: Option<String>,
    pub balance: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "postgres")]
impl PgCustomerRow {
    /// Convert database row to domain Customer.
    pub fn into_domain(self) -> Customer {
        Customer::from_parts(CustomerId::from_i64(self.id), self.name, self.balance)
    }
}

#[cfg(feature = "sqlite")]
impl SqliteCustomerRow {
    /// Convert database row to domain Customer.
    pub fn into_domain(self) -> Result<Customer, RepoError> {
        let balance = self.balance.as_deref().map(parse_balance).transpose()?;
        Ok(Customer::from_parts(
            CustomerId::from_i64(self.id),
            self.name,
            balance,
        ))
    }
}

#[cfg(feature = "sqlite")]
pub fn parse_balance(s: &str) -> Result<Decimal, RepoError> {
    Decimal::from_str(s.trim())
        .or_else(|_| Decimal::from_scientific(s.trim()))
        .map_err(|e| RepoError::Database(format!("Invalid balance {:?}: {}", s, e)))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_balance() {
        assert_eq!(parse_balance("100.00").unwrap(), Decimal::new(10000, 2));
        assert_eq!(parse_balance(" 5 ").unwrap(), Decimal::new(5, 0));
        assert_eq!(parse_balance("1e2").unwrap(), Decimal::new(100, 0));
        assert!(parse_balance("lots").is_err());
    }

    #[test]
    fn test_null_balance_stays_null() {
        let row = SqliteCustomerRow {
            id: 9,
            name: None,
            balance: None,
        };
        let customer = row.into_domain().unwrap();
        assert_eq!(customer.id, CustomerId::from_i64(9));
        assert!(customer.balance.is_none());
    }
}
