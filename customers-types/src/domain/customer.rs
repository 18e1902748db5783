//! Customer domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Store-generated identifier of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Wraps a raw identifier (e.g. a path parameter or a database column).
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Validates a value produced by an identifier generator.
    ///
    /// Generated identifiers start at 1, so anything below that is rejected.
    pub fn try_from_generated(id: i64) -> Result<Self, DomainError> {
        if id < 1 {
            return Err(DomainError::InvalidIdentifier(id));
        }
        Ok(Self(id))
    }

    /// Returns the raw value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A persisted customer record.
///
/// `name` and `balance` are nullable at the storage layer; every creation path
/// writes a balance, but rows written by other tools may still hold NULL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: Option<String>,
    pub balance: Option<Decimal>,
}

impl Customer {
    /// Creates a customer with all fields specified (for database reconstruction).
    pub fn from_parts(id: CustomerId, name: Option<String>, balance: Option<Decimal>) -> Self {
        Self { id, name, balance }
    }

    /// Balance as presented to callers: a NULL balance reads as zero.
    pub fn balance_or_zero(&self) -> Decimal {
        self.balance.unwrap_or(Decimal::ZERO)
    }

    /// Applies a partial patch.
    ///
    /// The name is overwritten only when supplied and non-empty, the balance
    /// only when supplied. Omitted fields keep their stored value, so a patch
    /// can never clear a field.
    pub fn apply_patch(&mut self, name: Option<&str>, balance: Option<Decimal>) {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            self.name = Some(name.to_string());
        }
        if let Some(balance) = balance {
            self.balance = Some(balance);
        }
    }
}

/// A customer that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: Option<String>,
    pub balance: Decimal,
}

impl NewCustomer {
    /// Builds a new customer, defaulting an absent balance to zero.
    pub fn new(name: Option<String>, balance: Option<Decimal>) -> Self {
        Self {
            name,
            balance: balance.unwrap_or(Decimal::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer::from_parts(
            CustomerId::from_i64(42),
            Some("Alice".to_string()),
            Some(Decimal::new(10000, 2)),
        )
    }

    #[test]
    fn test_new_customer_defaults_balance() {
        let new = NewCustomer::new(Some("Bob".to_string()), None);
        assert_eq!(new.balance, Decimal::ZERO);
    }

    #[test]
    fn test_new_customer_keeps_balance() {
        let new = NewCustomer::new(None, Some(Decimal::new(125, 1)));
        assert_eq!(new.balance, Decimal::new(1250, 2));
        assert!(new.name.is_none());
    }

    #[test]
    fn test_patch_empty_name_is_ignored() {
        let mut c = customer();
        c.apply_patch(Some(""), Some(Decimal::new(5000, 2)));
        assert_eq!(c.name.as_deref(), Some("Alice"));
        assert_eq!(c.balance, Some(Decimal::new(50, 0)));
    }

    #[test]
    fn test_patch_missing_balance_is_ignored() {
        let mut c = customer();
        c.apply_patch(Some("Alicia"), None);
        assert_eq!(c.name.as_deref(), Some("Alicia"));
        assert_eq!(c.balance, Some(Decimal::new(100, 0)));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let mut once = customer();
        once.apply_patch(Some("Carol"), Some(Decimal::new(1, 0)));

        let mut twice = once.clone();
        twice.apply_patch(Some("Carol"), Some(Decimal::new(1, 0)));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_null_balance_reads_as_zero() {
        let c = Customer::from_parts(CustomerId::from_i64(1), None, None);
        assert_eq!(c.balance_or_zero(), Decimal::ZERO);
    }

    #[test]
    fn test_generated_id_must_be_positive() {
        assert!(CustomerId::try_from_generated(1).is_ok());
        assert!(matches!(
            CustomerId::try_from_generated(0),
            Err(DomainError::InvalidIdentifier(0))
        ));
        assert!(CustomerId::try_from_generated(-1).is_err());
    }

    #[test]
    fn test_id_parse() {
        let id: CustomerId = "42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);
        assert!("abc".parse::<CustomerId>().is_err());
    }
}
