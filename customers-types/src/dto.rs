//! Data Transfer Objects (DTOs) for requests and responses.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Customer, CustomerId};

// ─────────────────────────────────────────────────────────────────────────────
// Customer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Transfer shape of a customer, used for both input and output.
///
/// Every field is optional on input. On output `id` is always present and
/// `balance` is never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerData {
    /// Customer identifier (ignored on creation)
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 1)]
    pub id: Option<CustomerId>,
    /// Customer name
    #[serde(default)]
    #[schema(example = "Alice")]
    pub name: Option<String>,
    /// Balance as an exact decimal
    #[serde(default, deserialize_with = "exact_balance")]
    #[schema(value_type = Option<String>, example = "100.00")]
    pub balance: Option<Decimal>,
}

impl CustomerData {
    /// Builds an input payload.
    pub fn new(name: Option<&str>, balance: Option<Decimal>) -> Self {
        Self {
            id: None,
            name: name.map(str::to_string),
            balance,
        }
    }

    /// Returns this payload tagged with an identifier.
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Accepts a balance as a JSON string or number. Numbers are read from their
/// literal text, never through `f64`.
fn exact_balance<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "balance must be a decimal string or number, got {}",
                other
            )));
        }
    };

    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid balance {:?}: {}", text, e)))
}

impl From<Customer> for CustomerData {
    fn from(customer: Customer) -> Self {
        let balance = customer.balance_or_zero();
        Self {
            id: Some(customer.id),
            name: customer.name,
            balance: Some(balance),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response envelope
// ─────────────────────────────────────────────────────────────────────────────

/// Envelope wrapping every HTTP response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub status: bool,
    /// Human-readable outcome
    pub message: String,
    /// Payload, omitted for message-only responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying data.
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without data.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failed response without data.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_customer_normalizes_null_balance() {
        let customer = Customer::from_parts(CustomerId::from_i64(3), Some("Dana".into()), None);
        let data = CustomerData::from(customer);

        assert_eq!(data.id, Some(CustomerId::from_i64(3)));
        assert_eq!(data.balance, Some(Decimal::ZERO));
    }

    #[test]
    fn test_deserialize_partial_payload() {
        let data: CustomerData = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();

        assert_eq!(data.name.as_deref(), Some("Bob"));
        assert!(data.balance.is_none());
        assert!(data.id.is_none());
    }

    #[test]
    fn test_balance_accepts_string_and_number() {
        let from_str: CustomerData = serde_json::from_str(r#"{"balance": "100.00"}"#).unwrap();
        let from_int: CustomerData = serde_json::from_str(r#"{"balance": 100}"#).unwrap();

        assert_eq!(from_str.balance, Some(Decimal::new(10000, 2)));
        assert_eq!(from_int.balance, Some(Decimal::new(100, 0)));
    }

    #[test]
    fn test_numeric_balance_keeps_every_digit() {
        let data: CustomerData =
            serde_json::from_str(r#"{"balance": 1234567890.123456789}"#).unwrap();

        assert_eq!(
            data.balance,
            Some(Decimal::from_str("1234567890.123456789").unwrap())
        );
        assert_eq!(data.balance.unwrap().to_string(), "1234567890.123456789");
    }

    #[test]
    fn test_balance_in_exponent_form() {
        let data: CustomerData = serde_json::from_str(r#"{"balance": 1.5e2}"#).unwrap();
        assert_eq!(data.balance, Some(Decimal::new(150, 0)));
    }

    #[test]
    fn test_null_balance_is_absent() {
        let data: CustomerData = serde_json::from_str(r#"{"balance": null}"#).unwrap();
        assert!(data.balance.is_none());
    }

    #[test]
    fn test_non_decimal_balance_is_rejected() {
        assert!(serde_json::from_str::<CustomerData>(r#"{"balance": "abc"}"#).is_err());
        assert!(serde_json::from_str::<CustomerData>(r#"{"balance": true}"#).is_err());
    }

    #[test]
    fn test_message_only_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::ok("done")).unwrap();
        assert_eq!(json, serde_json::json!({"status": true, "message": "done"}));
    }
}
