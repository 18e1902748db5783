//! Result of creating a customer through the insert function.

use super::customer::CustomerId;

/// Identifier reported to legacy callers when the insert function fails.
///
/// Generated ids start at 1, so this value can never name a real customer.
pub const FUNCTION_INSERT_FAILED: i64 = -1;

/// Outcome of the insert-function creation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionInsertOutcome {
    /// The routine inserted a row and reported its identifier.
    Created(CustomerId),
    /// The routine returned nothing usable.
    Rejected { reason: String },
}

impl FunctionInsertOutcome {
    /// Returns the new identifier, if any.
    pub fn id(&self) -> Option<CustomerId> {
        match self {
            FunctionInsertOutcome::Created(id) => Some(*id),
            FunctionInsertOutcome::Rejected { .. } => None,
        }
    }

    /// Encodes the outcome the way the old integer contract did.
    pub fn legacy_id(&self) -> i64 {
        self.id()
            .map(|id| id.as_i64())
            .unwrap_or(FUNCTION_INSERT_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_encodes_id() {
        let outcome = FunctionInsertOutcome::Created(CustomerId::from_i64(7));
        assert_eq!(outcome.id(), Some(CustomerId::from_i64(7)));
        assert_eq!(outcome.legacy_id(), 7);
    }

    #[test]
    fn test_rejected_encodes_sentinel() {
        let outcome = FunctionInsertOutcome::Rejected {
            reason: "no identifier".into(),
        };
        assert_eq!(outcome.id(), None);
        assert_eq!(outcome.legacy_id(), FUNCTION_INSERT_FAILED);
        assert!(CustomerId::try_from_generated(outcome.legacy_id()).is_err());
    }
}
