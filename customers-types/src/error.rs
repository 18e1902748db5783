//! Error types for the customer service.

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid customer identifier: {0}")]
    InvalidIdentifier(i64),

    #[error("Invalid routine name: {0:?}")]
    InvalidRoutineName(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Routine {routine} failed: {message}")]
    Routine { routine: String, message: String },

    #[error("Entity not found")]
    NotFound,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => AppError::BadRequest(e.to_string()),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Transaction(e) => AppError::Internal(e),
            e @ RepoError::Routine { .. } => AppError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routine_failure_is_internal() {
        let err = RepoError::Routine {
            routine: "tambah_customer".into(),
            message: "boom".into(),
        };

        match AppError::from(err) {
            AppError::Internal(msg) => assert_eq!(msg, "Routine tambah_customer failed: boom"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_domain_error_is_bad_request() {
        let err = RepoError::Domain(DomainError::InvalidIdentifier(0));
        assert!(matches!(AppError::from(err), AppError::BadRequest(_)));
    }
}
