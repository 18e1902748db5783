//! Names of the server-side insert routines.
//!
//! The names are spliced into SQL text (`CALL name($1, $2)`), so they are
//! validated as plain identifiers before any adapter sees them.

use crate::error::DomainError;

/// Default name of the insert procedure.
pub const DEFAULT_INSERT_PROCEDURE: &str = "tambah_customer";

/// Default name of the insert function.
pub const DEFAULT_INSERT_FUNCTION: &str = "fungsi_tambah_customer";

/// Validated names of the insert procedure and insert function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineNames {
    procedure: String,
    function: String,
}

impl RoutineNames {
    /// Creates routine names, rejecting anything that is not a SQL identifier.
    pub fn new(
        procedure: impl Into<String>,
        function: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let procedure = validate(procedure.into())?;
        let function = validate(function.into())?;
        Ok(Self {
            procedure,
            function,
        })
    }

    pub fn procedure(&self) -> &str {
        &self.procedure
    }

    pub fn function(&self) -> &str {
        &self.function
    }
}

impl Default for RoutineNames {
    fn default() -> Self {
        Self {
            procedure: DEFAULT_INSERT_PROCEDURE.to_string(),
            function: DEFAULT_INSERT_FUNCTION.to_string(),
        }
    }
}

/// Accepts `name` or `schema.name`, each part `[A-Za-z_][A-Za-z0-9_]*`.
fn validate(name: String) -> Result<String, DomainError> {
    let parts: Vec<&str> = name.split('.').collect();
    let valid = parts.len() <= 2 && parts.iter().all(|part| is_identifier(part));

    if valid {
        Ok(name)
    } else {
        Err(DomainError::InvalidRoutineName(name))
    }
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
