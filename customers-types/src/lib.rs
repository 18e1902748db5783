//! # Customers Types
//!
//! Domain types and port traits for the customer ledger service.
//! This crate has ZERO IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Customer, CustomerId, routine naming)
//! - `ports/` - Trait definitions that store adapters must implement
//! - `dto/` - Data Transfer Objects for the service boundary
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Customer, CustomerId, FUNCTION_INSERT_FAILED, FunctionInsertOutcome, NewCustomer,
    RoutineNames,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{CustomerStore, CustomerTx, InsertRoutines};
