//! Domain models for the customer service.

pub mod customer;
pub mod outcome;
pub mod routine;

pub use customer::{Customer, CustomerId, NewCustomer};
pub use outcome::{FUNCTION_INSERT_FAILED, FunctionInsertOutcome};
pub use routine::RoutineNames;
