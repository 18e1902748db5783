//! Port traits (interfaces for adapters).
//!
//! These are the contracts that store adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod routines;
mod store;

pub use routines::InsertRoutines;
pub use store::{CustomerStore, CustomerTx};
