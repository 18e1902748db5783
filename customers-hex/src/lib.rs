//! # Customers Hex
//!
//! Application service layer and HTTP adapter for the customer service.
//!
//! ## Architecture
//!
//! - `service` - Application service (one store transaction per operation)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `S: CustomerStore`, allowing
//! different store implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::CustomerService;
