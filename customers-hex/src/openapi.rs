//! OpenAPI document for the customer routes.

#![allow(dead_code)] // Path functions and envelope schemas only feed document generation

use utoipa::{OpenApi, ToSchema};

use customers_types::CustomerData;

/// Message-only response envelope.
#[derive(ToSchema)]
#[schema(example = json!({"status": true, "message": "Customer deleted successfully"}))]
struct MessageEnvelope {
    status: bool,
    message: String,
}

/// Response envelope carrying one customer.
#[derive(ToSchema)]
struct CustomerEnvelope {
    status: bool,
    message: String,
    data: CustomerData,
}

/// Response envelope carrying the customer list.
#[derive(ToSchema)]
struct CustomerListEnvelope {
    status: bool,
    message: String,
    data: Vec<CustomerData>,
}

// Stand-ins for the handlers, used only for path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List all customers
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    responses(
        (status = 200, description = "Customer list", body = CustomerListEnvelope),
        (status = 500, description = "Store failure", body = MessageEnvelope)
    )
)]
async fn list_customers() {}

/// Create a customer with a direct insert
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CustomerData,
    responses(
        (status = 201, description = "Customer created", body = CustomerEnvelope),
        (status = 500, description = "Store failure", body = MessageEnvelope)
    )
)]
async fn create_customer() {}

/// Create a customer through the insert procedure
///
/// The procedure does not report the new id.
#[utoipa::path(
    post,
    path = "/customers/procedure",
    tag = "routines",
    request_body = CustomerData,
    responses(
        (status = 200, description = "Procedure completed", body = MessageEnvelope),
        (status = 500, description = "Procedure or store failure", body = MessageEnvelope)
    )
)]
async fn create_with_procedure() {}

/// Create a customer through the insert function
#[utoipa::path(
    post,
    path = "/customers/function",
    tag = "routines",
    request_body = CustomerData,
    responses(
        (status = 200, description = "Customer created with the id the function returned", body = CustomerEnvelope),
        (status = 500, description = "Function produced no usable id", body = MessageEnvelope,
            example = json!({"status": false, "message": "Failed to create customer."}))
    )
)]
async fn create_with_function() {}

/// Update a customer
///
/// An empty name or a missing balance keeps the stored value.
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    request_body = CustomerData,
    responses(
        (status = 200, description = "Customer updated", body = CustomerEnvelope),
        (status = 400, description = "Invalid customer ID", body = MessageEnvelope),
        (status = 404, description = "Customer not found", body = MessageEnvelope)
    )
)]
async fn update_customer() {}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer deleted", body = MessageEnvelope),
        (status = 400, description = "Invalid customer ID", body = MessageEnvelope),
        (status = 404, description = "Customer not found", body = MessageEnvelope)
    )
)]
async fn delete_customer() {}

/// OpenAPI documentation for the Customers API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Customer Service API",
        version = "1.0.0",
        description = "Customer records over a relational store. Customers can be created with a direct insert or through the database's insert procedure and insert function.\n\nEvery response body is wrapped in `{ status, message, data? }`. Balances are decimal strings.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_customers,
        create_customer,
        create_with_procedure,
        create_with_function,
        update_customer,
        delete_customer,
    ),
    components(
        schemas(
            CustomerData,
            MessageEnvelope,
            CustomerEnvelope,
            CustomerListEnvelope,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "customers", description = "Customer record operations"),
        (name = "routines", description = "Creation through stored database routines"),
    )
)]
pub struct ApiDoc;
