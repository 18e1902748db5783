//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use customers_types::{
    ApiResponse, AppError, CustomerData, CustomerId, CustomerStore, FunctionInsertOutcome,
};

use crate::CustomerService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<S: CustomerStore> {
    pub service: CustomerService<S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

fn parse_id(raw: &str) -> Result<CustomerId, ApiError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid customer ID".into()).into())
}

fn not_found(id: CustomerId) -> ApiError {
    AppError::NotFound(format!("Customer with ID {} not found", id)).into()
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

/// List all customers.
#[tracing::instrument(skip(state))]
pub async fn list_customers<S: CustomerStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = state.service.list().await?;
    Ok(Json(ApiResponse::with_data(
        "Customer list fetched successfully",
        customers,
    )))
}

/// Create a customer with a direct insert.
#[tracing::instrument(skip(state, data))]
pub async fn create_customer<S: CustomerStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(data): Json<CustomerData>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.service.create_direct(data).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data("Customer created successfully", customer)),
    ))
}

/// Create a customer through the insert procedure.
#[tracing::instrument(skip(state, data))]
pub async fn create_with_procedure<S: CustomerStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(data): Json<CustomerData>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.create_via_procedure(data).await?;
    Ok(Json(ApiResponse::ok("Customer created with procedure")))
}

/// Create a customer through the insert function.
///
/// Responds with the submitted fields and the id the function produced.
#[tracing::instrument(skip(state, data))]
pub async fn create_with_function<S: CustomerStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(data): Json<CustomerData>,
) -> Result<Response, ApiError> {
    let submitted = CustomerData {
        id: None,
        name: data.name.clone(),
        balance: Some(data.balance.unwrap_or_default()),
    };

    match state.service.create_via_function(data).await? {
        FunctionInsertOutcome::Created(id) => Ok(Json(ApiResponse::with_data(
            "Customer created successfully",
            submitted.with_id(id),
        ))
        .into_response()),
        FunctionInsertOutcome::Rejected { .. } => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure("Failed to create customer.")),
        )
            .into_response()),
    }
}

/// Update a customer. Empty fields keep their stored values.
#[tracing::instrument(skip(state, data), fields(customer_id = %id))]
pub async fn update_customer<S: CustomerStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(data): Json<CustomerData>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = parse_id(&id)?;

    if !state.service.update(customer_id, data.clone()).await? {
        return Err(not_found(customer_id));
    }

    Ok(Json(ApiResponse::with_data(
        "Customer updated successfully",
        data.with_id(customer_id),
    )))
}

/// Delete a customer.
#[tracing::instrument(skip(state), fields(customer_id = %id))]
pub async fn delete_customer<S: CustomerStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = parse_id(&id)?;

    if !state.service.delete(customer_id).await? {
        return Err(not_found(customer_id));
    }

    Ok(Json(ApiResponse::ok("Customer deleted successfully")))
}
