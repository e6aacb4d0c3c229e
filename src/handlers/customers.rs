// src/handlers/customers.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::MessageResponse,
    middleware::{extract::ApiJson, i18n::Locale},
    models::customer::{
        ChemReading, CreateCustomerPayload, CreatePoolPayload, CreateReadingPayload, Customer,
        UpdateCustomerPayload,
    },
};

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "Clientes com suas piscinas", body = Vec<Customer>)
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let customers = app_state
        .customer_service
        .list(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = app_state
        .customer_service
        .get(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customer)))
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Customers",
    request_body = CreateCustomerPayload,
    responses(
        (status = 200, description = "Cliente criado", body = Customer),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<CreateCustomerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let customer = app_state
        .customer_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customer)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "ID do cliente")),
    request_body = UpdateCustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let customer = app_state
        .customer_service
        .update(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente removido", body = MessageResponse),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .customer_service
        .delete(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Customer deleted successfully"))))
}

// POST /api/customers/{id}/pools
#[utoipa::path(
    post,
    path = "/api/customers/{id}/pools",
    tag = "Customers",
    params(("id" = String, Path, description = "ID do cliente")),
    request_body = CreatePoolPayload,
    responses(
        (status = 200, description = "Piscina adicionada", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn add_pool(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CreatePoolPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let customer = app_state
        .customer_service
        .add_pool(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customer)))
}

// POST /api/customers/{id}/pools/{pool_id}/readings
#[utoipa::path(
    post,
    path = "/api/customers/{id}/pools/{pool_id}/readings",
    tag = "Customers",
    params(
        ("id" = String, Path, description = "ID do cliente"),
        ("pool_id" = String, Path, description = "ID da piscina")
    ),
    request_body = CreateReadingPayload,
    responses(
        (status = 200, description = "Leitura registrada", body = Customer),
        (status = 404, description = "Cliente ou piscina não encontrados")
    )
)]
pub async fn add_reading(
    State(app_state): State<AppState>,
    locale: Locale,
    Path((id, pool_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<CreateReadingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let customer = app_state
        .customer_service
        .add_reading(&app_state.db_pool, &id, &pool_id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customer)))
}

// GET /api/customers/{id}/pools/{pool_id}/readings
#[utoipa::path(
    get,
    path = "/api/customers/{id}/pools/{pool_id}/readings",
    tag = "Customers",
    params(
        ("id" = String, Path, description = "ID do cliente"),
        ("pool_id" = String, Path, description = "ID da piscina")
    ),
    responses(
        (status = 200, description = "Leituras da piscina", body = Vec<ChemReading>),
        (status = 404, description = "Cliente ou piscina não encontrados")
    )
)]
pub async fn list_readings(
    State(app_state): State<AppState>,
    locale: Locale,
    Path((id, pool_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let readings = app_state
        .customer_service
        .list_readings(&app_state.db_pool, &id, &pool_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(readings)))
}
