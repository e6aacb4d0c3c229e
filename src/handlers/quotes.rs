// src/handlers/quotes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::MessageResponse,
    middleware::{extract::{ApiJson, ApiQuery}, i18n::Locale},
    models::quote::{
        ApproveQuotePayload, CreateQuotePayload, Quote, QuoteActionResponse, QuoteStatus, UpdateQuotePayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteListQuery {
    pub status: Option<QuoteStatus>,
}

// GET /api/quotes
#[utoipa::path(
    get,
    path = "/api/quotes",
    tag = "Quotes",
    params(QuoteListQuery),
    responses((status = 200, description = "Orçamentos", body = Vec<Quote>))
)]
pub async fn list_quotes(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiQuery(query): ApiQuery<QuoteListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let quotes = app_state
        .quote_service
        .list(&app_state.db_pool, query.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quotes)))
}

// GET /api/quotes/by-customer/{customer_id}
#[utoipa::path(
    get,
    path = "/api/quotes/by-customer/{customer_id}",
    tag = "Quotes",
    params(("customer_id" = String, Path, description = "ID do cliente")),
    responses((status = 200, description = "Orçamentos do cliente", body = Vec<Quote>))
)]
pub async fn list_quotes_by_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let quotes = app_state
        .quote_service
        .list_by_customer(&app_state.db_pool, &customer_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quotes)))
}

// GET /api/quotes/{id}
#[utoipa::path(
    get,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    params(("id" = String, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn get_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state
        .quote_service
        .get(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}

// POST /api/quotes
#[utoipa::path(
    post,
    path = "/api/quotes",
    tag = "Quotes",
    request_body = CreateQuotePayload,
    responses(
        (status = 200, description = "Orçamento criado", body = Quote),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<CreateQuotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let quote = app_state
        .quote_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}

// PUT /api/quotes/{id}
#[utoipa::path(
    put,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    params(("id" = String, Path, description = "ID do orçamento")),
    request_body = UpdateQuotePayload,
    responses(
        (status = 200, description = "Orçamento atualizado", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn update_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateQuotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let quote = app_state
        .quote_service
        .update(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}

// DELETE /api/quotes/{id}
#[utoipa::path(
    delete,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    params(("id" = String, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento removido", body = MessageResponse),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn delete_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .quote_service
        .delete(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Quote deleted successfully"))))
}

// POST /api/quotes/{id}/approve
#[utoipa::path(
    post,
    path = "/api/quotes/{id}/approve",
    tag = "Quotes",
    params(("id" = String, Path, description = "ID do orçamento")),
    request_body(content = Option<ApproveQuotePayload>, description = "Opcional: dados do serviço a criar"),
    responses(
        (status = 200, description = "Orçamento aprovado", body = QuoteActionResponse),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn approve_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    payload: Option<ApiJson<ApproveQuotePayload>>,
) -> Result<impl IntoResponse, ApiError> {
    // Sem corpo = só aprova
    let payload = payload.map(|ApiJson(p)| p).unwrap_or_default();
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (quote, job) = app_state
        .quote_service
        .approve(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(QuoteActionResponse { message: "Quote approved".to_string(), quote, job }),
    ))
}

// POST /api/quotes/{id}/decline
#[utoipa::path(
    post,
    path = "/api/quotes/{id}/decline",
    tag = "Quotes",
    params(("id" = String, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento recusado", body = QuoteActionResponse),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn decline_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state
        .quote_service
        .decline(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(QuoteActionResponse { message: "Quote declined".to_string(), quote, job: None }),
    ))
}
