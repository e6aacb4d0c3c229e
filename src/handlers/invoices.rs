// src/handlers/invoices.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::MessageResponse,
    middleware::{extract::{ApiJson, ApiQuery}, i18n::Locale},
    models::invoice::{
        CreateInvoicePayload, Invoice, InvoiceActionResponse, InvoiceListQuery, PayInvoiceQuery,
        UpdateInvoicePayload,
    },
    services::invoice_service::payment_message,
};

// GET /api/invoices
#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Invoices",
    params(InvoiceListQuery),
    responses((status = 200, description = "Faturas", body = Vec<Invoice>))
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiQuery(query): ApiQuery<InvoiceListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let invoices = app_state
        .invoice_service
        .list(&app_state.db_pool, query.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoices)))
}

// GET /api/invoices/by-customer/{customer_id}
#[utoipa::path(
    get,
    path = "/api/invoices/by-customer/{customer_id}",
    tag = "Invoices",
    params(("customer_id" = String, Path, description = "ID do cliente")),
    responses((status = 200, description = "Faturas do cliente", body = Vec<Invoice>))
)]
pub async fn list_invoices_by_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let invoices = app_state
        .invoice_service
        .list_by_customer(&app_state.db_pool, &customer_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoices)))
}

// GET /api/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = String, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = app_state
        .invoice_service
        .get(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoice)))
}

// POST /api/invoices
#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Invoices",
    request_body = CreateInvoicePayload,
    responses(
        (status = 200, description = "Fatura criada", body = Invoice),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<CreateInvoicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let invoice = app_state
        .invoice_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoice)))
}

// PUT /api/invoices/{id}
#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = String, Path, description = "ID da fatura")),
    request_body = UpdateInvoicePayload,
    responses(
        (status = 200, description = "Fatura atualizada", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateInvoicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let invoice = app_state
        .invoice_service
        .update(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoice)))
}

// DELETE /api/invoices/{id}
#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = String, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura removida", body = MessageResponse),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .invoice_service
        .delete(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Invoice deleted successfully"))))
}

// POST /api/invoices/{id}/send
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/send",
    tag = "Invoices",
    params(("id" = String, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura enviada", body = InvoiceActionResponse),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn send_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = app_state
        .invoice_service
        .send(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(InvoiceActionResponse { message: "Invoice sent".to_string(), invoice })))
}

// POST /api/invoices/{id}/pay?amount=
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/pay",
    tag = "Invoices",
    params(("id" = String, Path, description = "ID da fatura"), PayInvoiceQuery),
    responses(
        (status = 200, description = "Pagamento registrado", body = InvoiceActionResponse),
        (status = 400, description = "Valor inválido"),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn pay_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<PayInvoiceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = app_state
        .invoice_service
        .record_payment(&app_state.db_pool, &id, query.amount)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(InvoiceActionResponse { message: payment_message(query.amount), invoice }),
    ))
}

// GET /api/invoices/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/invoices/{id}/pdf",
    tag = "Invoices",
    params(("id" = String, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "PDF da fatura", content_type = "application/pdf"),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn invoice_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let invoice = app_state
        .invoice_service
        .get(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    pdf_response(&app_state, &locale, invoice).await
}

/// Renderiza a fatura e monta os headers de download.
pub async fn pdf_response(app_state: &AppState, locale: &Locale, invoice: Invoice) -> Result<Response, ApiError> {
    let filename = format!("attachment; filename=\"{}.pdf\"", invoice.invoice_number);

    let pdf_bytes = app_state
        .document_service
        .invoice_pdf(invoice)
        .await
        .map_err(|app_err| app_err.to_api_error(locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, filename),
    ];

    Ok((headers, pdf_bytes).into_response())
}
