// src/handlers/portal.rs
// Rotas do cliente autenticado. O `CurrentCustomer` já devolve 401 sem token válido.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::invoices::pdf_response,
    middleware::{auth::CurrentCustomer, i18n::Locale},
    models::{invoice::Invoice, portal::*},
};

// GET /api/portal/pools
#[utoipa::path(
    get,
    path = "/api/portal/pools",
    tag = "Portal",
    responses(
        (status = 200, description = "Piscinas do cliente", body = PortalPools),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_pools(
    State(app_state): State<AppState>,
    CurrentCustomer(customer): CurrentCustomer,
) -> Json<PortalPools> {
    Json(app_state.portal_service.pools(customer))
}

// GET /api/portal/invoices
#[utoipa::path(
    get,
    path = "/api/portal/invoices",
    tag = "Portal",
    responses(
        (status = 200, description = "Faturas do cliente com resumo", body = PortalInvoices),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_invoices(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentCustomer(customer): CurrentCustomer,
) -> Result<impl IntoResponse, ApiError> {
    let invoices = app_state
        .portal_service
        .invoices(&app_state.db_pool, &customer)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoices)))
}

// GET /api/portal/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/portal/invoices/{id}",
    tag = "Portal",
    params(("id" = String, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura do cliente", body = Invoice),
        (status = 401, description = "Token ausente ou inválido"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentCustomer(customer): CurrentCustomer,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = app_state
        .portal_service
        .invoice(&app_state.db_pool, &customer, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoice)))
}

// GET /api/portal/invoices/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/portal/invoices/{id}/pdf",
    tag = "Portal",
    params(("id" = String, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "PDF da fatura", content_type = "application/pdf"),
        (status = 401, description = "Token ausente ou inválido"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_invoice_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentCustomer(customer): CurrentCustomer,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let invoice = app_state
        .portal_service
        .invoice(&app_state.db_pool, &customer, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    pdf_response(&app_state, &locale, invoice).await
}

// GET /api/portal/jobs
#[utoipa::path(
    get,
    path = "/api/portal/jobs",
    tag = "Portal",
    responses(
        (status = 200, description = "Serviços do cliente com resumo", body = PortalJobs),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_jobs(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentCustomer(customer): CurrentCustomer,
) -> Result<impl IntoResponse, ApiError> {
    let jobs = app_state
        .portal_service
        .jobs(&app_state.db_pool, &customer)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(jobs)))
}

// GET /api/portal/quotes
#[utoipa::path(
    get,
    path = "/api/portal/quotes",
    tag = "Portal",
    responses(
        (status = 200, description = "Orçamentos do cliente com resumo", body = PortalQuotes),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_quotes(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentCustomer(customer): CurrentCustomer,
) -> Result<impl IntoResponse, ApiError> {
    let quotes = app_state
        .portal_service
        .quotes(&app_state.db_pool, &customer)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quotes)))
}

// GET /api/portal/service-history
#[utoipa::path(
    get,
    path = "/api/portal/service-history",
    tag = "Portal",
    responses(
        (status = 200, description = "Leituras de todas as piscinas, mais recentes primeiro", body = PortalServiceHistory),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_service_history(
    State(app_state): State<AppState>,
    CurrentCustomer(customer): CurrentCustomer,
) -> Json<PortalServiceHistory> {
    Json(app_state.portal_service.service_history(&customer))
}

// GET /api/portal/alerts
#[utoipa::path(
    get,
    path = "/api/portal/alerts",
    tag = "Portal",
    responses(
        (status = 200, description = "Alertas do cliente com resumo", body = PortalAlerts),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_alerts(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentCustomer(customer): CurrentCustomer,
) -> Result<impl IntoResponse, ApiError> {
    let alerts = app_state
        .portal_service
        .alerts(&app_state.db_pool, &customer)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(alerts)))
}
