// src/handlers/reports.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{extract::ApiQuery, i18n::Locale},
    models::reports::{
        CustomerStatsReport, DashboardStats, FinancialSummaryReport, JobsPerformanceReport, RevenueQuery,
        RevenueReport, TechnicianPerformanceReport,
    },
};

// GET /api/reports/revenue
#[utoipa::path(
    get,
    path = "/api/reports/revenue",
    tag = "Reports",
    params(RevenueQuery),
    responses(
        (status = 200, description = "Receita por período", body = RevenueReport),
        (status = 400, description = "Intervalo de datas inválido")
    )
)]
pub async fn revenue(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiQuery(query): ApiQuery<RevenueQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .report_service
        .revenue(&app_state.db_pool, &query)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/jobs-performance
#[utoipa::path(
    get,
    path = "/api/reports/jobs-performance",
    tag = "Reports",
    responses((status = 200, description = "Desempenho dos serviços", body = JobsPerformanceReport))
)]
pub async fn jobs_performance(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .report_service
        .jobs_performance(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/customer-stats
#[utoipa::path(
    get,
    path = "/api/reports/customer-stats",
    tag = "Reports",
    responses((status = 200, description = "Estatísticas de clientes", body = CustomerStatsReport))
)]
pub async fn customer_stats(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .report_service
        .customer_stats(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/technician-performance
#[utoipa::path(
    get,
    path = "/api/reports/technician-performance",
    tag = "Reports",
    responses((status = 200, description = "Desempenho por técnico", body = TechnicianPerformanceReport))
)]
pub async fn technician_performance(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .report_service
        .technician_performance(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/financial-summary
#[utoipa::path(
    get,
    path = "/api/reports/financial-summary",
    tag = "Reports",
    responses((status = 200, description = "Resumo financeiro", body = FinancialSummaryReport))
)]
pub async fn financial_summary(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .report_service
        .financial_summary(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/dashboard-stats
#[utoipa::path(
    get,
    path = "/api/reports/dashboard-stats",
    tag = "Reports",
    responses((status = 200, description = "Indicadores do painel", body = DashboardStats))
)]
pub async fn dashboard_stats(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .report_service
        .dashboard_stats(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stats)))
}
