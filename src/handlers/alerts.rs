// src/handlers/alerts.rs

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
    middleware::{extract::{ApiJson, ApiQuery}, i18n::Locale},
    models::alert::{Alert, AlertListQuery, AlertStats, CreateAlertPayload, UpdateAlertPayload},
};

// GET /api/alerts
#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "Alerts",
    params(AlertListQuery),
    responses((status = 200, description = "Alertas filtrados", body = Vec<Alert>))
)]
pub async fn list_alerts(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiQuery(filter): ApiQuery<AlertListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let alerts = app_state
        .alert_service
        .list(&app_state.db_pool, &filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(alerts)))
}

// GET /api/alerts/stats/summary
#[utoipa::path(
    get,
    path = "/api/alerts/stats/summary",
    tag = "Alerts",
    responses((status = 200, description = "Resumo dos alertas", body = AlertStats))
)]
pub async fn alert_stats(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .alert_service
        .stats(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/alerts/{id}
#[utoipa::path(
    get,
    path = "/api/alerts/{id}",
    tag = "Alerts",
    params(("id" = String, Path, description = "ID do alerta")),
    responses(
        (status = 200, description = "Alerta", body = Alert),
        (status = 404, description = "Alerta não encontrado")
    )
)]
pub async fn get_alert(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let alert = app_state
        .alert_service
        .get(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(alert)))
}

// POST /api/alerts
#[utoipa::path(
    post,
    path = "/api/alerts",
    tag = "Alerts",
    request_body = CreateAlertPayload,
    responses(
        (status = 200, description = "Alerta criado", body = Alert),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_alert(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<CreateAlertPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let alert = app_state
        .alert_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(alert)))
}

// PUT /api/alerts/{id}
#[utoipa::path(
    put,
    path = "/api/alerts/{id}",
    tag = "Alerts",
    params(("id" = String, Path, description = "ID do alerta")),
    request_body = UpdateAlertPayload,
    responses(
        (status = 200, description = "Alerta atualizado", body = Alert),
        (status = 404, description = "Alerta não encontrado")
    )
)]
pub async fn update_alert(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateAlertPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let alert = app_state
        .alert_service
        .update(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(alert)))
}

// POST /api/alerts/{id}/resolve
#[utoipa::path(
    post,
    path = "/api/alerts/{id}/resolve",
    tag = "Alerts",
    params(("id" = String, Path, description = "ID do alerta")),
    responses(
        (status = 200, description = "Alerta resolvido", body = Alert),
        (status = 404, description = "Alerta não encontrado")
    )
)]
pub async fn resolve_alert(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let alert = app_state
        .alert_service
        .resolve(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(alert)))
}

// DELETE /api/alerts/{id}
#[utoipa::path(
    delete,
    path = "/api/alerts/{id}",
    tag = "Alerts",
    params(("id" = String, Path, description = "ID do alerta")),
    responses(
        (status = 200, description = "Alerta removido", body = MessageResponse),
        (status = 404, description = "Alerta não encontrado")
    )
)]
pub async fn delete_alert(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .alert_service
        .delete(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Alert deleted successfully"))))
}
