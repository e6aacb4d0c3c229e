// src/handlers/technicians.rs

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
    middleware::{extract::ApiJson, i18n::Locale},
    models::technician::{CreateTechnicianPayload, Technician, UpdateTechnicianPayload},
};

// GET /api/technicians
#[utoipa::path(
    get,
    path = "/api/technicians",
    tag = "Technicians",
    responses((status = 200, description = "Técnicos", body = Vec<Technician>))
)]
pub async fn list_technicians(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let technicians = app_state
        .technician_service
        .list(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(technicians)))
}

// GET /api/technicians/{id}
#[utoipa::path(
    get,
    path = "/api/technicians/{id}",
    tag = "Technicians",
    params(("id" = String, Path, description = "ID do técnico")),
    responses(
        (status = 200, description = "Técnico", body = Technician),
        (status = 404, description = "Técnico não encontrado")
    )
)]
pub async fn get_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let technician = app_state
        .technician_service
        .get(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(technician)))
}

// POST /api/technicians
#[utoipa::path(
    post,
    path = "/api/technicians",
    tag = "Technicians",
    request_body = CreateTechnicianPayload,
    responses(
        (status = 201, description = "Técnico criado", body = Technician),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<CreateTechnicianPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let technician = app_state
        .technician_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(technician)))
}

// PUT /api/technicians/{id}
#[utoipa::path(
    put,
    path = "/api/technicians/{id}",
    tag = "Technicians",
    params(("id" = String, Path, description = "ID do técnico")),
    request_body = UpdateTechnicianPayload,
    responses(
        (status = 200, description = "Técnico atualizado", body = Technician),
        (status = 404, description = "Técnico não encontrado")
    )
)]
pub async fn update_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateTechnicianPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let technician = app_state
        .technician_service
        .update(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(technician)))
}

// DELETE /api/technicians/{id}
#[utoipa::path(
    delete,
    path = "/api/technicians/{id}",
    tag = "Technicians",
    params(("id" = String, Path, description = "ID do técnico")),
    responses(
        (status = 204, description = "Técnico removido"),
        (status = 404, description = "Técnico não encontrado")
    )
)]
pub async fn delete_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .technician_service
        .delete(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
