// src/handlers/routes.rs

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
    middleware::{extract::{ApiJson, ApiQuery}, i18n::Locale},
    models::route::{AddJobQuery, CreateRoutePayload, ReorderRoutePayload, Route, RouteListQuery, UpdateRoutePayload},
};

// GET /api/routes
#[utoipa::path(
    get,
    path = "/api/routes",
    tag = "Routes",
    params(RouteListQuery),
    responses((status = 200, description = "Rotas", body = Vec<Route>))
)]
pub async fn list_routes(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiQuery(query): ApiQuery<RouteListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let routes = app_state
        .route_service
        .list(&app_state.db_pool, query.day.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(routes)))
}

// GET /api/routes/by-day/{day}
#[utoipa::path(
    get,
    path = "/api/routes/by-day/{day}",
    tag = "Routes",
    params(("day" = String, Path, description = "Dia da semana, ex: Monday")),
    responses((status = 200, description = "Rotas do dia", body = Vec<Route>))
)]
pub async fn list_routes_by_day(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(day): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let routes = app_state
        .route_service
        .list(&app_state.db_pool, Some(&day))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(routes)))
}

// GET /api/routes/by-technician/{technician_id}
#[utoipa::path(
    get,
    path = "/api/routes/by-technician/{technician_id}",
    tag = "Routes",
    params(("technician_id" = String, Path, description = "ID do técnico")),
    responses((status = 200, description = "Rotas do técnico", body = Vec<Route>))
)]
pub async fn list_routes_by_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(technician_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let routes = app_state
        .route_service
        .list_by_technician(&app_state.db_pool, &technician_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(routes)))
}

// GET /api/routes/{id}
#[utoipa::path(
    get,
    path = "/api/routes/{id}",
    tag = "Routes",
    params(("id" = String, Path, description = "ID da rota")),
    responses(
        (status = 200, description = "Rota", body = Route),
        (status = 404, description = "Rota não encontrada")
    )
)]
pub async fn get_route(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let route = app_state
        .route_service
        .get(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(route)))
}

// POST /api/routes
#[utoipa::path(
    post,
    path = "/api/routes",
    tag = "Routes",
    request_body = CreateRoutePayload,
    responses(
        (status = 201, description = "Rota criada", body = Route),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_route(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<CreateRoutePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let route = app_state
        .route_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(route)))
}

// PUT /api/routes/{id}
#[utoipa::path(
    put,
    path = "/api/routes/{id}",
    tag = "Routes",
    params(("id" = String, Path, description = "ID da rota")),
    request_body = UpdateRoutePayload,
    responses(
        (status = 200, description = "Rota atualizada", body = Route),
        (status = 404, description = "Rota não encontrada")
    )
)]
pub async fn update_route(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateRoutePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let route = app_state
        .route_service
        .update(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(route)))
}

// DELETE /api/routes/{id}
#[utoipa::path(
    delete,
    path = "/api/routes/{id}",
    tag = "Routes",
    params(("id" = String, Path, description = "ID da rota")),
    responses(
        (status = 204, description = "Rota removida"),
        (status = 404, description = "Rota não encontrada")
    )
)]
pub async fn delete_route(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .route_service
        .delete(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/routes/{id}/add-job?job_id=
#[utoipa::path(
    post,
    path = "/api/routes/{id}/add-job",
    tag = "Routes",
    params(("id" = String, Path, description = "ID da rota"), AddJobQuery),
    responses(
        (status = 200, description = "Serviço incluído (idempotente)", body = Route),
        (status = 404, description = "Rota não encontrada")
    )
)]
pub async fn add_job_to_route(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<AddJobQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let route = app_state
        .route_service
        .add_job(&app_state.db_pool, &id, &query.job_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(route)))
}

// DELETE /api/routes/{id}/remove-job/{job_id}
#[utoipa::path(
    delete,
    path = "/api/routes/{id}/remove-job/{job_id}",
    tag = "Routes",
    params(
        ("id" = String, Path, description = "ID da rota"),
        ("job_id" = String, Path, description = "ID do serviço")
    ),
    responses(
        (status = 200, description = "Serviço retirado (idempotente)", body = Route),
        (status = 404, description = "Rota não encontrada")
    )
)]
pub async fn remove_job_from_route(
    State(app_state): State<AppState>,
    locale: Locale,
    Path((id, job_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let route = app_state
        .route_service
        .remove_job(&app_state.db_pool, &id, &job_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(route)))
}

// PUT /api/routes/{id}/reorder
#[utoipa::path(
    put,
    path = "/api/routes/{id}/reorder",
    tag = "Routes",
    params(("id" = String, Path, description = "ID da rota")),
    request_body = ReorderRoutePayload,
    responses(
        (status = 200, description = "Ordem atualizada", body = Route),
        (status = 400, description = "A nova lista não é uma permutação dos serviços atuais"),
        (status = 404, description = "Rota não encontrada")
    )
)]
pub async fn reorder_route(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ReorderRoutePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let route = app_state
        .route_service
        .reorder(&app_state.db_pool, &id, payload.jobs)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(route)))
}
