// src/handlers/jobs.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::MessageResponse,
    middleware::{extract::{ApiJson, ApiQuery}, i18n::Locale},
    models::{
        invoice::{Invoice, InvoiceFromJobPayload},
        job::{CompleteJobPayload, CreateJobPayload, Job, JobActionResponse, JobListQuery, UpdateJobPayload},
    },
};

// GET /api/jobs
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "Jobs",
    params(JobListQuery),
    responses((status = 200, description = "Serviços", body = Vec<Job>))
)]
pub async fn list_jobs(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiQuery(query): ApiQuery<JobListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let jobs = app_state
        .job_service
        .list(&app_state.db_pool, query.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(jobs)))
}

// GET /api/jobs/by-date/{date}
#[utoipa::path(
    get,
    path = "/api/jobs/by-date/{date}",
    tag = "Jobs",
    params(("date" = String, Path, format = Date, description = "Data agendada (YYYY-MM-DD)")),
    responses((status = 200, description = "Serviços do dia", body = Vec<Job>))
)]
pub async fn list_jobs_by_date(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, ApiError> {
    let jobs = app_state
        .job_service
        .list_by_date(&app_state.db_pool, date)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(jobs)))
}

// GET /api/jobs/by-technician/{technician}
#[utoipa::path(
    get,
    path = "/api/jobs/by-technician/{technician}",
    tag = "Jobs",
    params(("technician" = String, Path, description = "Nome ou ID do técnico")),
    responses((status = 200, description = "Serviços do técnico", body = Vec<Job>))
)]
pub async fn list_jobs_by_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(technician): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let jobs = app_state
        .job_service
        .list_by_technician(&app_state.db_pool, &technician)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(jobs)))
}

// GET /api/jobs/by-customer/{customer_id}
#[utoipa::path(
    get,
    path = "/api/jobs/by-customer/{customer_id}",
    tag = "Jobs",
    params(("customer_id" = String, Path, description = "ID do cliente")),
    responses((status = 200, description = "Serviços do cliente", body = Vec<Job>))
)]
pub async fn list_jobs_by_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let jobs = app_state
        .job_service
        .list_by_customer(&app_state.db_pool, &customer_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(jobs)))
}

// GET /api/jobs/{id}
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço", body = Job),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn get_job(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let job = app_state
        .job_service
        .get(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(job)))
}

// POST /api/jobs
#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "Jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 200, description = "Serviço criado", body = Job),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_job(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<CreateJobPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let job = app_state
        .job_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(job)))
}

// PUT /api/jobs/{id}
#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "ID do serviço")),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Serviço atualizado", body = Job),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn update_job(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateJobPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let job = app_state
        .job_service
        .update(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(job)))
}

// DELETE /api/jobs/{id}
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço removido", body = MessageResponse),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn delete_job(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .job_service
        .delete(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Job deleted successfully"))))
}

// POST /api/jobs/{id}/start
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/start",
    tag = "Jobs",
    params(("id" = String, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço iniciado", body = JobActionResponse),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn start_job(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let job = app_state
        .job_service
        .start(&app_state.db_pool, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(JobActionResponse { message: "Job started".to_string(), job })))
}

// POST /api/jobs/{id}/complete
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/complete",
    tag = "Jobs",
    params(("id" = String, Path, description = "ID do serviço"), CompleteJobPayload),
    request_body(content = Option<CompleteJobPayload>, description = "Observações de conclusão (opcional)"),
    responses(
        (status = 200, description = "Serviço concluído", body = JobActionResponse),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn complete_job(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<CompleteJobPayload>,
    body: Option<ApiJson<CompleteJobPayload>>,
) -> Result<impl IntoResponse, ApiError> {
    // Aceita as observações pela query ou pelo corpo; o corpo tem prioridade
    let notes = body
        .and_then(|ApiJson(b)| b.completion_notes)
        .or(query.completion_notes);

    let job = app_state
        .job_service
        .complete(&app_state.db_pool, &id, notes)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(JobActionResponse { message: "Job completed".to_string(), job })))
}

// POST /api/jobs/{id}/invoice
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/invoice",
    tag = "Jobs",
    params(("id" = String, Path, description = "ID do serviço")),
    request_body(content = Option<InvoiceFromJobPayload>, description = "Ajustes da fatura (opcional)"),
    responses(
        (status = 201, description = "Fatura gerada em rascunho", body = Invoice),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn create_job_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    payload: Option<ApiJson<InvoiceFromJobPayload>>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = payload.map(|ApiJson(p)| p).unwrap_or_default();
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let invoice = app_state
        .job_service
        .create_invoice(&app_state.db_pool, &id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(invoice)))
}
