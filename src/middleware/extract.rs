// src/middleware/extract.rs

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, OptionalFromRequest, Query, Request,
    },
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

/// `Json` cuja rejeição sai no mesmo corpo `{"error", "details"}` do resto da API.
pub struct ApiJson<T>(pub T);

/// `Query` com a rejeição no formato da API.
pub struct ApiQuery<T>(pub T);

fn request_locale(req: &Request) -> Locale {
    Locale::from_header(
        req.headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok()),
    )
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::MalformedRequest { status: rejection.status(), detail: rejection.body_text() }
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::MalformedRequest { status: rejection.status(), detail: rejection.body_text() }
}

impl<T> FromRequest<AppState> for ApiJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let locale = request_locale(&req);

        <Json<T> as FromRequest<AppState>>::from_request(req, state)
            .await
            .map(|Json(value)| ApiJson(value))
            .map_err(|rejection| json_rejection(rejection).to_api_error(&locale, &state.i18n_store))
    }
}

// Sem `Content-Type` = sem corpo; corpo presente e inválido ainda é erro
impl<T> OptionalFromRequest<AppState> for ApiJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Option<Self>, Self::Rejection> {
        let locale = request_locale(&req);

        <Json<T> as OptionalFromRequest<AppState>>::from_request(req, state)
            .await
            .map(|body| body.map(|Json(value)| ApiJson(value)))
            .map_err(|rejection| json_rejection(rejection).to_api_error(&locale, &state.i18n_store))
    }
}

impl<T> FromRequestParts<AppState> for ApiQuery<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Ok(locale) = Locale::from_request_parts(parts, state).await;

        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection| query_rejection(rejection).to_api_error(&locale, &state.i18n_store))
    }
}
