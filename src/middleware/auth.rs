// src/middleware/auth.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::customer::Customer,
};

// Extrator do portal: exige `Authorization: Bearer <token>` de um cliente existente
pub struct CurrentCustomer(pub Customer);

impl FromRequestParts<AppState> for CurrentCustomer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Ok(locale) = Locale::from_request_parts(parts, state).await;

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::InvalidToken.to_api_error(&locale, &state.i18n_store))?;

        let customer = state
            .auth_service
            .validate_token(&state.db_pool, bearer.token())
            .await
            .map_err(|e| e.to_api_error(&locale, &state.i18n_store))?;

        Ok(CurrentCustomer(customer))
    }
}
