use std::collections::HashMap;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro de domínio. Os handlers o convertem em `ApiError` já traduzido.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Piscina não encontrada")]
    PoolNotFound,

    #[error("Orçamento não encontrado")]
    QuoteNotFound,

    #[error("Serviço não encontrado")]
    JobNotFound,

    #[error("Fatura não encontrada")]
    InvoiceNotFound,

    #[error("Técnico {0} não encontrado")]
    TechnicianNotFound(String),

    #[error("Rota {0} não encontrada")]
    RouteNotFound(String),

    #[error("Alerta não encontrado")]
    AlertNotFound,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Número de fatura {0} já usado")]
    InvoiceNumberTaken(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Nova ordem da rota inválida")]
    InvalidRouteOrder,

    #[error("Valor de pagamento inválido")]
    InvalidPaymentAmount,

    #[error("Parâmetros de consulta inválidos: {0}")]
    InvalidQuery(String),

    // Corpo JSON ou query string que o axum não conseguiu extrair
    #[error("Requisição malformada: {detail}")]
    MalformedRequest { status: StatusCode, detail: String },

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Erro pronto para ir para o cliente: status + mensagem traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    /// Código usado para buscar a mensagem no catálogo de idiomas.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::CustomerNotFound => "customer_not_found",
            AppError::PoolNotFound => "pool_not_found",
            AppError::QuoteNotFound => "quote_not_found",
            AppError::JobNotFound => "job_not_found",
            AppError::InvoiceNotFound => "invoice_not_found",
            AppError::TechnicianNotFound(_) => "technician_not_found",
            AppError::RouteNotFound(_) => "route_not_found",
            AppError::AlertNotFound => "alert_not_found",
            AppError::EmailAlreadyExists => "email_already_registered",
            AppError::InvoiceNumberTaken(_) => "invoice_number_taken",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::InvalidRouteOrder => "invalid_route_order",
            AppError::InvalidPaymentAmount => "invalid_payment_amount",
            AppError::InvalidQuery(_) => "invalid_query",
            AppError::MalformedRequest { .. } => "malformed_request",
            AppError::FontNotFound(_) => "font_not_found",
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidRouteOrder
            | AppError::InvalidPaymentAmount
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::CustomerNotFound
            | AppError::PoolNotFound
            | AppError::QuoteNotFound
            | AppError::JobNotFound
            | AppError::InvoiceNotFound
            | AppError::TechnicianNotFound(_)
            | AppError::RouteNotFound(_)
            | AppError::AlertNotFound => StatusCode::NOT_FOUND,
            AppError::MalformedRequest { status, .. } => *status,
            AppError::EmailAlreadyExists | AppError::InvoiceNumberTaken(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status();
        let lang = locale.0.as_str();
        let code = self.code();

        let (error, details) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                (i18n.translate(lang, code), Some(json!(details)))
            }
            AppError::TechnicianNotFound(ref id) | AppError::RouteNotFound(ref id) => {
                (i18n.translate_with(lang, code, &[("id", id)]), None)
            }
            AppError::InvalidQuery(ref detail) | AppError::MalformedRequest { ref detail, .. } => {
                (i18n.translate_with(lang, code, &[("detail", detail)]), None)
            }
            AppError::InvoiceNumberTaken(ref number) => {
                (i18n.translate_with(lang, code, &[("number", number)]), None)
            }
            AppError::FontNotFound(ref dir) => {
                tracing::error!("🔥 Fontes do PDF ausentes em {}", dir);
                (i18n.translate_with(lang, code, &[("dir", dir)]), None)
            }
            ref e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (i18n.translate(lang, code), None)
            }
            _ => (i18n.translate(lang, code), None),
        };

        ApiError { status, error, details }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };

        if self.status == StatusCode::UNAUTHORIZED {
            return (self.status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response();
        }

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "required"))]
        name: String,
    }

    fn en() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let store = I18nStore::load().unwrap();
        let api = AppError::CustomerNotFound.to_api_error(&en(), &store);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Customer not found");
        assert!(api.details.is_none());
    }

    #[test]
    fn test_route_not_found_includes_id() {
        let store = I18nStore::load().unwrap();
        let api = AppError::RouteNotFound("route-abc".into()).to_api_error(&en(), &store);
        assert_eq!(api.error, "Route with id route-abc not found");
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let store = I18nStore::load().unwrap();
        let errors = Payload { name: String::new() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&en(), &store);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details.unwrap()["name"][0], "required");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let store = I18nStore::load().unwrap();
        let api = AppError::InternalServerError(anyhow::anyhow!("segredo do banco"))
            .to_api_error(&en(), &store);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("segredo"));
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::EmailAlreadyExists.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_duplicate_invoice_number_is_a_conflict() {
        let store = I18nStore::load().unwrap();
        let api = AppError::InvoiceNumberTaken("INV-2025-004".into()).to_api_error(&en(), &store);
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.error, "Invoice number INV-2025-004 is already in use");
    }

    #[test]
    fn test_malformed_request_keeps_rejection_status() {
        let store = I18nStore::load().unwrap();
        let err = AppError::MalformedRequest {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "missing field `name`".into(),
        };
        let api = err.to_api_error(&Locale("pt".into()), &store);
        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.error, "Requisição inválida: missing field `name`");
    }

    #[test]
    fn test_unauthorized_response_sets_www_authenticate() {
        let store = I18nStore::load().unwrap();
        let response = AppError::InvalidToken.to_api_error(&en(), &store).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }
}
