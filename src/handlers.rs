pub mod alerts;
pub mod auth;
pub mod customers;
pub mod invoices;
pub mod jobs;
pub mod portal;
pub mod quotes;
pub mod reports;
pub mod routes;
pub mod technicians;

use serde::Serialize;
use utoipa::ToSchema;

/// Resposta simples `{"message": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Customer deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
