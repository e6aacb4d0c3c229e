// src/models/auth.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::customer::{Customer, CustomerStatus};

// Login do portal, ligado a um cliente
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomerAuth {
    pub id: String,
    pub customer_id: String,
    pub email: String,

    #[serde(skip_serializing)] // nunca sai na resposta
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "cust-1")]
    pub customer_id: String,
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "john.anderson@email.com")]
    pub email: String,
    #[validate(length(min = 6, message = "password_too_short"))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "john.anderson@email.com")]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub customer_id: String,
    pub customer_name: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String, customer: &Customer) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
        }
    }
}

// "Claims" do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // ID do cliente
    pub exp: usize,
    pub iat: usize,
}

/// Resposta do `GET /auth/me`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: CustomerStatus,
    pub account_balance: Decimal,
    pub service_day: String,
    pub autopay: bool,
}

impl From<&Customer> for CustomerProfile {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            address: c.address.clone(),
            status: c.status,
            account_balance: c.account_balance,
            service_day: c.service_day.clone(),
            autopay: c.autopay,
        }
    }
}
