// src/models/quote.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{ids::new_id, validation::validate_not_negative};
use crate::models::job::Job;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "quote_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Approved,
    Declined,
}

/// Linha de orçamento/fatura. O `total` vem do cliente (não é recalculado).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LineItem {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Pool Filter Replacement")]
    pub description: String,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 1)]
    pub quantity: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 150.0)]
    pub unit_price: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 150.0)]
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    #[schema(example = "quote-1a2b3c4d")]
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub status: QuoteStatus,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "2025-02-15")]
    pub valid_until: Option<NaiveDate>,
    // Preenchido quando a aprovação gerou um serviço
    pub job_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateQuotePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "cust-1")]
    pub customer_id: String,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "John Anderson")]
    pub customer_name: String,
    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<LineItem>,
    #[validate(custom(function = "validate_not_negative"))]
    pub subtotal: Decimal,
    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub tax: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    pub total: Decimal,
    pub notes: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub valid_until: Option<NaiveDate>,
}

impl CreateQuotePayload {
    pub fn into_quote(self) -> Quote {
        let now = Utc::now();
        Quote {
            id: new_id("quote"),
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            status: self.status,
            items: self.items,
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
            notes: self.notes,
            valid_until: self.valid_until,
            job_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateQuotePayload {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub status: Option<QuoteStatus>,
    #[validate(nested)]
    pub items: Option<Vec<LineItem>>,
    #[validate(custom(function = "validate_not_negative"))]
    pub subtotal: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub total: Option<Decimal>,
    pub notes: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub valid_until: Option<NaiveDate>,
}

impl UpdateQuotePayload {
    pub fn apply(self, quote: &mut Quote) {
        if let Some(v) = self.customer_id { quote.customer_id = v; }
        if let Some(v) = self.customer_name { quote.customer_name = v; }
        if let Some(v) = self.status { quote.status = v; }
        if let Some(v) = self.items { quote.items = v; }
        if let Some(v) = self.subtotal { quote.subtotal = v; }
        if let Some(v) = self.tax { quote.tax = v; }
        if let Some(v) = self.total { quote.total = v; }
        if let Some(v) = self.notes { quote.notes = Some(v); }
        if let Some(v) = self.valid_until { quote.valid_until = Some(v); }
        quote.updated_at = Utc::now();
    }
}

/// Corpo opcional do `POST /quotes/{id}/approve`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ApproveQuotePayload {
    #[serde(default)]
    pub create_job: bool,
    #[schema(value_type = Option<String>, format = Date, example = "2025-01-20")]
    pub scheduled_date: Option<NaiveDate>,
    #[schema(example = "09:00 AM")]
    pub scheduled_time: Option<String>,
    #[schema(example = "Equipment Installation")]
    pub service_type: Option<String>,
    pub technician: Option<String>,
    pub technician_id: Option<String>,
    pub customer_address: Option<String>,
    pub pools: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteActionResponse {
    #[schema(example = "Quote approved")]
    pub message: String,
    pub quote: Quote,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<Job>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payload() -> CreateQuotePayload {
        serde_json::from_value(serde_json::json!({
            "customer_id": "cust-1",
            "customer_name": "John Anderson",
            "items": [
                {"description": "Pool Filter Replacement", "quantity": 1, "unit_price": 150.0, "total": 150.0}
            ],
            "subtotal": 150.0,
            "tax": 12.0,
            "total": 162.0
        }))
        .unwrap()
    }

    #[test]
    fn test_new_quote_is_pending() {
        let p = payload();
        assert!(p.validate().is_ok());
        let quote = p.into_quote();
        assert!(quote.id.starts_with("quote-"));
        assert_eq!(quote.status, QuoteStatus::Pending);
        assert!(quote.job_id.is_none());
        assert_eq!(quote.items[0].total, dec!(150));
    }

    #[test]
    fn test_negative_line_item_is_rejected() {
        let mut p = payload();
        p.items[0].unit_price = dec!(-1);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_update_merges_fields() {
        let mut quote = payload().into_quote();
        UpdateQuotePayload {
            notes: Some("Includes labor".into()),
            total: Some(dec!(170)),
            ..Default::default()
        }
        .apply(&mut quote);
        assert_eq!(quote.total, dec!(170));
        assert_eq!(quote.notes.as_deref(), Some("Includes labor"));
        assert_eq!(quote.customer_name, "John Anderson");
    }

    #[test]
    fn test_action_response_omits_missing_job() {
        let resp = QuoteActionResponse {
            message: "Quote declined".into(),
            quote: payload().into_quote(),
            job: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("job").is_none());
        assert_eq!(json["quote"]["status"], "pending");
    }

    #[test]
    fn test_approve_payload_defaults() {
        let p: ApproveQuotePayload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(!p.create_job);
        assert!(p.scheduled_date.is_none());
    }
}
