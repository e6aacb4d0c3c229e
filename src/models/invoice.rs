// src/models/invoice.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::{error::AppError, ids::new_id, math::money, validation::validate_not_negative};
use crate::models::quote::LineItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    #[schema(example = "inv-1a2b3c4d")]
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub job_id: Option<String>,
    pub quote_id: Option<String>,
    #[schema(example = "INV-2025-001")]
    pub invoice_number: String,
    pub status: InvoiceStatus,
    pub line_items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub balance_due: Decimal,
    #[schema(value_type = String, format = Date, example = "2025-01-15")]
    pub issue_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-02-14")]
    pub due_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// `balance_due = total - paid_amount`. Saldo zerado (ou negativo) quita a fatura.
    pub fn recompute_balance(&mut self) {
        self.balance_due = money(self.total - self.paid_amount);
        if self.balance_due <= Decimal::ZERO {
            self.status = InvoiceStatus::Paid;
            self.paid_date = Some(Utc::now().date_naive());
        }
    }

    pub fn record_payment(&mut self, amount: Decimal) -> Result<(), AppError> {
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidPaymentAmount);
        }
        self.paid_amount = money(self.paid_amount + amount);
        self.recompute_balance();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn send(&mut self) {
        self.status = InvoiceStatus::Sent;
        self.updated_at = Utc::now();
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateInvoicePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "cust-1")]
    pub customer_id: String,
    #[validate(length(min = 1, message = "required"))]
    pub customer_name: String,
    pub job_id: Option<String>,
    pub quote_id: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "INV-2025-001")]
    pub invoice_number: String,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    #[validate(nested)]
    pub line_items: Vec<LineItem>,
    #[validate(custom(function = "validate_not_negative"))]
    pub subtotal: Decimal,
    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub tax: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    pub total: Decimal,
    #[schema(value_type = String, format = Date)]
    pub issue_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

impl CreateInvoicePayload {
    pub fn into_invoice(self) -> Invoice {
        let now = Utc::now();
        let total = money(self.total);
        Invoice {
            id: new_id("inv"),
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            job_id: self.job_id,
            quote_id: self.quote_id,
            invoice_number: self.invoice_number,
            status: self.status,
            line_items: self.line_items,
            subtotal: money(self.subtotal),
            tax: money(self.tax),
            total,
            // Fatura nova: nada pago ainda
            paid_amount: Decimal::ZERO,
            balance_due: total,
            issue_date: self.issue_date,
            due_date: self.due_date,
            paid_date: None,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateInvoicePayload {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub job_id: Option<String>,
    pub quote_id: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub invoice_number: Option<String>,
    pub status: Option<InvoiceStatus>,
    #[validate(nested)]
    pub line_items: Option<Vec<LineItem>>,
    #[validate(custom(function = "validate_not_negative"))]
    pub subtotal: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub tax: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub total: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub paid_amount: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub issue_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateInvoicePayload {
    pub fn apply(self, invoice: &mut Invoice) {
        let recompute = self.total.is_some() || self.paid_amount.is_some();

        if let Some(v) = self.customer_id { invoice.customer_id = v; }
        if let Some(v) = self.customer_name { invoice.customer_name = v; }
        if let Some(v) = self.job_id { invoice.job_id = Some(v); }
        if let Some(v) = self.quote_id { invoice.quote_id = Some(v); }
        if let Some(v) = self.invoice_number { invoice.invoice_number = v; }
        if let Some(v) = self.status { invoice.status = v; }
        if let Some(v) = self.line_items { invoice.line_items = v; }
        if let Some(v) = self.subtotal { invoice.subtotal = money(v); }
        if let Some(v) = self.tax { invoice.tax = money(v); }
        if let Some(v) = self.total { invoice.total = money(v); }
        if let Some(v) = self.paid_amount { invoice.paid_amount = money(v); }
        if let Some(v) = self.issue_date { invoice.issue_date = v; }
        if let Some(v) = self.due_date { invoice.due_date = v; }
        if let Some(v) = self.paid_date { invoice.paid_date = Some(v); }
        if let Some(v) = self.notes { invoice.notes = Some(v); }

        if recompute {
            invoice.recompute_balance();
        }
        invoice.updated_at = Utc::now();
    }
}

/// Corpo opcional do `POST /jobs/{id}/invoice`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct InvoiceFromJobPayload {
    /// Sem número informado, o serviço gera `INV-<ano>-<seq>`.
    pub invoice_number: Option<String>,
    /// Itens explícitos; na falta deles usamos os itens do orçamento vinculado.
    #[validate(nested)]
    pub line_items: Option<Vec<LineItem>>,
    /// Preço da linha única quando não há itens nem orçamento.
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 85.0)]
    pub amount: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub tax: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub issue_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceListQuery {
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PayInvoiceQuery {
    /// Valor pago, maior que zero.
    #[serde(with = "rust_decimal::serde::str")]
    #[param(value_type = f64, example = 150.0)]
    pub amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceActionResponse {
    #[schema(example = "Invoice sent")]
    pub message: String,
    pub invoice: Invoice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice() -> Invoice {
        serde_json::from_value::<CreateInvoicePayload>(serde_json::json!({
            "customer_id": "cust-1",
            "customer_name": "John Anderson",
            "invoice_number": "INV-2025-001",
            "line_items": [
                {"description": "Weekly Service", "quantity": 4, "unit_price": 85.0, "total": 340.0}
            ],
            "subtotal": 340.0,
            "tax": 27.2,
            "total": 367.2,
            "issue_date": "2025-01-01",
            "due_date": "2025-01-31"
        }))
        .unwrap()
        .into_invoice()
    }

    #[test]
    fn test_create_sets_balance_to_total() {
        let inv = invoice();
        assert!(inv.id.starts_with("inv-"));
        assert_eq!(inv.status, InvoiceStatus::Draft);
        assert_eq!(inv.paid_amount, Decimal::ZERO);
        assert_eq!(inv.balance_due, dec!(367.20));
        assert!(inv.paid_date.is_none());
    }

    #[test]
    fn test_partial_payment_keeps_status() {
        let mut inv = invoice();
        inv.send();
        inv.record_payment(dec!(100)).unwrap();
        assert_eq!(inv.paid_amount, dec!(100));
        assert_eq!(inv.balance_due, dec!(267.20));
        assert_eq!(inv.status, InvoiceStatus::Sent);
    }

    #[test]
    fn test_full_payment_marks_paid() {
        let mut inv = invoice();
        inv.record_payment(dec!(367.20)).unwrap();
        assert!(inv.is_paid());
        assert_eq!(inv.balance_due, Decimal::ZERO);
        assert_eq!(inv.paid_date, Some(Utc::now().date_naive()));
    }

    #[test]
    fn test_rejects_non_positive_payment() {
        let mut inv = invoice();
        assert!(matches!(inv.record_payment(Decimal::ZERO), Err(AppError::InvalidPaymentAmount)));
        assert!(matches!(inv.record_payment(dec!(-5)), Err(AppError::InvalidPaymentAmount)));
        assert_eq!(inv.paid_amount, Decimal::ZERO);
    }

    #[test]
    fn test_update_recomputes_balance_when_total_changes() {
        let mut inv = invoice();
        UpdateInvoicePayload { total: Some(dec!(400)), ..Default::default() }.apply(&mut inv);
        assert_eq!(inv.balance_due, dec!(400));
        assert_eq!(inv.status, InvoiceStatus::Draft);

        UpdateInvoicePayload { paid_amount: Some(dec!(400)), ..Default::default() }.apply(&mut inv);
        assert!(inv.is_paid());
    }

    #[test]
    fn test_update_without_money_fields_keeps_balance() {
        let mut inv = invoice();
        inv.balance_due = dec!(1);
        UpdateInvoicePayload { notes: Some("call first".into()), ..Default::default() }.apply(&mut inv);
        assert_eq!(inv.balance_due, dec!(1));
    }

    #[test]
    fn test_pay_query_parses_exact_decimal() {
        let q: PayInvoiceQuery = serde_json::from_value(serde_json::json!({"amount": "156.60"})).unwrap();
        assert_eq!(q.amount, dec!(156.60));
    }
}
