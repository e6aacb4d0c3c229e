// src/db/invoice_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{types::Json, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::{
        invoice::{Invoice, InvoiceStatus},
        quote::LineItem,
    },
};

struct InvoiceRow {
    id: String,
    customer_id: String,
    customer_name: String,
    job_id: Option<String>,
    quote_id: Option<String>,
    invoice_number: String,
    status: InvoiceStatus,
    line_items: Json<Vec<LineItem>>,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    paid_amount: Decimal,
    balance_due: Decimal,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    paid_date: Option<NaiveDate>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Invoice {
            id: row.id,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            job_id: row.job_id,
            quote_id: row.quote_id,
            invoice_number: row.invoice_number,
            status: row.status,
            line_items: row.line_items.0,
            subtotal: row.subtotal,
            tax: row.tax,
            total: row.total,
            paid_amount: row.paid_amount,
            balance_due: row.balance_due,
            issue_date: row.issue_date,
            due_date: row.due_date,
            paid_date: row.paid_date,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// Número de fatura repetido vira InvoiceNumberTaken (409)
fn number_conflict(e: sqlx::Error, invoice_number: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::InvoiceNumberTaken(invoice_number.to_string());
        }
    }
    e.into()
}

#[derive(Clone, Default)]
pub struct InvoiceRepository;

impl InvoiceRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, inv: &Invoice) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            InvoiceRow,
            r#"
            INSERT INTO invoices (
                id, customer_id, customer_name, job_id, quote_id, invoice_number, status,
                line_items, subtotal, tax, total, paid_amount, balance_due, issue_date, due_date,
                paid_date, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING
                id, customer_id, customer_name, job_id, quote_id, invoice_number,
                status as "status: InvoiceStatus",
                line_items as "line_items: Json<Vec<LineItem>>",
                subtotal, tax, total, paid_amount, balance_due, issue_date, due_date,
                paid_date, notes, created_at, updated_at
            "#,
            inv.id,
            inv.customer_id,
            inv.customer_name,
            inv.job_id.as_deref(),
            inv.quote_id.as_deref(),
            inv.invoice_number,
            inv.status as InvoiceStatus,
            Json(&inv.line_items) as _,
            inv.subtotal,
            inv.tax,
            inv.total,
            inv.paid_amount,
            inv.balance_due,
            inv.issue_date,
            inv.due_date,
            inv.paid_date,
            inv.notes.as_deref(),
            inv.created_at,
            inv.updated_at
        )
        .fetch_one(executor)
        .await
        .map_err(|e| number_conflict(e, &inv.invoice_number))?;

        Ok(row.into())
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            InvoiceRow,
            r#"
            SELECT
                id, customer_id, customer_name, job_id, quote_id, invoice_number,
                status as "status: InvoiceStatus",
                line_items as "line_items: Json<Vec<LineItem>>",
                subtotal, tax, total, paid_amount, balance_due, issue_date, due_date,
                paid_date, notes, created_at, updated_at
            FROM invoices
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Invoice::from))
    }

    pub async fn find_by_id_for_update<'e, E>(&self, executor: E, id: &str) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            InvoiceRow,
            r#"
            SELECT
                id, customer_id, customer_name, job_id, quote_id, invoice_number,
                status as "status: InvoiceStatus",
                line_items as "line_items: Json<Vec<LineItem>>",
                subtotal, tax, total, paid_amount, balance_due, issue_date, due_date,
                paid_date, notes, created_at, updated_at
            FROM invoices
            WHERE id = $1
            FOR UPDATE
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Invoice::from))
    }

    /// Fatura do portal: só aparece se for do cliente.
    pub async fn find_for_customer<'e, E>(
        &self,
        executor: E,
        id: &str,
        customer_id: &str,
    ) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            InvoiceRow,
            r#"
            SELECT
                id, customer_id, customer_name, job_id, quote_id, invoice_number,
                status as "status: InvoiceStatus",
                line_items as "line_items: Json<Vec<LineItem>>",
                subtotal, tax, total, paid_amount, balance_due, issue_date, due_date,
                paid_date, notes, created_at, updated_at
            FROM invoices
            WHERE id = $1 AND customer_id = $2
            "#,
            id,
            customer_id
        )
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Invoice::from))
    }

    pub async fn list<'e, E>(&self, executor: E, status: Option<InvoiceStatus>) -> Result<Vec<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as!(
            InvoiceRow,
            r#"
            SELECT
                id, customer_id, customer_name, job_id, quote_id, invoice_number,
                status as "status: InvoiceStatus",
                line_items as "line_items: Json<Vec<LineItem>>",
                subtotal, tax, total, paid_amount, balance_due, issue_date, due_date,
                paid_date, notes, created_at, updated_at
            FROM invoices
            WHERE ($1::invoice_status IS NULL OR status = $1)
            ORDER BY issue_date DESC, invoice_number
            "#,
            status as Option<InvoiceStatus>
        )
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Invoice::from).collect())
    }

    pub async fn list_by_customer<'e, E>(&self, executor: E, customer_id: &str) -> Result<Vec<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as!(
            InvoiceRow,
            r#"
            SELECT
                id, customer_id, customer_name, job_id, quote_id, invoice_number,
                status as "status: InvoiceStatus",
                line_items as "line_items: Json<Vec<LineItem>>",
                subtotal, tax, total, paid_amount, balance_due, issue_date, due_date,
                paid_date, notes, created_at, updated_at
            FROM invoices
            WHERE customer_id = $1
            ORDER BY issue_date DESC, invoice_number
            "#,
            customer_id
        )
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Invoice::from).collect())
    }

    /// Faturas emitidas no intervalo (limites inclusivos, `NULL` = aberto).
    pub async fn list_issued_between<'e, E>(
        &self,
        executor: E,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as!(
            InvoiceRow,
            r#"
            SELECT
                id, customer_id, customer_name, job_id, quote_id, invoice_number,
                status as "status: InvoiceStatus",
                line_items as "line_items: Json<Vec<LineItem>>",
                subtotal, tax, total, paid_amount, balance_due, issue_date, due_date,
                paid_date, notes, created_at, updated_at
            FROM invoices
            WHERE ($1::date IS NULL OR issue_date >= $1)
              AND ($2::date IS NULL OR issue_date <= $2)
            ORDER BY issue_date, invoice_number
            "#,
            start,
            end
        )
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Invoice::from).collect())
    }

    /// Trava de transação por prefixo (ex: `INV-2025-`); solta no commit/rollback.
    pub async fn lock_number_sequence<'e, E>(&self, executor: E, prefix: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query!(
            r#"SELECT 1 as "locked!" FROM pg_advisory_xact_lock(hashtext($1))"#,
            prefix
        )
        .fetch_one(executor)
        .await?;
        Ok(())
    }

    /// Maior sufixo numérico já usado com o prefixo; 0 se não houver nenhum.
    /// Usa o máximo e não a contagem: faturas apagadas não liberam números.
    pub async fn last_number_in_sequence<'e, E>(&self, executor: E, prefix: &str) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let last = sqlx::query_scalar!(
            r#"
            SELECT COALESCE(MAX(SUBSTRING(invoice_number FROM CHAR_LENGTH($1) + 1)::BIGINT), 0) as "last!"
            FROM invoices
            WHERE invoice_number LIKE $1 || '%'
              AND SUBSTRING(invoice_number FROM CHAR_LENGTH($1) + 1) ~ '^[0-9]{1,18}$'
            "#,
            prefix
        )
        .fetch_one(executor)
        .await?;
        Ok(last)
    }

    pub async fn update<'e, E>(&self, executor: E, inv: &Invoice) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            InvoiceRow,
            r#"
            UPDATE invoices SET
                customer_id = $2, customer_name = $3, job_id = $4, quote_id = $5,
                invoice_number = $6, status = $7, line_items = $8, subtotal = $9, tax = $10,
                total = $11, paid_amount = $12, balance_due = $13, issue_date = $14,
                due_date = $15, paid_date = $16, notes = $17, updated_at = $18
            WHERE id = $1
            RETURNING
                id, customer_id, customer_name, job_id, quote_id, invoice_number,
                status as "status: InvoiceStatus",
                line_items as "line_items: Json<Vec<LineItem>>",
                subtotal, tax, total, paid_amount, balance_due, issue_date, due_date,
                paid_date, notes, created_at, updated_at
            "#,
            inv.id,
            inv.customer_id,
            inv.customer_name,
            inv.job_id.as_deref(),
            inv.quote_id.as_deref(),
            inv.invoice_number,
            inv.status as InvoiceStatus,
            Json(&inv.line_items) as _,
            inv.subtotal,
            inv.tax,
            inv.total,
            inv.paid_amount,
            inv.balance_due,
            inv.issue_date,
            inv.due_date,
            inv.paid_date,
            inv.notes.as_deref(),
            inv.updated_at
        )
        .fetch_optional(executor)
        .await
        .map_err(|e| number_conflict(e, &inv.invoice_number))?
        .ok_or(AppError::InvoiceNotFound)?;

        Ok(row.into())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query!("DELETE FROM invoices WHERE id = $1", id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
