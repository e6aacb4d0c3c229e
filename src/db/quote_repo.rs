// src/db/quote_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{types::Json, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::quote::{LineItem, Quote, QuoteStatus},
};

struct QuoteRow {
    id: String,
    customer_id: String,
    customer_name: String,
    status: QuoteStatus,
    items: Json<Vec<LineItem>>,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    notes: Option<String>,
    valid_until: Option<NaiveDate>,
    job_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Quote {
            id: row.id,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            status: row.status,
            items: row.items.0,
            subtotal: row.subtotal,
            tax: row.tax,
            total: row.total,
            notes: row.notes,
            valid_until: row.valid_until,
            job_id: row.job_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone, Default)]
pub struct QuoteRepository;

impl QuoteRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, quote: &Quote) -> Result<Quote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            QuoteRow,
            r#"
            INSERT INTO quotes (
                id, customer_id, customer_name, status, items, subtotal, tax, total,
                notes, valid_until, job_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING
                id, customer_id, customer_name,
                status as "status: QuoteStatus",
                items as "items: Json<Vec<LineItem>>",
                subtotal, tax, total, notes, valid_until, job_id, created_at, updated_at
            "#,
            quote.id,
            quote.customer_id,
            quote.customer_name,
            quote.status as QuoteStatus,
            Json(&quote.items) as _,
            quote.subtotal,
            quote.tax,
            quote.total,
            quote.notes.as_deref(),
            quote.valid_until,
            quote.job_id.as_deref(),
            quote.created_at,
            quote.updated_at
        )
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            QuoteRow,
            r#"
            SELECT
                id, customer_id, customer_name,
                status as "status: QuoteStatus",
                items as "items: Json<Vec<LineItem>>",
                subtotal, tax, total, notes, valid_until, job_id, created_at, updated_at
            FROM quotes
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Quote::from))
    }

    pub async fn find_by_id_for_update<'e, E>(&self, executor: E, id: &str) -> Result<Option<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            QuoteRow,
            r#"
            SELECT
                id, customer_id, customer_name,
                status as "status: QuoteStatus",
                items as "items: Json<Vec<LineItem>>",
                subtotal, tax, total, notes, valid_until, job_id, created_at, updated_at
            FROM quotes
            WHERE id = $1
            FOR UPDATE
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Quote::from))
    }

    /// Lista com filtro opcional de status (`NULL` = todos).
    pub async fn list<'e, E>(&self, executor: E, status: Option<QuoteStatus>) -> Result<Vec<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as!(
            QuoteRow,
            r#"
            SELECT
                id, customer_id, customer_name,
                status as "status: QuoteStatus",
                items as "items: Json<Vec<LineItem>>",
                subtotal, tax, total, notes, valid_until, job_id, created_at, updated_at
            FROM quotes
            WHERE ($1::quote_status IS NULL OR status = $1)
            ORDER BY created_at DESC, id
            "#,
            status as Option<QuoteStatus>
        )
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Quote::from).collect())
    }

    pub async fn list_by_customer<'e, E>(&self, executor: E, customer_id: &str) -> Result<Vec<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as!(
            QuoteRow,
            r#"
            SELECT
                id, customer_id, customer_name,
                status as "status: QuoteStatus",
                items as "items: Json<Vec<LineItem>>",
                subtotal, tax, total, notes, valid_until, job_id, created_at, updated_at
            FROM quotes
            WHERE customer_id = $1
            ORDER BY created_at DESC, id
            "#,
            customer_id
        )
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Quote::from).collect())
    }

    pub async fn update<'e, E>(&self, executor: E, quote: &Quote) -> Result<Quote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            QuoteRow,
            r#"
            UPDATE quotes SET
                customer_id = $2, customer_name = $3, status = $4, items = $5, subtotal = $6,
                tax = $7, total = $8, notes = $9, valid_until = $10, job_id = $11, updated_at = $12
            WHERE id = $1
            RETURNING
                id, customer_id, customer_name,
                status as "status: QuoteStatus",
                items as "items: Json<Vec<LineItem>>",
                subtotal, tax, total, notes, valid_until, job_id, created_at, updated_at
            "#,
            quote.id,
            quote.customer_id,
            quote.customer_name,
            quote.status as QuoteStatus,
            Json(&quote.items) as _,
            quote.subtotal,
            quote.tax,
            quote.total,
            quote.notes.as_deref(),
            quote.valid_until,
            quote.job_id.as_deref(),
            quote.updated_at
        )
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::QuoteNotFound)?;

        Ok(row.into())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query!("DELETE FROM quotes WHERE id = $1", id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
