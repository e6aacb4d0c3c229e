// src/db/alert_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::alert::{Alert, AlertListQuery, AlertSeverity, AlertType},
};

#[derive(Clone, Default)]
pub struct AlertRepository;

impl AlertRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, alert: &Alert) -> Result<Alert, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as!(
            Alert,
            r#"
            INSERT INTO alerts (
                id, type, severity, title, message, customer_id, customer_name, pool_id,
                pool_name, job_id, resolved, resolved_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING
                id,
                type as "alert_type: AlertType",
                severity as "severity: AlertSeverity",
                title, message, customer_id, customer_name, pool_id, pool_name, job_id,
                resolved, resolved_at, created_at, updated_at
            "#,
            alert.id,
            alert.alert_type as AlertType,
            alert.severity as AlertSeverity,
            alert.title,
            alert.message,
            alert.customer_id.as_deref(),
            alert.customer_name.as_deref(),
            alert.pool_id.as_deref(),
            alert.pool_name.as_deref(),
            alert.job_id.as_deref(),
            alert.resolved,
            alert.resolved_at,
            alert.created_at,
            alert.updated_at
        )
        .fetch_one(executor)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Alert>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let alert = sqlx::query_as!(
            Alert,
            r#"
            SELECT
                id,
                type as "alert_type: AlertType",
                severity as "severity: AlertSeverity",
                title, message, customer_id, customer_name, pool_id, pool_name, job_id,
                resolved, resolved_at, created_at, updated_at
            FROM alerts
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(alert)
    }

    pub async fn find_by_id_for_update<'e, E>(&self, executor: E, id: &str) -> Result<Option<Alert>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let alert = sqlx::query_as!(
            Alert,
            r#"
            SELECT
                id,
                type as "alert_type: AlertType",
                severity as "severity: AlertSeverity",
                title, message, customer_id, customer_name, pool_id, pool_name, job_id,
                resolved, resolved_at, created_at, updated_at
            FROM alerts
            WHERE id = $1
            FOR UPDATE
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(alert)
    }

    /// Todos os filtros são opcionais; `NULL` desliga o filtro.
    pub async fn list<'e, E>(&self, executor: E, filter: &AlertListQuery) -> Result<Vec<Alert>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let alerts = sqlx::query_as!(
            Alert,
            r#"
            SELECT
                id,
                type as "alert_type: AlertType",
                severity as "severity: AlertSeverity",
                title, message, customer_id, customer_name, pool_id, pool_name, job_id,
                resolved, resolved_at, created_at, updated_at
            FROM alerts
            WHERE ($1::boolean IS NULL OR resolved = $1)
              AND ($2::alert_severity IS NULL OR severity = $2)
              AND ($3::alert_type IS NULL OR type = $3)
              AND ($4::text IS NULL OR customer_id = $4)
            ORDER BY created_at DESC, id
            "#,
            filter.resolved,
            filter.severity as Option<AlertSeverity>,
            filter.alert_type as Option<AlertType>,
            filter.customer_id.as_deref()
        )
        .fetch_all(executor)
        .await?;

        Ok(alerts)
    }

    pub async fn count_unresolved<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar!(r#"SELECT COUNT(*) as "count!" FROM alerts WHERE resolved = FALSE"#)
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    pub async fn update<'e, E>(&self, executor: E, alert: &Alert) -> Result<Alert, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as!(
            Alert,
            r#"
            UPDATE alerts SET
                type = $2, severity = $3, title = $4, message = $5, customer_id = $6,
                customer_name = $7, pool_id = $8, pool_name = $9, job_id = $10,
                resolved = $11, resolved_at = $12, updated_at = $13
            WHERE id = $1
            RETURNING
                id,
                type as "alert_type: AlertType",
                severity as "severity: AlertSeverity",
                title, message, customer_id, customer_name, pool_id, pool_name, job_id,
                resolved, resolved_at, created_at, updated_at
            "#,
            alert.id,
            alert.alert_type as AlertType,
            alert.severity as AlertSeverity,
            alert.title,
            alert.message,
            alert.customer_id.as_deref(),
            alert.customer_name.as_deref(),
            alert.pool_id.as_deref(),
            alert.pool_name.as_deref(),
            alert.job_id.as_deref(),
            alert.resolved,
            alert.resolved_at,
            alert.updated_at
        )
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::AlertNotFound)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query!("DELETE FROM alerts WHERE id = $1", id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
