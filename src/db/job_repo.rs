// src/db/job_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::job::{Job, JobStatus},
};

#[derive(Clone, Default)]
pub struct JobRepository;

impl JobRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, job: &Job) -> Result<Job, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as!(
            Job,
            r#"
            INSERT INTO jobs (
                id, customer_id, customer_name, customer_address, quote_id, status,
                service_type, scheduled_date, scheduled_time, technician, technician_id, pools,
                notes, completion_notes, completed_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING
                id, customer_id, customer_name, customer_address, quote_id,
                status as "status: JobStatus",
                service_type, scheduled_date, scheduled_time, technician, technician_id, pools,
                notes, completion_notes, completed_at, created_at, updated_at
            "#,
            job.id,
            job.customer_id,
            job.customer_name,
            job.customer_address,
            job.quote_id.as_deref(),
            job.status as JobStatus,
            job.service_type,
            job.scheduled_date,
            job.scheduled_time.as_deref(),
            job.technician.as_deref(),
            job.technician_id.as_deref(),
            &job.pools[..],
            job.notes.as_deref(),
            job.completion_notes.as_deref(),
            job.completed_at,
            job.created_at,
            job.updated_at
        )
        .fetch_one(executor)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Job>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let job = sqlx::query_as!(
            Job,
            r#"
            SELECT
                id, customer_id, customer_name, customer_address, quote_id,
                status as "status: JobStatus",
                service_type, scheduled_date, scheduled_time, technician, technician_id, pools,
                notes, completion_notes, completed_at, created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(job)
    }

    pub async fn find_by_id_for_update<'e, E>(&self, executor: E, id: &str) -> Result<Option<Job>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let job = sqlx::query_as!(
            Job,
            r#"
            SELECT
                id, customer_id, customer_name, customer_address, quote_id,
                status as "status: JobStatus",
                service_type, scheduled_date, scheduled_time, technician, technician_id, pools,
                notes, completion_notes, completed_at, created_at, updated_at
            FROM jobs
            WHERE id = $1
            FOR UPDATE
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(job)
    }

    pub async fn list<'e, E>(&self, executor: E, status: Option<JobStatus>) -> Result<Vec<Job>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let jobs = sqlx::query_as!(
            Job,
            r#"
            SELECT
                id, customer_id, customer_name, customer_address, quote_id,
                status as "status: JobStatus",
                service_type, scheduled_date, scheduled_time, technician, technician_id, pools,
                notes, completion_notes, completed_at, created_at, updated_at
            FROM jobs
            WHERE ($1::job_status IS NULL OR status = $1)
            ORDER BY scheduled_date, scheduled_time NULLS LAST, id
            "#,
            status as Option<JobStatus>
        )
        .fetch_all(executor)
        .await?;

        Ok(jobs)
    }

    pub async fn list_by_date<'e, E>(&self, executor: E, date: NaiveDate) -> Result<Vec<Job>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let jobs = sqlx::query_as!(
            Job,
            r#"
            SELECT
                id, customer_id, customer_name, customer_address, quote_id,
                status as "status: JobStatus",
                service_type, scheduled_date, scheduled_time, technician, technician_id, pools,
                notes, completion_notes, completed_at, created_at, updated_at
            FROM jobs
            WHERE scheduled_date = $1
            ORDER BY scheduled_time NULLS LAST, id
            "#,
            date
        )
        .fetch_all(executor)
        .await?;

        Ok(jobs)
    }

    /// Aceita tanto o nome quanto o ID do técnico.
    pub async fn list_by_technician<'e, E>(&self, executor: E, technician: &str) -> Result<Vec<Job>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let jobs = sqlx::query_as!(
            Job,
            r#"
            SELECT
                id, customer_id, customer_name, customer_address, quote_id,
                status as "status: JobStatus",
                service_type, scheduled_date, scheduled_time, technician, technician_id, pools,
                notes, completion_notes, completed_at, created_at, updated_at
            FROM jobs
            WHERE technician = $1 OR technician_id = $1
            ORDER BY scheduled_date, scheduled_time NULLS LAST, id
            "#,
            technician
        )
        .fetch_all(executor)
        .await?;

        Ok(jobs)
    }

    pub async fn list_by_customer<'e, E>(&self, executor: E, customer_id: &str) -> Result<Vec<Job>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let jobs = sqlx::query_as!(
            Job,
            r#"
            SELECT
                id, customer_id, customer_name, customer_address, quote_id,
                status as "status: JobStatus",
                service_type, scheduled_date, scheduled_time, technician, technician_id, pools,
                notes, completion_notes, completed_at, created_at, updated_at
            FROM jobs
            WHERE customer_id = $1
            ORDER BY scheduled_date DESC, id
            "#,
            customer_id
        )
        .fetch_all(executor)
        .await?;

        Ok(jobs)
    }

    pub async fn update<'e, E>(&self, executor: E, job: &Job) -> Result<Job, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as!(
            Job,
            r#"
            UPDATE jobs SET
                customer_id = $2, customer_name = $3, customer_address = $4, quote_id = $5,
                status = $6, service_type = $7, scheduled_date = $8, scheduled_time = $9,
                technician = $10, technician_id = $11, pools = $12, notes = $13,
                completion_notes = $14, completed_at = $15, updated_at = $16
            WHERE id = $1
            RETURNING
                id, customer_id, customer_name, customer_address, quote_id,
                status as "status: JobStatus",
                service_type, scheduled_date, scheduled_time, technician, technician_id, pools,
                notes, completion_notes, completed_at, created_at, updated_at
            "#,
            job.id,
            job.customer_id,
            job.customer_name,
            job.customer_address,
            job.quote_id.as_deref(),
            job.status as JobStatus,
            job.service_type,
            job.scheduled_date,
            job.scheduled_time.as_deref(),
            job.technician.as_deref(),
            job.technician_id.as_deref(),
            &job.pools[..],
            job.notes.as_deref(),
            job.completion_notes.as_deref(),
            job.completed_at,
            job.updated_at
        )
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::JobNotFound)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query!("DELETE FROM jobs WHERE id = $1", id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
