// src/db/technician_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::technician::{Technician, TechnicianStatus},
};

#[derive(Clone, Default)]
pub struct TechnicianRepository;

impl TechnicianRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, tech: &Technician) -> Result<Technician, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as!(
            Technician,
            r#"
            INSERT INTO technicians (id, name, email, phone, color, status, assigned_days, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, name, email, phone, color,
                status as "status: TechnicianStatus",
                assigned_days, created_at, updated_at
            "#,
            tech.id,
            tech.name,
            tech.email,
            tech.phone,
            tech.color,
            tech.status as TechnicianStatus,
            &tech.assigned_days[..],
            tech.created_at,
            tech.updated_at
        )
        .fetch_one(executor)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Technician>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tech = sqlx::query_as!(
            Technician,
            r#"
            SELECT
                id, name, email, phone, color,
                status as "status: TechnicianStatus",
                assigned_days, created_at, updated_at
            FROM technicians
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(tech)
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Technician>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let techs = sqlx::query_as!(
            Technician,
            r#"
            SELECT
                id, name, email, phone, color,
                status as "status: TechnicianStatus",
                assigned_days, created_at, updated_at
            FROM technicians
            ORDER BY name, id
            "#
        )
        .fetch_all(executor)
        .await?;

        Ok(techs)
    }

    pub async fn update<'e, E>(&self, executor: E, tech: &Technician) -> Result<Option<Technician>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as!(
            Technician,
            r#"
            UPDATE technicians SET
                name = $2, email = $3, phone = $4, color = $5, status = $6,
                assigned_days = $7, updated_at = $8
            WHERE id = $1
            RETURNING
                id, name, email, phone, color,
                status as "status: TechnicianStatus",
                assigned_days, created_at, updated_at
            "#,
            tech.id,
            tech.name,
            tech.email,
            tech.phone,
            tech.color,
            tech.status as TechnicianStatus,
            &tech.assigned_days[..],
            tech.updated_at
        )
        .fetch_optional(executor)
        .await?;

        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query!("DELETE FROM technicians WHERE id = $1", id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
