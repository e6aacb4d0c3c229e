// src/db/route_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::route::{Route, RouteStatus},
};

#[derive(Clone, Default)]
pub struct RouteRepository;

impl RouteRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, route: &Route) -> Result<Route, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as!(
            Route,
            r#"
            INSERT INTO routes (
                id, name, technician_id, technician_name, day, jobs, total_stops,
                estimated_duration, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING
                id, name, technician_id, technician_name, day, jobs, total_stops, estimated_duration,
                status as "status: RouteStatus",
                created_at, updated_at
            "#,
            route.id,
            route.name,
            route.technician_id,
            route.technician_name,
            route.day,
            &route.jobs[..],
            route.total_stops,
            route.estimated_duration,
            route.status as RouteStatus,
            route.created_at,
            route.updated_at
        )
        .fetch_one(executor)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Route>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let route = sqlx::query_as!(
            Route,
            r#"
            SELECT
                id, name, technician_id, technician_name, day, jobs, total_stops, estimated_duration,
                status as "status: RouteStatus",
                created_at, updated_at
            FROM routes
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(route)
    }

    pub async fn find_by_id_for_update<'e, E>(&self, executor: E, id: &str) -> Result<Option<Route>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let route = sqlx::query_as!(
            Route,
            r#"
            SELECT
                id, name, technician_id, technician_name, day, jobs, total_stops, estimated_duration,
                status as "status: RouteStatus",
                created_at, updated_at
            FROM routes
            WHERE id = $1
            FOR UPDATE
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(route)
    }

    /// `day = NULL` lista todas.
    pub async fn list<'e, E>(&self, executor: E, day: Option<&str>) -> Result<Vec<Route>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let routes = sqlx::query_as!(
            Route,
            r#"
            SELECT
                id, name, technician_id, technician_name, day, jobs, total_stops, estimated_duration,
                status as "status: RouteStatus",
                created_at, updated_at
            FROM routes
            WHERE ($1::text IS NULL OR day = $1)
            ORDER BY day, name, id
            "#,
            day
        )
        .fetch_all(executor)
        .await?;

        Ok(routes)
    }

    pub async fn list_by_technician<'e, E>(&self, executor: E, technician_id: &str) -> Result<Vec<Route>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let routes = sqlx::query_as!(
            Route,
            r#"
            SELECT
                id, name, technician_id, technician_name, day, jobs, total_stops, estimated_duration,
                status as "status: RouteStatus",
                created_at, updated_at
            FROM routes
            WHERE technician_id = $1
            ORDER BY day, name, id
            "#,
            technician_id
        )
        .fetch_all(executor)
        .await?;

        Ok(routes)
    }

    pub async fn update<'e, E>(&self, executor: E, route: &Route) -> Result<Route, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as!(
            Route,
            r#"
            UPDATE routes SET
                name = $2, technician_id = $3, technician_name = $4, day = $5, jobs = $6,
                total_stops = $7, estimated_duration = $8, status = $9, updated_at = $10
            WHERE id = $1
            RETURNING
                id, name, technician_id, technician_name, day, jobs, total_stops, estimated_duration,
                status as "status: RouteStatus",
                created_at, updated_at
            "#,
            route.id,
            route.name,
            route.technician_id,
            route.technician_name,
            route.day,
            &route.jobs[..],
            route.total_stops,
            route.estimated_duration,
            route.status as RouteStatus,
            route.updated_at
        )
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::RouteNotFound(route.id.clone()))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query!("DELETE FROM routes WHERE id = $1", id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
