// src/services/route_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::RouteRepository,
    models::route::{CreateRoutePayload, Route, UpdateRoutePayload},
};

#[derive(Clone)]
pub struct RouteService {
    repo: RouteRepository,
}

impl RouteService {
    pub fn new(repo: RouteRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &PgPool, day: Option<&str>) -> Result<Vec<Route>, AppError> {
        self.repo.list(pool, day).await
    }

    pub async fn list_by_technician(&self, pool: &PgPool, technician_id: &str) -> Result<Vec<Route>, AppError> {
        self.repo.list_by_technician(pool, technician_id).await
    }

    pub async fn get(&self, pool: &PgPool, id: &str) -> Result<Route, AppError> {
        self.repo
            .find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::RouteNotFound(id.to_string()))
    }

    pub async fn create(&self, pool: &PgPool, payload: CreateRoutePayload) -> Result<Route, AppError> {
        self.repo.insert(pool, &payload.into_route()).await
    }

    pub async fn update(&self, pool: &PgPool, id: &str, payload: UpdateRoutePayload) -> Result<Route, AppError> {
        self.modify(pool, id, |route| {
            payload.apply(route);
            Ok(())
        })
        .await
    }

    pub async fn delete(&self, pool: &PgPool, id: &str) -> Result<(), AppError> {
        if self.repo.delete(pool, id).await? == 0 {
            return Err(AppError::RouteNotFound(id.to_string()));
        }
        Ok(())
    }

    pub async fn add_job(&self, pool: &PgPool, id: &str, job_id: &str) -> Result<Route, AppError> {
        self.modify(pool, id, |route| {
            if !route.add_job(job_id) {
                tracing::debug!("Serviço {} já está na rota {}", job_id, route.id);
            }
            Ok(())
        })
        .await
    }

    pub async fn remove_job(&self, pool: &PgPool, id: &str, job_id: &str) -> Result<Route, AppError> {
        self.modify(pool, id, |route| {
            route.remove_job(job_id);
            Ok(())
        })
        .await
    }

    pub async fn reorder(&self, pool: &PgPool, id: &str, jobs: Vec<String>) -> Result<Route, AppError> {
        self.modify(pool, id, |route| route.reorder(jobs)).await
    }

    async fn modify<F>(&self, pool: &PgPool, id: &str, change: F) -> Result<Route, AppError>
    where
        F: FnOnce(&mut Route) -> Result<(), AppError>,
    {
        let mut tx = pool.begin().await?;
        let mut route = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::RouteNotFound(id.to_string()))?;

        change(&mut route)?;
        let saved = self.repo.update(&mut *tx, &route).await?;
        tx.commit().await?;
        Ok(saved)
    }
}
