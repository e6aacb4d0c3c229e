// src/services/technician_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::TechnicianRepository,
    models::technician::{CreateTechnicianPayload, Technician, UpdateTechnicianPayload},
};

#[derive(Clone)]
pub struct TechnicianService {
    repo: TechnicianRepository,
}

impl TechnicianService {
    pub fn new(repo: TechnicianRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &PgPool) -> Result<Vec<Technician>, AppError> {
        self.repo.list(pool).await
    }

    pub async fn get(&self, pool: &PgPool, id: &str) -> Result<Technician, AppError> {
        self.repo
            .find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::TechnicianNotFound(id.to_string()))
    }

    pub async fn create(&self, pool: &PgPool, payload: CreateTechnicianPayload) -> Result<Technician, AppError> {
        self.repo.insert(pool, &payload.into_technician()).await
    }

    pub async fn update(
        &self,
        pool: &PgPool,
        id: &str,
        payload: UpdateTechnicianPayload,
    ) -> Result<Technician, AppError> {
        let mut tech = self.get(pool, id).await?;
        payload.apply(&mut tech);
        self.repo
            .update(pool, &tech)
            .await?
            .ok_or_else(|| AppError::TechnicianNotFound(id.to_string()))
    }

    pub async fn delete(&self, pool: &PgPool, id: &str) -> Result<(), AppError> {
        if self.repo.delete(pool, id).await? == 0 {
            return Err(AppError::TechnicianNotFound(id.to_string()));
        }
        Ok(())
    }
}
