// src/services/alert_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::AlertRepository,
    models::alert::{Alert, AlertListQuery, AlertStats, CreateAlertPayload, UpdateAlertPayload},
};

#[derive(Clone)]
pub struct AlertService {
    repo: AlertRepository,
}

impl AlertService {
    pub fn new(repo: AlertRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &PgPool, filter: &AlertListQuery) -> Result<Vec<Alert>, AppError> {
        self.repo.list(pool, filter).await
    }

    pub async fn get(&self, pool: &PgPool, id: &str) -> Result<Alert, AppError> {
        self.repo.find_by_id(pool, id).await?.ok_or(AppError::AlertNotFound)
    }

    pub async fn create(&self, pool: &PgPool, payload: CreateAlertPayload) -> Result<Alert, AppError> {
        let alert = self.repo.insert(pool, &payload.into_alert()).await?;
        tracing::info!("🚨 Alerta {} ({:?}/{:?}) registrado", alert.id, alert.alert_type, alert.severity);
        Ok(alert)
    }

    pub async fn update(&self, pool: &PgPool, id: &str, payload: UpdateAlertPayload) -> Result<Alert, AppError> {
        self.modify(pool, id, |alert| payload.apply(alert)).await
    }

    pub async fn resolve(&self, pool: &PgPool, id: &str) -> Result<Alert, AppError> {
        self.modify(pool, id, Alert::resolve).await
    }

    pub async fn delete(&self, pool: &PgPool, id: &str) -> Result<(), AppError> {
        match self.repo.delete(pool, id).await? {
            0 => Err(AppError::AlertNotFound),
            _ => Ok(()),
        }
    }

    pub async fn stats(&self, pool: &PgPool) -> Result<AlertStats, AppError> {
        let alerts = self.repo.list(pool, &AlertListQuery::default()).await?;
        Ok(AlertStats::from_alerts(&alerts))
    }

    async fn modify<F>(&self, pool: &PgPool, id: &str, change: F) -> Result<Alert, AppError>
    where
        F: FnOnce(&mut Alert),
    {
        let mut tx = pool.begin().await?;
        let mut alert = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::AlertNotFound)?;

        change(&mut alert);
        let saved = self.repo.update(&mut *tx, &alert).await?;
        tx.commit().await?;
        Ok(saved)
    }
}
