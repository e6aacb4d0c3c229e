// src/services/customer_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::CustomerRepository,
    models::customer::{
        ChemReading, CreateCustomerPayload, CreatePoolPayload, CreateReadingPayload, Customer,
        UpdateCustomerPayload,
    },
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &PgPool) -> Result<Vec<Customer>, AppError> {
        self.repo.list(pool).await
    }

    pub async fn get(&self, pool: &PgPool, id: &str) -> Result<Customer, AppError> {
        self.repo.find_by_id(pool, id).await?.ok_or(AppError::CustomerNotFound)
    }

    pub async fn create(&self, pool: &PgPool, payload: CreateCustomerPayload) -> Result<Customer, AppError> {
        let customer = self.repo.insert(pool, &payload.into_customer()).await?;
        tracing::info!("✅ Cliente {} criado ({} piscinas)", customer.id, customer.pools.len());
        Ok(customer)
    }

    pub async fn update(
        &self,
        pool: &PgPool,
        id: &str,
        payload: UpdateCustomerPayload,
    ) -> Result<Customer, AppError> {
        self.modify(pool, id, |customer| {
            payload.apply(customer);
            Ok(())
        })
        .await
    }

    pub async fn delete(&self, pool: &PgPool, id: &str) -> Result<(), AppError> {
        if self.repo.delete(pool, id).await? == 0 {
            return Err(AppError::CustomerNotFound);
        }
        tracing::info!("🗑️ Cliente {} removido", id);
        Ok(())
    }

    pub async fn add_pool(
        &self,
        pool: &PgPool,
        customer_id: &str,
        payload: CreatePoolPayload,
    ) -> Result<Customer, AppError> {
        self.modify(pool, customer_id, |customer| {
            customer.pools.push(payload.into_pool());
            customer.updated_at = chrono::Utc::now();
            Ok(())
        })
        .await
    }

    pub async fn add_reading(
        &self,
        pool: &PgPool,
        customer_id: &str,
        pool_id: &str,
        payload: CreateReadingPayload,
    ) -> Result<Customer, AppError> {
        self.modify(pool, customer_id, |customer| customer.add_reading(pool_id, payload.into()))
            .await
    }

    pub async fn list_readings(
        &self,
        pool: &PgPool,
        customer_id: &str,
        pool_id: &str,
    ) -> Result<Vec<ChemReading>, AppError> {
        let customer = self.get(pool, customer_id).await?;
        let found = customer.pool(pool_id).ok_or(AppError::PoolNotFound)?;
        Ok(found.chem_readings.clone())
    }

    // Lê, altera e grava o documento do cliente dentro de uma transação.
    async fn modify<F>(&self, pool: &PgPool, id: &str, change: F) -> Result<Customer, AppError>
    where
        F: FnOnce(&mut Customer) -> Result<(), AppError>,
    {
        let mut tx = pool.begin().await?;

        let mut customer = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        change(&mut customer)?;
        let saved = self.repo.update(&mut *tx, &customer).await?;

        tx.commit().await?;
        Ok(saved)
    }
}
