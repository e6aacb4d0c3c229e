// src/services/quote_service.rs

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    common::{error::AppError, ids::new_id},
    db::{CustomerRepository, JobRepository, QuoteRepository},
    models::{
        job::{Job, JobStatus},
        quote::{ApproveQuotePayload, CreateQuotePayload, Quote, QuoteStatus, UpdateQuotePayload},
    },
};

const DEFAULT_SERVICE_TYPE: &str = "One-time Service";

#[derive(Clone)]
pub struct QuoteService {
    repo: QuoteRepository,
    job_repo: JobRepository,
    customer_repo: CustomerRepository,
}

impl QuoteService {
    pub fn new(repo: QuoteRepository, job_repo: JobRepository, customer_repo: CustomerRepository) -> Self {
        Self { repo, job_repo, customer_repo }
    }

    pub async fn list(&self, pool: &PgPool, status: Option<QuoteStatus>) -> Result<Vec<Quote>, AppError> {
        self.repo.list(pool, status).await
    }

    pub async fn list_by_customer(&self, pool: &PgPool, customer_id: &str) -> Result<Vec<Quote>, AppError> {
        self.repo.list_by_customer(pool, customer_id).await
    }

    pub async fn get(&self, pool: &PgPool, id: &str) -> Result<Quote, AppError> {
        self.repo.find_by_id(pool, id).await?.ok_or(AppError::QuoteNotFound)
    }

    pub async fn create(&self, pool: &PgPool, payload: CreateQuotePayload) -> Result<Quote, AppError> {
        self.repo.insert(pool, &payload.into_quote()).await
    }

    pub async fn update(&self, pool: &PgPool, id: &str, payload: UpdateQuotePayload) -> Result<Quote, AppError> {
        let mut tx = pool.begin().await?;
        let mut quote = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        payload.apply(&mut quote);
        let saved = self.repo.update(&mut *tx, &quote).await?;
        tx.commit().await?;
        Ok(saved)
    }

    pub async fn delete(&self, pool: &PgPool, id: &str) -> Result<(), AppError> {
        match self.repo.delete(pool, id).await? {
            0 => Err(AppError::QuoteNotFound),
            _ => Ok(()),
        }
    }

    pub async fn decline(&self, pool: &PgPool, id: &str) -> Result<Quote, AppError> {
        self.update(pool, id, UpdateQuotePayload { status: Some(QuoteStatus::Declined), ..Default::default() })
            .await
    }

    /// Aprova o orçamento e, se pedido, abre o serviço correspondente
    /// na mesma transação. Um orçamento que já gerou serviço não gera outro.
    pub async fn approve(
        &self,
        pool: &PgPool,
        id: &str,
        payload: ApproveQuotePayload,
    ) -> Result<(Quote, Option<Job>), AppError> {
        let mut tx = pool.begin().await?;

        let mut quote = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        quote.status = QuoteStatus::Approved;
        quote.updated_at = Utc::now();

        let mut job = None;
        if payload.create_job && quote.job_id.is_none() {
            let address = match payload.customer_address.clone() {
                Some(address) => address,
                None => self
                    .customer_repo
                    .find_by_id(&mut *tx, &quote.customer_id)
                    .await?
                    .map(|c| c.address)
                    .unwrap_or_default(),
            };

            let created = self.job_repo.insert(&mut *tx, &job_from_quote(&quote, payload, address)).await?;
            quote.job_id = Some(created.id.clone());
            tracing::info!("🔗 Orçamento {} aprovado, serviço {} criado", quote.id, created.id);
            job = Some(created);
        }

        let quote = self.repo.update(&mut *tx, &quote).await?;
        tx.commit().await?;

        Ok((quote, job))
    }
}

fn job_from_quote(quote: &Quote, payload: ApproveQuotePayload, customer_address: String) -> Job {
    let now = Utc::now();
    let service_type = payload
        .service_type
        .or_else(|| quote.items.first().map(|i| i.description.clone()))
        .unwrap_or_else(|| DEFAULT_SERVICE_TYPE.to_string());

    Job {
        id: new_id("job"),
        customer_id: quote.customer_id.clone(),
        customer_name: quote.customer_name.clone(),
        customer_address,
        quote_id: Some(quote.id.clone()),
        status: JobStatus::Scheduled,
        service_type,
        scheduled_date: payload.scheduled_date.unwrap_or_else(|| now.date_naive()),
        scheduled_time: payload.scheduled_time,
        technician: payload.technician,
        technician_id: payload.technician_id,
        pools: payload.pools.unwrap_or_default(),
        notes: payload.notes.or_else(|| quote.notes.clone()),
        completion_notes: None,
        completed_at: None,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quote::CreateQuotePayload;

    fn quote(items: serde_json::Value) -> Quote {
        serde_json::from_value::<CreateQuotePayload>(serde_json::json!({
            "customer_id": "cust-3",
            "customer_name": "Michael Brown",
            "items": items,
            "subtotal": 3200.0,
            "tax": 256.0,
            "total": 3456.0,
            "notes": "Install before spring"
        }))
        .unwrap()
        .into_quote()
    }

    #[test]
    fn test_job_from_quote_uses_quote_data() {
        let q = quote(serde_json::json!([
            {"description": "Pool Heater Installation", "quantity": 1, "unit_price": 3200.0, "total": 3200.0}
        ]));
        let job = job_from_quote(&q, ApproveQuotePayload { create_job: true, ..Default::default() }, "9 Elm St".into());

        assert!(job.id.starts_with("job-"));
        assert_eq!(job.quote_id.as_deref(), Some(q.id.as_str()));
        assert_eq!(job.customer_id, "cust-3");
        assert_eq!(job.customer_address, "9 Elm St");
        assert_eq!(job.service_type, "Pool Heater Installation");
        assert_eq!(job.status, JobStatus::Scheduled);
        assert_eq!(job.scheduled_date, Utc::now().date_naive());
        assert_eq!(job.notes.as_deref(), Some("Install before spring"));
    }

    #[test]
    fn test_job_from_quote_prefers_payload() {
        let q = quote(serde_json::json!([]));
        let payload = ApproveQuotePayload {
            create_job: true,
            scheduled_date: Some("2025-03-01".parse().unwrap()),
            technician: Some("Mike Johnson".into()),
            technician_id: Some("tech-001".into()),
            pools: Some(vec!["pool-9".into()]),
            ..Default::default()
        };
        let job = job_from_quote(&q, payload, String::new());

        assert_eq!(job.service_type, DEFAULT_SERVICE_TYPE);
        assert_eq!(job.scheduled_date.to_string(), "2025-03-01");
        assert_eq!(job.technician_id.as_deref(), Some("tech-001"));
        assert_eq!(job.pools, vec!["pool-9"]);
    }
}
