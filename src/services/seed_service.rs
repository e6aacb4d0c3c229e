// src/services/seed_service.rs
// Dados de demonstração carregados na primeira subida (SEED_DEMO_DATA=true).

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        AlertRepository, CustomerAuthRepository, CustomerRepository, InvoiceRepository, JobRepository,
        QuoteRepository, RouteRepository, TechnicianRepository,
    },
    models::{
        alert::Alert, customer::Customer, invoice::Invoice, job::Job, quote::Quote, route::Route,
        technician::Technician,
    },
    services::auth::{hash_password, normalize_email},
};

const DEMO_DATA: &str = include_str!("../../seed/demo_data.json");

pub const DEMO_PASSWORD: &str = "password123";

#[derive(Debug, Deserialize)]
pub struct DemoData {
    pub customers: Vec<Customer>,
    pub technicians: Vec<Technician>,
    pub quotes: Vec<Quote>,
    pub jobs: Vec<Job>,
    pub invoices: Vec<Invoice>,
    pub routes: Vec<Route>,
    pub alerts: Vec<Alert>,
}

impl DemoData {
    /// Lê o JSON embutido, carimbando `created_at`/`updated_at` com o instante atual.
    pub fn load() -> Result<Self, AppError> {
        let mut raw: Value = serde_json::from_str(DEMO_DATA)
            .map_err(|e| anyhow::anyhow!("Dados de demonstração inválidos: {}", e))?;

        let now = Value::String(Utc::now().to_rfc3339());
        if let Some(collections) = raw.as_object_mut() {
            for records in collections.values_mut().filter_map(Value::as_array_mut) {
                for record in records.iter_mut().filter_map(Value::as_object_mut) {
                    record.entry("created_at").or_insert_with(|| now.clone());
                    record.entry("updated_at").or_insert_with(|| now.clone());
                }
            }
        }

        serde_json::from_value(raw)
            .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Dados de demonstração inválidos: {}", e)))
    }
}

#[derive(Clone, Default)]
pub struct SeedService {
    customer_repo: CustomerRepository,
    technician_repo: TechnicianRepository,
    quote_repo: QuoteRepository,
    job_repo: JobRepository,
    invoice_repo: InvoiceRepository,
    route_repo: RouteRepository,
    alert_repo: AlertRepository,
    auth_repo: CustomerAuthRepository,
}

impl SeedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insere os dados de demonstração se ainda não houver clientes.
    /// Retorna `false` quando o banco já estava populado.
    pub async fn seed_if_empty(&self, pool: &PgPool) -> Result<bool, AppError> {
        if self.customer_repo.count(pool).await? > 0 {
            tracing::info!("🌱 Banco já possui clientes, seed ignorado");
            return Ok(false);
        }

        let data = DemoData::load()?;
        // Um único hash serve para todos os logins de demonstração
        let password_hash = hash_password(DEMO_PASSWORD.to_string()).await?;

        let mut tx = pool.begin().await?;

        for customer in &data.customers {
            self.customer_repo.insert(&mut *tx, customer).await?;
            self.auth_repo
                .create(&mut *tx, &customer.id, &normalize_email(&customer.email), &password_hash)
                .await?;
        }
        for tech in &data.technicians {
            self.technician_repo.insert(&mut *tx, tech).await?;
        }
        for quote in &data.quotes {
            self.quote_repo.insert(&mut *tx, quote).await?;
        }
        for job in &data.jobs {
            self.job_repo.insert(&mut *tx, job).await?;
        }
        for invoice in &data.invoices {
            self.invoice_repo.insert(&mut *tx, invoice).await?;
        }
        for route in &data.routes {
            self.route_repo.insert(&mut *tx, route).await?;
        }
        for alert in &data.alerts {
            self.alert_repo.insert(&mut *tx, alert).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "🌱 Seed concluído: {} clientes, {} técnicos, {} serviços, {} faturas, {} alertas",
            data.customers.len(),
            data.technicians.len(),
            data.jobs.len(),
            data.invoices.len(),
            data.alerts.len()
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{invoice::InvoiceStatus, job::JobStatus};
    use std::collections::HashSet;

    #[test]
    fn test_demo_data_parses() {
        let data = DemoData::load().unwrap();
        assert_eq!(data.customers.len(), 5);
        assert_eq!(data.technicians.len(), 3);
        assert!(data.jobs.iter().any(|j| j.status == JobStatus::InProgress));
        assert!(data.invoices.iter().any(|i| i.status == InvoiceStatus::Overdue));
    }

    #[test]
    fn test_demo_references_exist() {
        let data = DemoData::load().unwrap();
        let customers: HashSet<_> = data.customers.iter().map(|c| c.id.as_str()).collect();
        let jobs: HashSet<_> = data.jobs.iter().map(|j| j.id.as_str()).collect();
        let pools: HashSet<_> = data
            .customers
            .iter()
            .flat_map(|c| c.pools.iter().map(|p| p.id.as_str()))
            .collect();

        for job in &data.jobs {
            assert!(customers.contains(job.customer_id.as_str()));
            assert!(job.pools.iter().all(|p| pools.contains(p.as_str())));
        }
        for route in &data.routes {
            assert!(route.jobs.iter().all(|j| jobs.contains(j.as_str())));
            assert_eq!(route.total_stops as usize, route.jobs.len());
        }
        for invoice in &data.invoices {
            assert_eq!(invoice.balance_due, invoice.total - invoice.paid_amount);
        }
    }

    #[test]
    fn test_demo_emails_are_unique() {
        let data = DemoData::load().unwrap();
        let emails: HashSet<_> = data.customers.iter().map(|c| normalize_email(&c.email)).collect();
        assert_eq!(emails.len(), data.customers.len());
    }
}
