// src/services/portal_service.rs
// Visão do cliente autenticado: tudo é filtrado pelo `customer_id` do token.

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{AlertRepository, InvoiceRepository, JobRepository, QuoteRepository},
    models::{
        alert::AlertListQuery,
        customer::Customer,
        invoice::Invoice,
        portal::*,
    },
};

#[derive(Clone)]
pub struct PortalService {
    invoice_repo: InvoiceRepository,
    job_repo: JobRepository,
    quote_repo: QuoteRepository,
    alert_repo: AlertRepository,
}

impl PortalService {
    pub fn new(
        invoice_repo: InvoiceRepository,
        job_repo: JobRepository,
        quote_repo: QuoteRepository,
        alert_repo: AlertRepository,
    ) -> Self {
        Self { invoice_repo, job_repo, quote_repo, alert_repo }
    }

    pub fn pools(&self, customer: Customer) -> PortalPools {
        customer.into()
    }

    pub async fn invoices(&self, pool: &PgPool, customer: &Customer) -> Result<PortalInvoices, AppError> {
        let invoices = self.invoice_repo.list_by_customer(pool, &customer.id).await?;
        Ok(PortalInvoices {
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            summary: InvoiceSummary::of(&invoices),
            invoices,
        })
    }

    pub async fn invoice(&self, pool: &PgPool, customer: &Customer, id: &str) -> Result<Invoice, AppError> {
        self.invoice_repo
            .find_for_customer(pool, id, &customer.id)
            .await?
            .ok_or(AppError::InvoiceNotFound)
    }

    pub async fn jobs(&self, pool: &PgPool, customer: &Customer) -> Result<PortalJobs, AppError> {
        let jobs = self.job_repo.list_by_customer(pool, &customer.id).await?;
        Ok(PortalJobs {
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            summary: JobSummary::of(&jobs),
            jobs,
        })
    }

    pub async fn quotes(&self, pool: &PgPool, customer: &Customer) -> Result<PortalQuotes, AppError> {
        let quotes = self.quote_repo.list_by_customer(pool, &customer.id).await?;
        Ok(PortalQuotes {
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            summary: QuoteSummary::of(&quotes),
            quotes,
        })
    }

    pub fn service_history(&self, customer: &Customer) -> PortalServiceHistory {
        PortalServiceHistory {
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            service_history: service_history(&customer.pools),
        }
    }

    pub async fn alerts(&self, pool: &PgPool, customer: &Customer) -> Result<PortalAlerts, AppError> {
        let filter = AlertListQuery { customer_id: Some(customer.id.clone()), ..Default::default() };
        let alerts = self.alert_repo.list(pool, &filter).await?;
        Ok(PortalAlerts {
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            summary: AlertSummary::of(&alerts),
            alerts,
        })
    }
}
