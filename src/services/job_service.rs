// src/services/job_service.rs

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::{error::AppError, ids::new_id, math::money},
    db::{InvoiceRepository, JobRepository, QuoteRepository},
    models::{
        invoice::{Invoice, InvoiceFromJobPayload, InvoiceStatus},
        job::{CreateJobPayload, Job, JobStatus, UpdateJobPayload},
        quote::{LineItem, Quote},
    },
};

/// Prazo padrão de pagamento de uma fatura gerada a partir de um serviço.
const PAYMENT_TERM_DAYS: i64 = 30;

#[derive(Clone)]
pub struct JobService {
    repo: JobRepository,
    quote_repo: QuoteRepository,
    invoice_repo: InvoiceRepository,
}

impl JobService {
    pub fn new(repo: JobRepository, quote_repo: QuoteRepository, invoice_repo: InvoiceRepository) -> Self {
        Self { repo, quote_repo, invoice_repo }
    }

    pub async fn list(&self, pool: &PgPool, status: Option<JobStatus>) -> Result<Vec<Job>, AppError> {
        self.repo.list(pool, status).await
    }

    pub async fn list_by_date(&self, pool: &PgPool, date: NaiveDate) -> Result<Vec<Job>, AppError> {
        self.repo.list_by_date(pool, date).await
    }

    pub async fn list_by_technician(&self, pool: &PgPool, technician: &str) -> Result<Vec<Job>, AppError> {
        self.repo.list_by_technician(pool, technician).await
    }

    pub async fn list_by_customer(&self, pool: &PgPool, customer_id: &str) -> Result<Vec<Job>, AppError> {
        self.repo.list_by_customer(pool, customer_id).await
    }

    pub async fn get(&self, pool: &PgPool, id: &str) -> Result<Job, AppError> {
        self.repo.find_by_id(pool, id).await?.ok_or(AppError::JobNotFound)
    }

    pub async fn create(&self, pool: &PgPool, payload: CreateJobPayload) -> Result<Job, AppError> {
        self.repo.insert(pool, &payload.into_job()).await
    }

    pub async fn update(&self, pool: &PgPool, id: &str, payload: UpdateJobPayload) -> Result<Job, AppError> {
        self.modify(pool, id, |job| payload.apply(job)).await
    }

    pub async fn delete(&self, pool: &PgPool, id: &str) -> Result<(), AppError> {
        match self.repo.delete(pool, id).await? {
            0 => Err(AppError::JobNotFound),
            _ => Ok(()),
        }
    }

    pub async fn start(&self, pool: &PgPool, id: &str) -> Result<Job, AppError> {
        self.modify(pool, id, Job::start).await
    }

    pub async fn complete(&self, pool: &PgPool, id: &str, notes: Option<String>) -> Result<Job, AppError> {
        let job = self.modify(pool, id, |job| job.complete(notes)).await?;
        tracing::info!("✅ Serviço {} concluído", job.id);
        Ok(job)
    }

    /// Gera a fatura (rascunho) do serviço, fechando o ciclo orçamento -> serviço -> fatura.
    pub async fn create_invoice(
        &self,
        pool: &PgPool,
        id: &str,
        payload: InvoiceFromJobPayload,
    ) -> Result<Invoice, AppError> {
        let mut tx = pool.begin().await?;

        let job = self.repo.find_by_id(&mut *tx, id).await?.ok_or(AppError::JobNotFound)?;
        let quote = match &job.quote_id {
            Some(quote_id) => self.quote_repo.find_by_id(&mut *tx, quote_id).await?,
            None => None,
        };

        let issue_date = payload.issue_date.unwrap_or_else(|| Utc::now().date_naive());
        let invoice_number = match payload.invoice_number.clone() {
            Some(number) => number,
            None => {
                // A trava vale até o commit: duas gerações simultâneas do mesmo ano se enfileiram
                let prefix = invoice_number_prefix(issue_date);
                self.invoice_repo.lock_number_sequence(&mut *tx, &prefix).await?;
                let last = self.invoice_repo.last_number_in_sequence(&mut *tx, &prefix).await?;
                format!("{prefix}{:03}", last + 1)
            }
        };

        let invoice = invoice_from_job(&job, quote.as_ref(), payload, invoice_number, issue_date);
        let invoice = self.invoice_repo.insert(&mut *tx, &invoice).await?;
        tx.commit().await?;

        tracing::info!("🧾 Fatura {} gerada para o serviço {}", invoice.invoice_number, job.id);
        Ok(invoice)
    }

    async fn modify<F>(&self, pool: &PgPool, id: &str, change: F) -> Result<Job, AppError>
    where
        F: FnOnce(&mut Job),
    {
        let mut tx = pool.begin().await?;
        let mut job = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::JobNotFound)?;

        change(&mut job);
        let saved = self.repo.update(&mut *tx, &job).await?;
        tx.commit().await?;
        Ok(saved)
    }
}

fn invoice_number_prefix(issue_date: NaiveDate) -> String {
    format!("INV-{}-", issue_date.year())
}

/// Monta a fatura. Itens: os do payload, senão os do orçamento, senão uma
/// linha única com o tipo de serviço.
fn invoice_from_job(
    job: &Job,
    quote: Option<&Quote>,
    payload: InvoiceFromJobPayload,
    invoice_number: String,
    issue_date: NaiveDate,
) -> Invoice {
    let (line_items, quote_tax) = match (payload.line_items, quote) {
        (Some(items), _) => (items, None),
        (None, Some(q)) if !q.items.is_empty() => (q.items.clone(), Some(q.tax)),
        _ => {
            let price = money(payload.amount.unwrap_or_default());
            let line = LineItem {
                description: job.service_type.clone(),
                quantity: Decimal::ONE,
                unit_price: price,
                total: price,
            };
            (vec![line], None)
        }
    };

    let subtotal = money(line_items.iter().map(|i| i.total).sum());
    let tax = money(payload.tax.or(quote_tax).unwrap_or_default());
    let total = money(subtotal + tax);
    let now = Utc::now();

    Invoice {
        id: new_id("inv"),
        customer_id: job.customer_id.clone(),
        customer_name: job.customer_name.clone(),
        job_id: Some(job.id.clone()),
        quote_id: job.quote_id.clone(),
        invoice_number,
        status: InvoiceStatus::Draft,
        line_items,
        subtotal,
        tax,
        total,
        paid_amount: Decimal::ZERO,
        balance_due: total,
        issue_date,
        due_date: payload.due_date.unwrap_or(issue_date + Duration::days(PAYMENT_TERM_DAYS)),
        paid_date: None,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quote::CreateQuotePayload;
    use rust_decimal_macros::dec;

    fn job(quote_id: Option<&str>) -> Job {
        let mut job = serde_json::from_value::<CreateJobPayload>(serde_json::json!({
            "customer_id": "cust-1",
            "customer_name": "John Anderson",
            "service_type": "Filter Cleaning",
            "scheduled_date": "2025-01-20"
        }))
        .unwrap()
        .into_job();
        job.quote_id = quote_id.map(str::to_string);
        job
    }

    fn quote() -> Quote {
        serde_json::from_value::<CreateQuotePayload>(serde_json::json!({
            "customer_id": "cust-1",
            "customer_name": "John Anderson",
            "items": [
                {"description": "Filter Cartridge", "quantity": 2, "unit_price": 75.0, "total": 150.0},
                {"description": "Labor", "quantity": 1, "unit_price": 60.0, "total": 60.0}
            ],
            "subtotal": 210.0,
            "tax": 16.8,
            "total": 226.8
        }))
        .unwrap()
        .into_quote()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_invoice_from_quote_items() {
        let q = quote();
        let j = job(Some(&q.id));
        let inv = invoice_from_job(&j, Some(&q), InvoiceFromJobPayload::default(), "INV-2025-007".into(), date("2025-01-20"));

        assert_eq!(inv.status, InvoiceStatus::Draft);
        assert_eq!(inv.job_id.as_deref(), Some(j.id.as_str()));
        assert_eq!(inv.quote_id.as_deref(), Some(q.id.as_str()));
        assert_eq!(inv.line_items.len(), 2);
        assert_eq!(inv.subtotal, dec!(210));
        assert_eq!(inv.tax, dec!(16.80));
        assert_eq!(inv.total, dec!(226.80));
        assert_eq!(inv.balance_due, inv.total);
        assert_eq!(inv.due_date, date("2025-02-19"));
    }

    #[test]
    fn test_invoice_without_quote_uses_service_type() {
        let payload = InvoiceFromJobPayload { amount: Some(dec!(85)), ..Default::default() };
        let inv = invoice_from_job(&job(None), None, payload, "INV-2025-001".into(), date("2025-01-20"));

        assert_eq!(inv.line_items.len(), 1);
        assert_eq!(inv.line_items[0].description, "Filter Cleaning");
        assert_eq!(inv.total, dec!(85));
        assert!(inv.quote_id.is_none());
    }

    #[test]
    fn test_invoice_number_prefix_uses_issue_year() {
        assert_eq!(invoice_number_prefix(date("2031-12-31")), "INV-2031-");
    }

    fn job_service() -> JobService {
        JobService::new(JobRepository::new(), QuoteRepository::new(), InvoiceRepository::new())
    }

    fn issued_in_2031() -> InvoiceFromJobPayload {
        InvoiceFromJobPayload { issue_date: Some(date("2031-03-01")), ..Default::default() }
    }

    #[sqlx::test]
    async fn test_deleted_invoice_does_not_free_its_number(pool: PgPool) {
        let service = job_service();
        let job = service.repo.insert(&pool, &job(None)).await.unwrap();

        let a = service.create_invoice(&pool, &job.id, issued_in_2031()).await.unwrap();
        let b = service.create_invoice(&pool, &job.id, issued_in_2031()).await.unwrap();
        assert_eq!(a.invoice_number, "INV-2031-001");
        assert_eq!(b.invoice_number, "INV-2031-002");

        InvoiceRepository::new().delete(&pool, &a.id).await.unwrap();
        let c = service.create_invoice(&pool, &job.id, issued_in_2031()).await.unwrap();
        assert_eq!(c.invoice_number, "INV-2031-003");
        assert_ne!(c.invoice_number, b.invoice_number);
    }

    #[sqlx::test]
    async fn test_concurrent_generation_yields_distinct_numbers(pool: PgPool) {
        let service = job_service();
        let job = service.repo.insert(&pool, &job(None)).await.unwrap();

        let (first, second) = tokio::join!(
            service.create_invoice(&pool, &job.id, issued_in_2031()),
            service.create_invoice(&pool, &job.id, issued_in_2031()),
        );
        assert_ne!(first.unwrap().invoice_number, second.unwrap().invoice_number);
    }

    #[sqlx::test]
    async fn test_repeated_explicit_number_is_rejected(pool: PgPool) {
        let service = job_service();
        let job = service.repo.insert(&pool, &job(None)).await.unwrap();
        let taken = service.create_invoice(&pool, &job.id, issued_in_2031()).await.unwrap();

        let payload = InvoiceFromJobPayload {
            invoice_number: Some(taken.invoice_number.clone()),
            ..issued_in_2031()
        };
        let err = service.create_invoice(&pool, &job.id, payload).await.unwrap_err();
        assert!(matches!(err, AppError::InvoiceNumberTaken(ref n) if *n == taken.invoice_number));
    }

    #[test]
    fn test_explicit_items_and_tax_win() {
        let q = quote();
        let payload = InvoiceFromJobPayload {
            line_items: Some(vec![LineItem {
                description: "Adjusted".into(),
                quantity: dec!(1),
                unit_price: dec!(100),
                total: dec!(100),
            }]),
            tax: Some(dec!(8)),
            due_date: Some(date("2025-01-31")),
            ..Default::default()
        };
        let inv = invoice_from_job(&job(Some(&q.id)), Some(&q), payload, "X".into(), date("2025-01-20"));

        assert_eq!(inv.subtotal, dec!(100));
        assert_eq!(inv.total, dec!(108));
        assert_eq!(inv.due_date, date("2025-01-31"));
    }
}
