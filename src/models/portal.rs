// src/models/portal.rs
// Respostas do portal do cliente: a lista e um resumo por status.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::math::money;
use crate::models::{
    alert::Alert,
    customer::{Customer, Pool},
    invoice::Invoice,
    job::{Job, JobStatus},
    quote::{Quote, QuoteStatus},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct PortalPools {
    pub customer_id: String,
    pub customer_name: String,
    pub pools: Vec<Pool>,
}

impl From<Customer> for PortalPools {
    fn from(c: Customer) -> Self {
        Self { customer_id: c.id, customer_name: c.name, pools: c.pools }
    }
}

// --- FATURAS ---

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct InvoiceSummary {
    pub total_invoiced: Decimal,
    pub total_paid: Decimal,
    pub total_outstanding: Decimal,
    pub invoice_count: usize,
}

impl InvoiceSummary {
    pub fn of(invoices: &[Invoice]) -> Self {
        let (invoiced, paid, outstanding) = invoices.iter().fold(
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            |(t, p, o), inv| (t + inv.total, p + inv.paid_amount, o + inv.balance_due),
        );
        Self {
            total_invoiced: money(invoiced),
            total_paid: money(paid),
            total_outstanding: money(outstanding),
            invoice_count: invoices.len(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PortalInvoices {
    pub customer_id: String,
    pub customer_name: String,
    pub invoices: Vec<Invoice>,
    pub summary: InvoiceSummary,
}

// --- SERVIÇOS ---

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct JobSummary {
    pub total_jobs: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl JobSummary {
    pub fn of(jobs: &[Job]) -> Self {
        let count = |s: JobStatus| jobs.iter().filter(|j| j.status == s).count();
        Self {
            total_jobs: jobs.len(),
            scheduled: count(JobStatus::Scheduled),
            in_progress: count(JobStatus::InProgress),
            completed: count(JobStatus::Completed),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PortalJobs {
    pub customer_id: String,
    pub customer_name: String,
    pub jobs: Vec<Job>,
    pub summary: JobSummary,
}

// --- ORÇAMENTOS ---

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct QuoteSummary {
    pub total_quotes: usize,
    pub pending: usize,
    pub approved: usize,
    pub declined: usize,
}

impl QuoteSummary {
    pub fn of(quotes: &[Quote]) -> Self {
        let count = |s: QuoteStatus| quotes.iter().filter(|q| q.status == s).count();
        Self {
            total_quotes: quotes.len(),
            pending: count(QuoteStatus::Pending),
            approved: count(QuoteStatus::Approved),
            declined: count(QuoteStatus::Declined),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PortalQuotes {
    pub customer_id: String,
    pub customer_name: String,
    pub quotes: Vec<Quote>,
    pub summary: QuoteSummary,
}

// --- HISTÓRICO ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ServiceRecord {
    pub pool_id: String,
    pub pool_name: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub fc: f64,
    pub ph: f64,
    pub ta: i32,
    pub ch: i32,
    pub cya: i32,
}

/// Todas as leituras de todas as piscinas, da mais recente para a mais antiga.
pub fn service_history(pools: &[Pool]) -> Vec<ServiceRecord> {
    let mut records: Vec<ServiceRecord> = pools
        .iter()
        .flat_map(|pool| {
            pool.chem_readings.iter().map(move |r| ServiceRecord {
                pool_id: pool.id.clone(),
                pool_name: pool.name.clone(),
                date: r.date,
                fc: r.fc,
                ph: r.ph,
                ta: r.ta,
                ch: r.ch,
                cya: r.cya,
            })
        })
        .collect();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PortalServiceHistory {
    pub customer_id: String,
    pub customer_name: String,
    pub service_history: Vec<ServiceRecord>,
}

// --- ALERTAS ---

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct AlertSummary {
    pub total_alerts: usize,
    pub unresolved: usize,
    pub resolved: usize,
}

impl AlertSummary {
    pub fn of(alerts: &[Alert]) -> Self {
        let resolved = alerts.iter().filter(|a| a.resolved).count();
        Self { total_alerts: alerts.len(), unresolved: alerts.len() - resolved, resolved }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PortalAlerts {
    pub customer_id: String,
    pub customer_name: String,
    pub alerts: Vec<Alert>,
    pub summary: AlertSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::ChemReading;
    use crate::models::invoice::CreateInvoicePayload;
    use crate::models::job::CreateJobPayload;
    use rust_decimal_macros::dec;

    fn invoice(total: f64) -> Invoice {
        serde_json::from_value::<CreateInvoicePayload>(serde_json::json!({
            "customer_id": "cust-1",
            "customer_name": "John Anderson",
            "invoice_number": "INV-1",
            "subtotal": total,
            "total": total,
            "issue_date": "2025-01-01",
            "due_date": "2025-01-31"
        }))
        .unwrap()
        .into_invoice()
    }

    fn job(status: &str) -> Job {
        serde_json::from_value::<CreateJobPayload>(serde_json::json!({
            "customer_id": "cust-1",
            "customer_name": "John Anderson",
            "service_type": "Routine Service",
            "scheduled_date": "2025-01-20",
            "status": status
        }))
        .unwrap()
        .into_job()
    }

    fn pool(id: &str, dates: &[&str]) -> Pool {
        Pool {
            id: id.into(),
            name: format!("Pool {id}"),
            pool_type: "In-Ground".into(),
            color: "#3B82F6".into(),
            gallons: 20000,
            equipment: vec![],
            last_service: "2025-01-01".parse().unwrap(),
            chem_readings: dates
                .iter()
                .map(|d| ChemReading { date: d.parse().unwrap(), fc: 3.0, ph: 7.5, ta: 100, ch: 200, cya: 40 })
                .collect(),
        }
    }

    #[test]
    fn test_invoice_summary() {
        let mut paid = invoice(100.0);
        paid.record_payment(dec!(100)).unwrap();
        let mut partial = invoice(50.5);
        partial.record_payment(dec!(20.25)).unwrap();

        let summary = InvoiceSummary::of(&[paid, partial, invoice(10.0)]);
        assert_eq!(summary.total_invoiced, dec!(160.50));
        assert_eq!(summary.total_paid, dec!(120.25));
        assert_eq!(summary.total_outstanding, dec!(40.25));
        assert_eq!(summary.invoice_count, 3);
    }

    #[test]
    fn test_empty_summaries_are_zero() {
        assert_eq!(InvoiceSummary::of(&[]), InvoiceSummary::default());
        assert_eq!(JobSummary::of(&[]), JobSummary::default());
        assert_eq!(AlertSummary::of(&[]), AlertSummary::default());
    }

    #[test]
    fn test_job_summary_ignores_cancelled_in_buckets() {
        let jobs = [job("scheduled"), job("in-progress"), job("completed"), job("cancelled")];
        let summary = JobSummary::of(&jobs);
        assert_eq!(summary, JobSummary { total_jobs: 4, scheduled: 1, in_progress: 1, completed: 1 });
    }

    #[test]
    fn test_service_history_sorted_desc() {
        let pools = [pool("p1", &["2025-01-01", "2025-01-15"]), pool("p2", &["2025-01-08"])];
        let history = service_history(&pools);
        let dates: Vec<String> = history.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-01-15", "2025-01-08", "2025-01-01"]);
        assert_eq!(history[1].pool_id, "p2");
        assert_eq!(history[1].pool_name, "Pool p2");
    }
}
