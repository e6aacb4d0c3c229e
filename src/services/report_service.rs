// src/services/report_service.rs

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        math::{money, percentage, ratio},
    },
    db::{AlertRepository, CustomerRepository, InvoiceRepository, JobRepository, QuoteRepository, TechnicianRepository},
    models::{
        customer::{Customer, CustomerStatus},
        invoice::{Invoice, InvoiceStatus},
        job::{Job, JobStatus},
        quote::{Quote, QuoteStatus},
        reports::*,
        technician::Technician,
    },
};

#[derive(Clone)]
pub struct ReportService {
    customer_repo: CustomerRepository,
    job_repo: JobRepository,
    quote_repo: QuoteRepository,
    invoice_repo: InvoiceRepository,
    technician_repo: TechnicianRepository,
    alert_repo: AlertRepository,
}

impl ReportService {
    pub fn new(
        customer_repo: CustomerRepository,
        job_repo: JobRepository,
        quote_repo: QuoteRepository,
        invoice_repo: InvoiceRepository,
        technician_repo: TechnicianRepository,
        alert_repo: AlertRepository,
    ) -> Self {
        Self { customer_repo, job_repo, quote_repo, invoice_repo, technician_repo, alert_repo }
    }

    pub async fn revenue(&self, pool: &PgPool, query: &RevenueQuery) -> Result<RevenueReport, AppError> {
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(AppError::InvalidQuery("start_date > end_date".to_string()));
            }
        }
        let invoices = self
            .invoice_repo
            .list_issued_between(pool, query.start_date, query.end_date)
            .await?;
        Ok(revenue_report(&invoices, query.period))
    }

    pub async fn jobs_performance(&self, pool: &PgPool) -> Result<JobsPerformanceReport, AppError> {
        let jobs = self.job_repo.list(pool, None).await?;
        Ok(jobs_performance(&jobs))
    }

    pub async fn customer_stats(&self, pool: &PgPool) -> Result<CustomerStatsReport, AppError> {
        let customers = self.customer_repo.list(pool).await?;
        Ok(customer_stats(&customers))
    }

    pub async fn technician_performance(&self, pool: &PgPool) -> Result<TechnicianPerformanceReport, AppError> {
        let technicians = self.technician_repo.list(pool).await?;
        let jobs = self.job_repo.list(pool, None).await?;
        Ok(technician_performance(&technicians, &jobs))
    }

    pub async fn financial_summary(&self, pool: &PgPool) -> Result<FinancialSummaryReport, AppError> {
        let invoices = self.invoice_repo.list(pool, None).await?;
        let quotes = self.quote_repo.list(pool, None).await?;
        Ok(financial_summary(&invoices, &quotes))
    }

    pub async fn dashboard_stats(&self, pool: &PgPool) -> Result<DashboardStats, AppError> {
        let customers = self.customer_repo.list(pool).await?;
        let jobs = self.job_repo.list(pool, None).await?;
        let invoices = self.invoice_repo.list(pool, None).await?;
        let unresolved = self.alert_repo.count_unresolved(pool).await?;
        Ok(dashboard_stats(&customers, &jobs, &invoices, unresolved as usize))
    }
}

/// Chave do agrupamento: `2025-01-15`, `2025-W03`, `2025-01` ou `2025`.
pub fn period_key(date: NaiveDate, period: Period) -> String {
    match period {
        Period::Day => date.format("%Y-%m-%d").to_string(),
        Period::Week => {
            let week = date.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Period::Month => date.format("%Y-%m").to_string(),
        Period::Year => date.format("%Y").to_string(),
    }
}

pub fn revenue_report(invoices: &[Invoice], period: Period) -> RevenueReport {
    let mut summary = RevenueSummary { total_invoices: invoices.len(), ..Default::default() };
    let mut buckets: BTreeMap<String, RevenueBucket> = BTreeMap::new();

    for inv in invoices {
        let key = period_key(inv.issue_date, period);
        let bucket = buckets.entry(key.clone()).or_insert_with(|| RevenueBucket {
            period: key,
            total: Decimal::ZERO,
            paid: Decimal::ZERO,
            outstanding: Decimal::ZERO,
            count: 0,
        });

        summary.total_revenue += inv.total;
        bucket.total += inv.total;
        bucket.count += 1;
        if inv.is_paid() {
            summary.paid_revenue += inv.total;
            bucket.paid += inv.total;
        } else {
            summary.outstanding_revenue += inv.total;
            bucket.outstanding += inv.total;
        }
    }

    summary.total_revenue = money(summary.total_revenue);
    summary.paid_revenue = money(summary.paid_revenue);
    summary.outstanding_revenue = money(summary.outstanding_revenue);

    let breakdown = buckets
        .into_values()
        .map(|b| RevenueBucket {
            total: money(b.total),
            paid: money(b.paid),
            outstanding: money(b.outstanding),
            ..b
        })
        .collect();

    RevenueReport { summary, breakdown }
}

fn count_status(jobs: &[&Job], status: JobStatus) -> usize {
    jobs.iter().filter(|j| j.status == status).count()
}

pub fn jobs_performance(jobs: &[Job]) -> JobsPerformanceReport {
    let all: Vec<&Job> = jobs.iter().collect();
    let completed = count_status(&all, JobStatus::Completed);

    let summary = JobsPerformanceSummary {
        total_jobs: jobs.len(),
        completed_jobs: completed,
        in_progress_jobs: count_status(&all, JobStatus::InProgress),
        scheduled_jobs: count_status(&all, JobStatus::Scheduled),
        completion_rate: percentage(completed, jobs.len()),
    };

    let mut by_type: BTreeMap<&str, ServiceTypeStats> = BTreeMap::new();
    for job in jobs {
        let stats = by_type.entry(job.service_type.as_str()).or_insert_with(|| ServiceTypeStats {
            service_type: job.service_type.clone(),
            ..Default::default()
        });
        stats.total += 1;
        match job.status {
            JobStatus::Completed => stats.completed += 1,
            JobStatus::InProgress => stats.in_progress += 1,
            JobStatus::Scheduled => stats.scheduled += 1,
            JobStatus::Cancelled => {}
        }
    }

    JobsPerformanceReport { summary, by_service_type: by_type.into_values().collect() }
}

pub fn customer_stats(customers: &[Customer]) -> CustomerStatsReport {
    let total = customers.len();
    let count = |s: CustomerStatus| customers.iter().filter(|c| c.status == s).count();
    let total_pools: usize = customers.iter().map(|c| c.pools.len()).sum();
    let autopay = customers.iter().filter(|c| c.autopay).count();

    CustomerStatsReport {
        total_customers: total,
        active_customers: count(CustomerStatus::Active),
        paused_customers: count(CustomerStatus::Paused),
        inactive_customers: count(CustomerStatus::Inactive),
        total_pools,
        avg_pools_per_customer: ratio(total_pools, total),
        autopay_customers: autopay,
        autopay_percentage: percentage(autopay, total),
    }
}

pub fn technician_performance(technicians: &[Technician], jobs: &[Job]) -> TechnicianPerformanceReport {
    let technicians = technicians
        .iter()
        .map(|tech| {
            let assigned: Vec<&Job> = jobs.iter().filter(|j| j.is_assigned_to(&tech.id, &tech.name)).collect();
            let completed = count_status(&assigned, JobStatus::Completed);
            TechnicianStats {
                technician_id: tech.id.clone(),
                technician_name: tech.name.clone(),
                total_jobs: assigned.len(),
                completed_jobs: completed,
                in_progress_jobs: count_status(&assigned, JobStatus::InProgress),
                scheduled_jobs: count_status(&assigned, JobStatus::Scheduled),
                completion_rate: percentage(completed, assigned.len()),
            }
        })
        .collect();

    TechnicianPerformanceReport { technicians }
}

pub fn financial_summary(invoices: &[Invoice], quotes: &[Quote]) -> FinancialSummaryReport {
    let mut inv = InvoiceFinancials::default();
    for invoice in invoices {
        inv.total_invoiced += invoice.total;
        inv.total_paid += invoice.paid_amount;
        inv.total_outstanding += invoice.balance_due;
        match invoice.status {
            InvoiceStatus::Paid => inv.paid_count += 1,
            InvoiceStatus::Sent => inv.sent_count += 1,
            InvoiceStatus::Draft => inv.draft_count += 1,
            InvoiceStatus::Overdue => {
                inv.overdue_count += 1;
                inv.overdue_amount += invoice.balance_due;
            }
        }
    }
    inv.total_invoiced = money(inv.total_invoiced);
    inv.total_paid = money(inv.total_paid);
    inv.total_outstanding = money(inv.total_outstanding);
    inv.overdue_amount = money(inv.overdue_amount);

    let count = |s: QuoteStatus| quotes.iter().filter(|q| q.status == s).count();
    let approved = count(QuoteStatus::Approved);
    let quotes = QuoteFinancials {
        total_quotes: quotes.len(),
        pending_quotes: count(QuoteStatus::Pending),
        approved_quotes: approved,
        declined_quotes: count(QuoteStatus::Declined),
        conversion_rate: percentage(approved, quotes.len()),
    };

    FinancialSummaryReport { invoices: inv, quotes }
}

pub fn dashboard_stats(
    customers: &[Customer],
    jobs: &[Job],
    invoices: &[Invoice],
    unresolved_alerts: usize,
) -> DashboardStats {
    let (total, paid, outstanding) = invoices.iter().fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(t, p, o), inv| (t + inv.total, p + inv.paid_amount, o + inv.balance_due),
    );

    DashboardStats {
        customers: CustomerCounts {
            total: customers.len(),
            active: customers.iter().filter(|c| c.status == CustomerStatus::Active).count(),
        },
        jobs: JobCounts {
            total: jobs.len(),
            completed: jobs.iter().filter(|j| j.status == JobStatus::Completed).count(),
        },
        alerts: AlertCounts { unresolved: unresolved_alerts },
        revenue: RevenueTotals { total: money(total), paid: money(paid), outstanding: money(outstanding) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        customer::CreateCustomerPayload, invoice::CreateInvoicePayload, job::CreateJobPayload,
        quote::CreateQuotePayload, technician::CreateTechnicianPayload,
    };
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn invoice(issue: &str, total: f64, status: &str) -> Invoice {
        let mut inv = serde_json::from_value::<CreateInvoicePayload>(serde_json::json!({
            "customer_id": "cust-1",
            "customer_name": "John Anderson",
            "invoice_number": format!("INV-{issue}"),
            "status": status,
            "subtotal": total,
            "total": total,
            "issue_date": issue,
            "due_date": issue
        }))
        .unwrap()
        .into_invoice();
        if status == "paid" {
            inv.paid_amount = inv.total;
            inv.balance_due = Decimal::ZERO;
        }
        inv
    }

    fn job(service_type: &str, status: &str, tech: Option<(&str, &str)>) -> Job {
        let mut job = serde_json::from_value::<CreateJobPayload>(serde_json::json!({
            "customer_id": "cust-1",
            "customer_name": "John Anderson",
            "service_type": service_type,
            "scheduled_date": "2025-01-20",
            "status": status
        }))
        .unwrap()
        .into_job();
        if let Some((id, name)) = tech {
            job.technician_id = (!id.is_empty()).then(|| id.to_string());
            job.technician = Some(name.to_string());
        }
        job
    }

    fn customer(status: &str, pools: usize, autopay: bool) -> Customer {
        let pools: Vec<_> = (0..pools)
            .map(|i| serde_json::json!({"name": format!("P{i}"), "type": "Spa", "gallons": 500, "last_service": "2025-01-01"}))
            .collect();
        serde_json::from_value::<CreateCustomerPayload>(serde_json::json!({
            "name": "C", "email": "c@example.com", "phone": "1", "address": "A",
            "service_day": "Monday", "status": status, "autopay": autopay, "pools": pools
        }))
        .unwrap()
        .into_customer()
    }

    #[test]
    fn test_period_keys() {
        let d = date("2025-01-01");
        assert_eq!(period_key(d, Period::Day), "2025-01-01");
        assert_eq!(period_key(d, Period::Week), "2025-W01");
        assert_eq!(period_key(d, Period::Month), "2025-01");
        assert_eq!(period_key(d, Period::Year), "2025");
        // Semana ISO que atravessa o ano
        assert_eq!(period_key(date("2024-12-30"), Period::Week), "2025-W01");
    }

    #[test]
    fn test_revenue_report_by_month() {
        let invoices = [
            invoice("2025-02-03", 100.0, "paid"),
            invoice("2025-01-10", 50.25, "sent"),
            invoice("2025-01-20", 49.75, "paid"),
        ];
        let report = revenue_report(&invoices, Period::Month);

        assert_eq!(report.summary.total_invoices, 3);
        assert_eq!(report.summary.total_revenue, dec!(200));
        assert_eq!(report.summary.paid_revenue, dec!(149.75));
        assert_eq!(report.summary.outstanding_revenue, dec!(50.25));

        let periods: Vec<&str> = report.breakdown.iter().map(|b| b.period.as_str()).collect();
        assert_eq!(periods, vec!["2025-01", "2025-02"]);
        assert_eq!(report.breakdown[0].count, 2);
        assert_eq!(report.breakdown[0].outstanding, dec!(50.25));
    }

    #[test]
    fn test_revenue_report_empty() {
        let report = revenue_report(&[], Period::Year);
        assert_eq!(report.summary, RevenueSummary::default());
        assert!(report.breakdown.is_empty());
    }

    #[test]
    fn test_jobs_performance() {
        let jobs = [
            job("Routine Service", "completed", None),
            job("Routine Service", "scheduled", None),
            job("Repair", "in-progress", None),
            job("Repair", "cancelled", None),
        ];
        let report = jobs_performance(&jobs);
        assert_eq!(report.summary.total_jobs, 4);
        assert_eq!(report.summary.completion_rate, 25.0);
        assert_eq!(report.by_service_type.len(), 2);
        assert_eq!(report.by_service_type[0].service_type, "Repair");
        assert_eq!(report.by_service_type[0].total, 2);
        assert_eq!(report.by_service_type[0].in_progress, 1);
        assert_eq!(report.by_service_type[1].completed, 1);
    }

    #[test]
    fn test_jobs_performance_without_jobs() {
        let report = jobs_performance(&[]);
        assert_eq!(report.summary.completion_rate, 0.0);
    }

    #[test]
    fn test_customer_stats() {
        let customers = [customer("active", 2, true), customer("paused", 1, false), customer("active", 0, false)];
        let stats = customer_stats(&customers);
        assert_eq!(stats.total_customers, 3);
        assert_eq!(stats.active_customers, 2);
        assert_eq!(stats.paused_customers, 1);
        assert_eq!(stats.total_pools, 3);
        assert_eq!(stats.avg_pools_per_customer, 1.0);
        assert_eq!(stats.autopay_customers, 1);
        assert_eq!(stats.autopay_percentage, 33.33);
        assert_eq!(customer_stats(&[]).avg_pools_per_customer, 0.0);
    }

    #[test]
    fn test_technician_performance_matches_id_then_name() {
        let mut mike = serde_json::from_value::<CreateTechnicianPayload>(serde_json::json!({
            "name": "Mike Johnson", "email": "mike@poolpro.com", "phone": "1"
        }))
        .unwrap()
        .into_technician();
        mike.id = "tech-001".into();

        let jobs = [
            job("Routine Service", "completed", Some(("tech-001", "Mike Johnson"))),
            job("Routine Service", "scheduled", Some(("", "Mike Johnson"))),
            job("Routine Service", "completed", Some(("tech-002", "Mike Johnson"))),
        ];
        let report = technician_performance(&[mike], &jobs);
        let stats = &report.technicians[0];
        assert_eq!(stats.total_jobs, 2);
        assert_eq!(stats.completed_jobs, 1);
        assert_eq!(stats.scheduled_jobs, 1);
        assert_eq!(stats.completion_rate, 50.0);
    }

    #[test]
    fn test_financial_summary() {
        let mut overdue = invoice("2025-01-01", 80.0, "overdue");
        overdue.paid_amount = dec!(30);
        overdue.balance_due = dec!(50);
        let invoices = [invoice("2025-01-01", 100.0, "paid"), invoice("2025-01-02", 20.0, "draft"), overdue];

        let quote = |status: &str| {
            serde_json::from_value::<CreateQuotePayload>(serde_json::json!({
                "customer_id": "c", "customer_name": "C", "status": status,
                "subtotal": 1.0, "total": 1.0
            }))
            .unwrap()
            .into_quote()
        };
        let quotes = [quote("approved"), quote("pending"), quote("declined")];

        let report = financial_summary(&invoices, &quotes);
        assert_eq!(report.invoices.total_invoiced, dec!(200));
        assert_eq!(report.invoices.total_paid, dec!(130));
        assert_eq!(report.invoices.total_outstanding, dec!(70));
        assert_eq!(report.invoices.overdue_amount, dec!(50));
        assert_eq!(report.invoices.paid_count, 1);
        assert_eq!(report.invoices.draft_count, 1);
        assert_eq!(report.invoices.overdue_count, 1);
        assert_eq!(report.quotes.conversion_rate, 33.33);
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = dashboard_stats(
            &[customer("active", 1, false), customer("inactive", 1, false)],
            &[job("Repair", "completed", None), job("Repair", "scheduled", None)],
            &[invoice("2025-01-01", 100.0, "paid"), invoice("2025-01-02", 40.0, "sent")],
            3,
        );
        assert_eq!(stats.customers, CustomerCounts { total: 2, active: 1 });
        assert_eq!(stats.jobs, JobCounts { total: 2, completed: 1 });
        assert_eq!(stats.alerts.unresolved, 3);
        assert_eq!(stats.revenue.total, dec!(140));
        assert_eq!(stats.revenue.paid, dec!(100));
        assert_eq!(stats.revenue.outstanding, dec!(40));
    }
}
