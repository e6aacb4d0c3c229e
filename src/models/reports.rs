// src/models/reports.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Granularidade do relatório de receita.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RevenueQuery {
    #[param(value_type = Option<String>, format = Date, example = "2025-01-01")]
    pub start_date: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date, example = "2025-12-31")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub period: Period,
}

// --- RECEITA ---

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct RevenueSummary {
    pub total_revenue: Decimal,
    pub paid_revenue: Decimal,
    pub outstanding_revenue: Decimal,
    pub total_invoices: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RevenueBucket {
    #[schema(example = "2025-01")]
    pub period: String,
    pub total: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueReport {
    pub summary: RevenueSummary,
    pub breakdown: Vec<RevenueBucket>,
}

// --- DESEMPENHO DOS SERVIÇOS ---

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct JobsPerformanceSummary {
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub in_progress_jobs: usize,
    pub scheduled_jobs: usize,
    /// Percentual (0-100)
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ServiceTypeStats {
    #[serde(rename = "type")]
    pub service_type: String,
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub scheduled: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobsPerformanceReport {
    pub summary: JobsPerformanceSummary,
    pub by_service_type: Vec<ServiceTypeStats>,
}

// --- CLIENTES ---

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct CustomerStatsReport {
    pub total_customers: usize,
    pub active_customers: usize,
    pub paused_customers: usize,
    pub inactive_customers: usize,
    pub total_pools: usize,
    pub avg_pools_per_customer: f64,
    pub autopay_customers: usize,
    pub autopay_percentage: f64,
}

// --- TÉCNICOS ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TechnicianStats {
    pub technician_id: String,
    pub technician_name: String,
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub in_progress_jobs: usize,
    pub scheduled_jobs: usize,
    pub completion_rate: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TechnicianPerformanceReport {
    pub technicians: Vec<TechnicianStats>,
}

// --- FINANCEIRO ---

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct InvoiceFinancials {
    pub total_invoiced: Decimal,
    pub total_paid: Decimal,
    pub total_outstanding: Decimal,
    pub overdue_amount: Decimal,
    pub paid_count: usize,
    pub sent_count: usize,
    pub draft_count: usize,
    pub overdue_count: usize,
}

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct QuoteFinancials {
    pub total_quotes: usize,
    pub pending_quotes: usize,
    pub approved_quotes: usize,
    pub declined_quotes: usize,
    pub conversion_rate: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FinancialSummaryReport {
    pub invoices: InvoiceFinancials,
    pub quotes: QuoteFinancials,
}

// --- DASHBOARD ---

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct CustomerCounts {
    pub total: usize,
    pub active: usize,
}

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct JobCounts {
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct AlertCounts {
    pub unresolved: usize,
}

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct RevenueTotals {
    pub total: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
}

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub customers: CustomerCounts,
    pub jobs: JobCounts,
    pub alerts: AlertCounts,
    pub revenue: RevenueTotals,
}
