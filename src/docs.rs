// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "PoolPro API", description = "Gestão de empresas de limpeza e manutenção de piscinas"),
    paths(
        // --- Customers ---
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::create_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::customers::add_pool,
        handlers::customers::add_reading,
        handlers::customers::list_readings,

        // --- Quotes ---
        handlers::quotes::list_quotes,
        handlers::quotes::list_quotes_by_customer,
        handlers::quotes::get_quote,
        handlers::quotes::create_quote,
        handlers::quotes::update_quote,
        handlers::quotes::delete_quote,
        handlers::quotes::approve_quote,
        handlers::quotes::decline_quote,

        // --- Jobs ---
        handlers::jobs::list_jobs,
        handlers::jobs::list_jobs_by_date,
        handlers::jobs::list_jobs_by_technician,
        handlers::jobs::list_jobs_by_customer,
        handlers::jobs::get_job,
        handlers::jobs::create_job,
        handlers::jobs::update_job,
        handlers::jobs::delete_job,
        handlers::jobs::start_job,
        handlers::jobs::complete_job,
        handlers::jobs::create_job_invoice,

        // --- Invoices ---
        handlers::invoices::list_invoices,
        handlers::invoices::list_invoices_by_customer,
        handlers::invoices::get_invoice,
        handlers::invoices::create_invoice,
        handlers::invoices::update_invoice,
        handlers::invoices::delete_invoice,
        handlers::invoices::send_invoice,
        handlers::invoices::pay_invoice,
        handlers::invoices::invoice_pdf,

        // --- Technicians ---
        handlers::technicians::list_technicians,
        handlers::technicians::get_technician,
        handlers::technicians::create_technician,
        handlers::technicians::update_technician,
        handlers::technicians::delete_technician,

        // --- Routes ---
        handlers::routes::list_routes,
        handlers::routes::list_routes_by_day,
        handlers::routes::list_routes_by_technician,
        handlers::routes::get_route,
        handlers::routes::create_route,
        handlers::routes::update_route,
        handlers::routes::delete_route,
        handlers::routes::add_job_to_route,
        handlers::routes::remove_job_from_route,
        handlers::routes::reorder_route,

        // --- Alerts ---
        handlers::alerts::list_alerts,
        handlers::alerts::alert_stats,
        handlers::alerts::get_alert,
        handlers::alerts::create_alert,
        handlers::alerts::update_alert,
        handlers::alerts::resolve_alert,
        handlers::alerts::delete_alert,

        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Portal ---
        handlers::portal::my_pools,
        handlers::portal::my_invoices,
        handlers::portal::my_invoice,
        handlers::portal::my_invoice_pdf,
        handlers::portal::my_jobs,
        handlers::portal::my_quotes,
        handlers::portal::my_service_history,
        handlers::portal::my_alerts,

        // --- Reports ---
        handlers::reports::revenue,
        handlers::reports::jobs_performance,
        handlers::reports::customer_stats,
        handlers::reports::technician_performance,
        handlers::reports::financial_summary,
        handlers::reports::dashboard_stats,
    ),
    components(
        schemas(
            handlers::MessageResponse,

            // --- Customers ---
            models::customer::CustomerStatus,
            models::customer::Customer,
            models::customer::Pool,
            models::customer::ChemReading,
            models::customer::CreateCustomerPayload,
            models::customer::UpdateCustomerPayload,
            models::customer::CreatePoolPayload,
            models::customer::CreateReadingPayload,

            // --- Quotes ---
            models::quote::QuoteStatus,
            models::quote::LineItem,
            models::quote::Quote,
            models::quote::CreateQuotePayload,
            models::quote::UpdateQuotePayload,
            models::quote::ApproveQuotePayload,
            models::quote::QuoteActionResponse,

            // --- Jobs ---
            models::job::JobStatus,
            models::job::Job,
            models::job::CreateJobPayload,
            models::job::UpdateJobPayload,
            models::job::CompleteJobPayload,
            models::job::JobActionResponse,

            // --- Invoices ---
            models::invoice::InvoiceStatus,
            models::invoice::Invoice,
            models::invoice::CreateInvoicePayload,
            models::invoice::UpdateInvoicePayload,
            models::invoice::InvoiceFromJobPayload,
            models::invoice::InvoiceActionResponse,

            // --- Technicians & Routes ---
            models::technician::TechnicianStatus,
            models::technician::Technician,
            models::technician::CreateTechnicianPayload,
            models::technician::UpdateTechnicianPayload,
            models::route::RouteStatus,
            models::route::Route,
            models::route::CreateRoutePayload,
            models::route::UpdateRoutePayload,
            models::route::ReorderRoutePayload,

            // --- Alerts ---
            models::alert::AlertType,
            models::alert::AlertSeverity,
            models::alert::Alert,
            models::alert::CreateAlertPayload,
            models::alert::UpdateAlertPayload,
            models::alert::SeverityCounts,
            models::alert::TypeCounts,
            models::alert::AlertStats,

            // --- Auth & Portal ---
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::TokenResponse,
            models::auth::CustomerProfile,
            models::portal::PortalPools,
            models::portal::InvoiceSummary,
            models::portal::PortalInvoices,
            models::portal::JobSummary,
            models::portal::PortalJobs,
            models::portal::QuoteSummary,
            models::portal::PortalQuotes,
            models::portal::ServiceRecord,
            models::portal::PortalServiceHistory,
            models::portal::AlertSummary,
            models::portal::PortalAlerts,

            // --- Reports ---
            models::reports::Period,
            models::reports::RevenueSummary,
            models::reports::RevenueBucket,
            models::reports::RevenueReport,
            models::reports::JobsPerformanceSummary,
            models::reports::ServiceTypeStats,
            models::reports::JobsPerformanceReport,
            models::reports::CustomerStatsReport,
            models::reports::TechnicianStats,
            models::reports::TechnicianPerformanceReport,
            models::reports::InvoiceFinancials,
            models::reports::QuoteFinancials,
            models::reports::FinancialSummaryReport,
            models::reports::CustomerCounts,
            models::reports::JobCounts,
            models::reports::AlertCounts,
            models::reports::RevenueTotals,
            models::reports::DashboardStats,
        )
    ),
    tags(
        (name = "Customers", description = "Clientes, piscinas e leituras químicas"),
        (name = "Quotes", description = "Orçamentos"),
        (name = "Jobs", description = "Serviços agendados"),
        (name = "Invoices", description = "Faturas e pagamentos"),
        (name = "Technicians", description = "Técnicos"),
        (name = "Routes", description = "Rotas de atendimento"),
        (name = "Alerts", description = "Alertas de piscinas"),
        (name = "Auth", description = "Acesso ao portal do cliente"),
        (name = "Portal", description = "Área do cliente autenticado"),
        (name = "Reports", description = "Relatórios gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
