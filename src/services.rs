pub mod auth;
pub use auth::AuthService;
pub mod customer_service;
pub use customer_service::CustomerService;
pub mod quote_service;
pub use quote_service::QuoteService;
pub mod job_service;
pub use job_service::JobService;
pub mod invoice_service;
pub use invoice_service::InvoiceService;
pub mod technician_service;
pub use technician_service::TechnicianService;
pub mod route_service;
pub use route_service::RouteService;
pub mod alert_service;
pub use alert_service::AlertService;
pub mod portal_service;
pub use portal_service::PortalService;
pub mod report_service;
pub use report_service::ReportService;
pub mod document_service;
pub use document_service::DocumentService;
pub mod seed_service;
pub use seed_service::SeedService;
