pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod quote_repo;
pub use quote_repo::QuoteRepository;
pub mod job_repo;
pub use job_repo::JobRepository;
pub mod invoice_repo;
pub use invoice_repo::InvoiceRepository;
pub mod technician_repo;
pub use technician_repo::TechnicianRepository;
pub mod route_repo;
pub use route_repo::RouteRepository;
pub mod alert_repo;
pub use alert_repo::AlertRepository;
pub mod customer_auth_repo;
pub use customer_auth_repo::CustomerAuthRepository;
