// src/config.rs

use std::{env, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        AlertRepository, CustomerAuthRepository, CustomerRepository, InvoiceRepository, JobRepository,
        QuoteRepository, RouteRepository, TechnicianRepository,
    },
    services::{
        AlertService, AuthService, CustomerService, DocumentService, InvoiceService, JobService,
        PortalService, QuoteService, ReportService, RouteService, SeedService, TechnicianService,
    },
};

/// Configuração lida do ambiente (`.env` incluso).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub token_ttl_days: i64,
    pub fonts_dir: String,
    pub company_name: String,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `from_env` para os testes não dependerem do processo
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} deve ser definida"));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_addr: or_default("BIND_ADDR", "0.0.0.0:8001"),
            db_max_connections: or_default("DB_MAX_CONNECTIONS", "5")
                .parse()
                .context("DB_MAX_CONNECTIONS inválido")?,
            token_ttl_days: or_default("TOKEN_TTL_DAYS", "7")
                .parse()
                .context("TOKEN_TTL_DAYS inválido")?,
            fonts_dir: or_default("FONTS_DIR", "./fonts"),
            company_name: or_default("COMPANY_NAME", "PoolPro"),
            seed_demo_data: or_default("SEED_DEMO_DATA", "false")
                .parse()
                .context("SEED_DEMO_DATA deve ser true ou false")?,
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&self.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(pool)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub customer_service: CustomerService,
    pub quote_service: QuoteService,
    pub job_service: JobService,
    pub invoice_service: InvoiceService,
    pub technician_service: TechnicianService,
    pub route_service: RouteService,
    pub alert_service: AlertService,
    pub portal_service: PortalService,
    pub report_service: ReportService,
    pub document_service: DocumentService,
    pub seed_service: SeedService,
}

impl AppState {
    pub fn new(config: &Config, db_pool: PgPool) -> anyhow::Result<Self> {
        let i18n_store = I18nStore::load()?;

        // --- Monta o gráfico de dependências ---
        let customer_repo = CustomerRepository::new();
        let quote_repo = QuoteRepository::new();
        let job_repo = JobRepository::new();
        let invoice_repo = InvoiceRepository::new();
        let technician_repo = TechnicianRepository::new();
        let route_repo = RouteRepository::new();
        let alert_repo = AlertRepository::new();

        Ok(Self {
            db_pool,
            i18n_store,
            auth_service: AuthService::new(
                customer_repo.clone(),
                CustomerAuthRepository::new(),
                config.jwt_secret.clone(),
                config.token_ttl_days,
            ),
            customer_service: CustomerService::new(customer_repo.clone()),
            quote_service: QuoteService::new(quote_repo.clone(), job_repo.clone(), customer_repo.clone()),
            job_service: JobService::new(job_repo.clone(), quote_repo.clone(), invoice_repo.clone()),
            invoice_service: InvoiceService::new(invoice_repo.clone()),
            technician_service: TechnicianService::new(technician_repo.clone()),
            route_service: RouteService::new(route_repo),
            alert_service: AlertService::new(alert_repo.clone()),
            portal_service: PortalService::new(
                invoice_repo.clone(),
                job_repo.clone(),
                quote_repo.clone(),
                alert_repo.clone(),
            ),
            report_service: ReportService::new(
                customer_repo,
                job_repo,
                quote_repo,
                invoice_repo,
                technician_repo,
                alert_repo,
            ),
            document_service: DocumentService::new(config.fonts_dir.clone(), config.company_name.clone()),
            seed_service: SeedService::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/poolpro"),
            ("JWT_SECRET", "segredo"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8001");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.token_ttl_days, 7);
        assert_eq!(config.fonts_dir, "./fonts");
        assert_eq!(config.company_name, "PoolPro");
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/poolpro")])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/poolpro"),
            ("JWT_SECRET", "segredo"),
            ("TOKEN_TTL_DAYS", "sete"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/poolpro"),
            ("JWT_SECRET", "segredo"),
            ("SEED_DEMO_DATA", "true"),
            ("COMPANY_NAME", "Blue Water"),
        ]))
        .unwrap();
        assert!(config.seed_demo_data);
        assert_eq!(config.company_name, "Blue Water");
    }
}
