// src/db/customer_auth_repo.rs

use chrono::Utc;
use sqlx::{Executor, Postgres};

use crate::{common::error::AppError, common::ids::new_id, models::auth::CustomerAuth};

// Logins do portal (tabela 'customer_auth'); e-mails chegam já normalizados
#[derive(Clone, Default)]
pub struct CustomerAuthRepository;

impl CustomerAuthRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_email<'e, E>(&self, executor: E, email: &str) -> Result<Option<CustomerAuth>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let auth = sqlx::query_as!(
            CustomerAuth,
            r#"
            SELECT id, customer_id, email, password_hash, created_at, updated_at
            FROM customer_auth
            WHERE email = $1
            "#,
            email
        )
        .fetch_optional(executor)
        .await?;

        Ok(auth)
    }

    // E-mail duplicado vira EmailAlreadyExists (409)
    pub async fn create<'e, E>(
        &self,
        executor: E,
        customer_id: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<CustomerAuth, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let now = Utc::now();
        sqlx::query_as!(
            CustomerAuth,
            r#"
            INSERT INTO customer_auth (id, customer_id, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, customer_id, email, password_hash, created_at, updated_at
            "#,
            new_id("auth"),
            customer_id,
            email,
            password_hash,
            now,
            now
        )
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }
}
