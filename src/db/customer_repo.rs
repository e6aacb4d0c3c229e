// src/db/customer_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{types::Json, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::customer::{Customer, CustomerStatus, Pool},
};

// Linha crua da tabela; as piscinas vêm como JSONB
struct CustomerRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    address: String,
    status: CustomerStatus,
    account_balance: Decimal,
    service_day: String,
    route_position: i32,
    autopay: bool,
    pools: Json<Vec<Pool>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            status: row.status,
            account_balance: row.account_balance,
            service_day: row.service_day,
            route_position: row.route_position,
            autopay: row.autopay,
            pools: row.pools.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone, Default)]
pub struct CustomerRepository;

impl CustomerRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, customer: &Customer) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            CustomerRow,
            r#"
            INSERT INTO customers (
                id, name, email, phone, address, status, account_balance, service_day,
                route_position, autopay, pools, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING
                id, name, email, phone, address,
                status as "status: CustomerStatus",
                account_balance, service_day, route_position, autopay,
                pools as "pools: Json<Vec<Pool>>",
                created_at, updated_at
            "#,
            customer.id,
            customer.name,
            customer.email,
            customer.phone,
            customer.address,
            customer.status as CustomerStatus,
            customer.account_balance,
            customer.service_day,
            customer.route_position,
            customer.autopay,
            Json(&customer.pools) as _,
            customer.created_at,
            customer.updated_at
        )
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            CustomerRow,
            r#"
            SELECT
                id, name, email, phone, address,
                status as "status: CustomerStatus",
                account_balance, service_day, route_position, autopay,
                pools as "pools: Json<Vec<Pool>>",
                created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Customer::from))
    }

    /// Igual ao `find_by_id`, mas trava a linha até o fim da transação.
    pub async fn find_by_id_for_update<'e, E>(&self, executor: E, id: &str) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            CustomerRow,
            r#"
            SELECT
                id, name, email, phone, address,
                status as "status: CustomerStatus",
                account_balance, service_day, route_position, autopay,
                pools as "pools: Json<Vec<Pool>>",
                created_at, updated_at
            FROM customers
            WHERE id = $1
            FOR UPDATE
            "#,
            id
        )
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Customer::from))
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as!(
            CustomerRow,
            r#"
            SELECT
                id, name, email, phone, address,
                status as "status: CustomerStatus",
                account_balance, service_day, route_position, autopay,
                pools as "pools: Json<Vec<Pool>>",
                created_at, updated_at
            FROM customers
            ORDER BY created_at, id
            "#
        )
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Grava o documento inteiro (campos + piscinas).
    pub async fn update<'e, E>(&self, executor: E, customer: &Customer) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as!(
            CustomerRow,
            r#"
            UPDATE customers SET
                name = $2, email = $3, phone = $4, address = $5, status = $6,
                account_balance = $7, service_day = $8, route_position = $9, autopay = $10,
                pools = $11, updated_at = $12
            WHERE id = $1
            RETURNING
                id, name, email, phone, address,
                status as "status: CustomerStatus",
                account_balance, service_day, route_position, autopay,
                pools as "pools: Json<Vec<Pool>>",
                created_at, updated_at
            "#,
            customer.id,
            customer.name,
            customer.email,
            customer.phone,
            customer.address,
            customer.status as CustomerStatus,
            customer.account_balance,
            customer.service_day,
            customer.route_position,
            customer.autopay,
            Json(&customer.pools) as _,
            customer.updated_at
        )
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::CustomerNotFound)?;

        Ok(row.into())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query!("DELETE FROM customers WHERE id = $1", id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar!(r#"SELECT COUNT(*) as "count!" FROM customers"#)
            .fetch_one(executor)
            .await?;
        Ok(count)
    }
}
