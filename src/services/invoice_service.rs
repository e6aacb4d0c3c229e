// src/services/invoice_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::InvoiceRepository,
    models::invoice::{CreateInvoicePayload, Invoice, InvoiceStatus, UpdateInvoicePayload},
};

#[derive(Clone)]
pub struct InvoiceService {
    repo: InvoiceRepository,
}

impl InvoiceService {
    pub fn new(repo: InvoiceRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, pool: &PgPool, status: Option<InvoiceStatus>) -> Result<Vec<Invoice>, AppError> {
        self.repo.list(pool, status).await
    }

    pub async fn list_by_customer(&self, pool: &PgPool, customer_id: &str) -> Result<Vec<Invoice>, AppError> {
        self.repo.list_by_customer(pool, customer_id).await
    }

    pub async fn get(&self, pool: &PgPool, id: &str) -> Result<Invoice, AppError> {
        self.repo.find_by_id(pool, id).await?.ok_or(AppError::InvoiceNotFound)
    }

    pub async fn create(&self, pool: &PgPool, payload: CreateInvoicePayload) -> Result<Invoice, AppError> {
        self.repo.insert(pool, &payload.into_invoice()).await
    }

    pub async fn update(&self, pool: &PgPool, id: &str, payload: UpdateInvoicePayload) -> Result<Invoice, AppError> {
        self.modify(pool, id, |inv| {
            payload.apply(inv);
            Ok(())
        })
        .await
    }

    pub async fn delete(&self, pool: &PgPool, id: &str) -> Result<(), AppError> {
        match self.repo.delete(pool, id).await? {
            0 => Err(AppError::InvoiceNotFound),
            _ => Ok(()),
        }
    }

    pub async fn send(&self, pool: &PgPool, id: &str) -> Result<Invoice, AppError> {
        self.modify(pool, id, |inv| {
            inv.send();
            Ok(())
        })
        .await
    }

    pub async fn record_payment(&self, pool: &PgPool, id: &str, amount: Decimal) -> Result<Invoice, AppError> {
        // Valor inválido não precisa nem abrir transação
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidPaymentAmount);
        }
        let invoice = self.modify(pool, id, |inv| inv.record_payment(amount)).await?;
        tracing::info!(
            "💰 Pagamento de {} na fatura {} (saldo {})",
            amount,
            invoice.invoice_number,
            invoice.balance_due
        );
        Ok(invoice)
    }

    async fn modify<F>(&self, pool: &PgPool, id: &str, change: F) -> Result<Invoice, AppError>
    where
        F: FnOnce(&mut Invoice) -> Result<(), AppError>,
    {
        let mut tx = pool.begin().await?;
        let mut invoice = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::InvoiceNotFound)?;

        change(&mut invoice)?;
        let saved = self.repo.update(&mut *tx, &invoice).await?;
        tx.commit().await?;
        Ok(saved)
    }
}

/// Mensagem do `POST /invoices/{id}/pay`, sem zeros à direita (`$156.6`).
pub fn payment_message(amount: Decimal) -> String {
    format!("Payment of ${} recorded", amount.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_message() {
        assert_eq!(payment_message(dec!(156.60)), "Payment of $156.6 recorded");
        assert_eq!(payment_message(dec!(100)), "Payment of $100 recorded");
    }
}
