// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{CustomerAuthRepository, CustomerRepository},
    models::{
        auth::{Claims, LoginPayload, RegisterPayload, TokenResponse},
        customer::Customer,
    },
};

#[derive(Clone)]
pub struct AuthService {
    customer_repo: CustomerRepository,
    auth_repo: CustomerAuthRepository,
    jwt_secret: String,
    token_ttl_days: i64,
}

impl AuthService {
    pub fn new(
        customer_repo: CustomerRepository,
        auth_repo: CustomerAuthRepository,
        jwt_secret: String,
        token_ttl_days: i64,
    ) -> Self {
        Self { customer_repo, auth_repo, jwt_secret, token_ttl_days }
    }

    pub async fn register(&self, pool: &PgPool, payload: RegisterPayload) -> Result<TokenResponse, AppError> {
        let customer = self
            .customer_repo
            .find_by_id(pool, &payload.customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        let email = normalize_email(&payload.email);

        // Checagem antecipada; o índice UNIQUE cobre a corrida
        if self.auth_repo.find_by_email(pool, &email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        let password_hash = hash_password(payload.password).await?;
        self.auth_repo
            .create(pool, &customer.id, &email, &password_hash)
            .await?;

        tracing::info!("🔑 Acesso ao portal criado para o cliente {}", customer.id);
        let token = self.create_token(&customer.id)?;
        Ok(TokenResponse::bearer(token, &customer))
    }

    pub async fn login(&self, pool: &PgPool, payload: LoginPayload) -> Result<TokenResponse, AppError> {
        let auth = self
            .auth_repo
            .find_by_email(pool, &normalize_email(&payload.email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = payload.password;
        let password_hash = auth.password_hash.clone();

        // bcrypt é caro: roda fora do executor assíncrono
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let customer = self
            .customer_repo
            .find_by_id(pool, &auth.customer_id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let token = self.create_token(&customer.id)?;
        Ok(TokenResponse::bearer(token, &customer))
    }

    /// Token -> cliente. Token inválido, expirado ou de cliente removido dão `InvalidToken`.
    pub async fn validate_token(&self, pool: &PgPool, token: &str) -> Result<Customer, AppError> {
        let claims = self.decode_token(token)?;
        self.customer_repo
            .find_by_id(pool, &claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims)
    }

    pub fn create_token(&self, customer_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::days(self.token_ttl_days);

        let claims = Claims {
            sub: customer_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

/// E-mails do portal são gravados e buscados em minúsculas.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str, ttl_days: i64) -> AuthService {
        AuthService::new(
            CustomerRepository::new(),
            CustomerAuthRepository::new(),
            secret.to_string(),
            ttl_days,
        )
    }

    #[test]
    fn test_token_round_trip_keeps_subject() {
        let auth = service("segredo-de-teste", 7);
        let token = auth.create_token("cust-1").unwrap();
        let claims = auth.decode_token(&token).unwrap();
        assert_eq!(claims.sub, "cust-1");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_with_other_secret_is_rejected() {
        let token = service("um", 7).create_token("cust-1").unwrap();
        let err = service("outro", 7).decode_token(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = service("segredo", -1);
        let token = auth.create_token("cust-1").unwrap();
        assert!(matches!(auth.decode_token(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(service("s", 7).decode_token("not-a-jwt"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_email_case_is_ignored() {
        assert_eq!(normalize_email("John.Anderson@Email.com"), "john.anderson@email.com");
        assert_eq!(normalize_email(" john@x.com "), normalize_email("JOHN@X.COM"));
    }

    #[tokio::test]
    async fn test_hash_password_verifies() {
        let hashed = hash_password("password123".to_string()).await.unwrap();
        assert!(verify("password123", &hashed).unwrap());
        assert!(!verify("wrong", &hashed).unwrap());
    }
}
