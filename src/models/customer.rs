// src/models/customer.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{
    error::AppError,
    ids::new_id,
    validation::{validate_hex_color, validate_weekday},
};

pub const DEFAULT_POOL_COLOR: &str = "#3B82F6";

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "customer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Paused,
    Inactive,
}

// --- DOCUMENTOS EMBUTIDOS (JSONB) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChemReading {
    #[schema(value_type = String, format = Date, example = "2025-01-15")]
    pub date: NaiveDate,
    #[schema(example = 3.2)]
    pub fc: f64, // Cloro livre
    #[schema(example = 7.4)]
    pub ph: f64,
    #[schema(example = 120)]
    pub ta: i32, // Alcalinidade total
    #[schema(example = 250)]
    pub ch: i32, // Dureza cálcica
    #[schema(example = 50)]
    pub cya: i32, // Ácido cianúrico
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Pool {
    #[schema(example = "pool-1a2b3c4d")]
    pub id: String,
    #[schema(example = "Main Pool")]
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "In-Ground")]
    pub pool_type: String,
    #[schema(example = "#3B82F6")]
    pub color: String,
    #[schema(example = 25000)]
    pub gallons: i32,
    #[serde(default)]
    #[schema(example = json!(["Pump", "Filter", "Heater"]))]
    pub equipment: Vec<String>,
    #[schema(value_type = String, format = Date, example = "2025-01-15")]
    pub last_service: NaiveDate,
    #[serde(default)]
    pub chem_readings: Vec<ChemReading>,
}

// --- CLIENTE ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    #[schema(example = "cust-1a2b3c4d")]
    pub id: String,
    #[schema(example = "John Anderson")]
    pub name: String,
    #[schema(example = "john.anderson@email.com")]
    pub email: String,
    #[schema(example = "(555) 123-4567")]
    pub phone: String,
    #[schema(example = "1234 Oak Street, Austin, TX 78701")]
    pub address: String,
    pub status: CustomerStatus,
    #[schema(example = 0.0)]
    pub account_balance: Decimal,
    #[schema(example = "Monday")]
    pub service_day: String,
    #[schema(example = 1)]
    pub route_position: i32,
    pub autopay: bool,

    // As piscinas vivem dentro do documento do cliente
    pub pools: Vec<Pool>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn pool(&self, pool_id: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.id == pool_id)
    }

    /// Registra a leitura na piscina e atualiza o `last_service` com a data dela.
    pub fn add_reading(&mut self, pool_id: &str, reading: ChemReading) -> Result<(), AppError> {
        let pool = self
            .pools
            .iter_mut()
            .find(|p| p.id == pool_id)
            .ok_or(AppError::PoolNotFound)?;

        pool.last_service = reading.date;
        pool.chem_readings.push(reading);
        self.updated_at = Utc::now();
        Ok(())
    }
}

// --- PAYLOADS ---

fn default_color() -> String {
    DEFAULT_POOL_COLOR.to_string()
}

fn default_route_position() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePoolPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Main Pool")]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "In-Ground")]
    pub pool_type: String,

    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,

    #[validate(range(min = 0, message = "must_not_be_negative"))]
    #[schema(example = 25000)]
    pub gallons: i32,

    #[serde(default)]
    pub equipment: Vec<String>,

    #[schema(value_type = String, format = Date, example = "2025-01-15")]
    pub last_service: NaiveDate,
}

impl CreatePoolPayload {
    pub fn into_pool(self) -> Pool {
        Pool {
            id: new_id("pool"),
            name: self.name,
            pool_type: self.pool_type,
            color: self.color,
            gallons: self.gallons,
            equipment: self.equipment,
            last_service: self.last_service,
            chem_readings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReadingPayload {
    #[schema(value_type = String, format = Date, example = "2025-01-22")]
    pub date: NaiveDate,
    #[validate(range(min = 0.0, message = "must_not_be_negative"))]
    pub fc: f64,
    #[validate(range(min = 0.0, max = 14.0, message = "invalid_ph"))]
    pub ph: f64,
    #[validate(range(min = 0, message = "must_not_be_negative"))]
    pub ta: i32,
    #[validate(range(min = 0, message = "must_not_be_negative"))]
    pub ch: i32,
    #[validate(range(min = 0, message = "must_not_be_negative"))]
    pub cya: i32,
}

impl From<CreateReadingPayload> for ChemReading {
    fn from(p: CreateReadingPayload) -> Self {
        ChemReading { date: p.date, fc: p.fc, ph: p.ph, ta: p.ta, ch: p.ch, cya: p.cya }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "John Anderson")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "john.anderson@email.com")]
    pub email: String,

    #[validate(length(min = 1, message = "required"))]
    pub phone: String,

    #[validate(length(min = 1, message = "required"))]
    pub address: String,

    #[serde(default)]
    pub status: CustomerStatus,

    #[serde(default)]
    pub account_balance: Decimal,

    #[validate(custom(function = "validate_weekday"))]
    #[schema(example = "Monday")]
    pub service_day: String,

    #[serde(default = "default_route_position")]
    #[validate(range(min = 1, message = "invalid_route_position"))]
    pub route_position: i32,

    #[serde(default)]
    pub autopay: bool,

    #[serde(default)]
    #[validate(nested)]
    pub pools: Vec<CreatePoolPayload>,
}

impl CreateCustomerPayload {
    pub fn into_customer(self) -> Customer {
        let now = Utc::now();
        Customer {
            id: new_id("cust"),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            status: self.status,
            account_balance: self.account_balance,
            service_day: self.service_day,
            route_position: self.route_position,
            autopay: self.autopay,
            pools: self.pools.into_iter().map(CreatePoolPayload::into_pool).collect(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Atualização parcial: só os campos presentes são aplicados.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<CustomerStatus>,
    pub account_balance: Option<Decimal>,
    #[validate(custom(function = "validate_weekday"))]
    pub service_day: Option<String>,
    #[validate(range(min = 1, message = "invalid_route_position"))]
    pub route_position: Option<i32>,
    pub autopay: Option<bool>,
}

impl UpdateCustomerPayload {
    pub fn apply(self, customer: &mut Customer) {
        if let Some(v) = self.name { customer.name = v; }
        if let Some(v) = self.email { customer.email = v; }
        if let Some(v) = self.phone { customer.phone = v; }
        if let Some(v) = self.address { customer.address = v; }
        if let Some(v) = self.status { customer.status = v; }
        if let Some(v) = self.account_balance { customer.account_balance = v; }
        if let Some(v) = self.service_day { customer.service_day = v; }
        if let Some(v) = self.route_position { customer.route_position = v; }
        if let Some(v) = self.autopay { customer.autopay = v; }
        customer.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payload() -> CreateCustomerPayload {
        serde_json::from_value(serde_json::json!({
            "name": "Test Customer",
            "email": "test@example.com",
            "phone": "(555) 999-0000",
            "address": "1 Test Way",
            "service_day": "Friday",
            "pools": [{
                "name": "Backyard",
                "type": "In-Ground",
                "gallons": 15000,
                "last_service": "2025-01-10"
            }]
        }))
        .unwrap()
    }

    fn reading(date: &str) -> ChemReading {
        ChemReading {
            date: date.parse().unwrap(),
            fc: 3.0, ph: 7.4, ta: 110, ch: 250, cya: 40,
        }
    }

    #[test]
    fn test_create_payload_defaults() {
        let p = payload();
        assert!(p.validate().is_ok());
        assert_eq!(p.status, CustomerStatus::Active);
        assert_eq!(p.route_position, 1);
        assert!(!p.autopay);
        assert_eq!(p.pools[0].color, DEFAULT_POOL_COLOR);
    }

    #[test]
    fn test_into_customer_generates_ids() {
        let customer = payload().into_customer();
        assert!(customer.id.starts_with("cust-"));
        assert!(customer.pools[0].id.starts_with("pool-"));
        assert!(customer.pools[0].chem_readings.is_empty());
    }

    #[test]
    fn test_invalid_nested_pool_is_rejected() {
        let mut p = payload();
        p.pools[0].gallons = -1;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_invalid_service_day_is_rejected() {
        let mut p = payload();
        p.service_day = "Someday".into();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_add_reading_updates_last_service() {
        let mut customer = payload().into_customer();
        let pool_id = customer.pools[0].id.clone();

        customer.add_reading(&pool_id, reading("2025-01-22")).unwrap();

        let pool = customer.pool(&pool_id).unwrap();
        assert_eq!(pool.chem_readings.len(), 1);
        assert_eq!(pool.last_service.to_string(), "2025-01-22");
    }

    #[test]
    fn test_add_reading_unknown_pool() {
        let mut customer = payload().into_customer();
        let err = customer.add_reading("pool-nope", reading("2025-01-22")).unwrap_err();
        assert!(matches!(err, AppError::PoolNotFound));
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let mut customer = payload().into_customer();
        let patch = UpdateCustomerPayload {
            status: Some(CustomerStatus::Paused),
            account_balance: Some(dec!(-125.50)),
            ..Default::default()
        };
        patch.apply(&mut customer);

        assert_eq!(customer.status, CustomerStatus::Paused);
        assert_eq!(customer.account_balance, dec!(-125.50));
        assert_eq!(customer.name, "Test Customer");
        assert_eq!(customer.service_day, "Friday");
    }

    #[test]
    fn test_pool_serializes_type_field() {
        let customer = payload().into_customer();
        let json = serde_json::to_value(&customer.pools[0]).unwrap();
        assert_eq!(json["type"], "In-Ground");
        assert!(json.get("pool_type").is_none());
    }
}
