// src/models/technician.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{
    ids::new_id,
    validation::{validate_hex_color, validate_weekdays},
};
use crate::models::customer::DEFAULT_POOL_COLOR;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "technician_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TechnicianStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Technician {
    #[schema(example = "tech-1a2b3c4d")]
    pub id: String,
    #[schema(example = "Mike Johnson")]
    pub name: String,
    #[schema(example = "mike@poolpro.com")]
    pub email: String,
    #[schema(example = "(555) 111-2222")]
    pub phone: String,
    #[schema(example = "#3B82F6")]
    pub color: String,
    pub status: TechnicianStatus,
    #[schema(example = json!(["Monday", "Wednesday", "Friday"]))]
    pub assigned_days: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_POOL_COLOR.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTechnicianPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Mike Johnson")]
    pub name: String,
    #[validate(email(message = "invalid_email"))]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub phone: String,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    #[serde(default)]
    pub status: TechnicianStatus,
    #[serde(default)]
    #[validate(custom(function = "validate_weekdays"))]
    pub assigned_days: Vec<String>,
}

impl CreateTechnicianPayload {
    pub fn into_technician(self) -> Technician {
        let now = Utc::now();
        Technician {
            id: new_id("tech"),
            name: self.name,
            email: self.email,
            phone: self.phone,
            color: self.color,
            status: self.status,
            assigned_days: self.assigned_days,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTechnicianPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    pub status: Option<TechnicianStatus>,
    #[validate(custom(function = "validate_weekdays"))]
    pub assigned_days: Option<Vec<String>>,
}

impl UpdateTechnicianPayload {
    pub fn apply(self, tech: &mut Technician) {
        if let Some(v) = self.name { tech.name = v; }
        if let Some(v) = self.email { tech.email = v; }
        if let Some(v) = self.phone { tech.phone = v; }
        if let Some(v) = self.color { tech.color = v; }
        if let Some(v) = self.status { tech.status = v; }
        if let Some(v) = self.assigned_days { tech.assigned_days = v; }
        tech.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateTechnicianPayload {
        serde_json::from_value(serde_json::json!({
            "name": "Mike Johnson",
            "email": "mike@poolpro.com",
            "phone": "(555) 111-2222",
            "assigned_days": ["Monday", "Wednesday"]
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let p = payload();
        assert!(p.validate().is_ok());
        let tech = p.into_technician();
        assert!(tech.id.starts_with("tech-"));
        assert_eq!(tech.color, "#3B82F6");
        assert_eq!(tech.status, TechnicianStatus::Active);
    }

    #[test]
    fn test_rejects_unknown_weekday_and_bad_color() {
        let mut p = payload();
        p.assigned_days.push("Caturday".into());
        assert!(p.validate().is_err());

        let mut p = payload();
        p.color = "blue".into();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_update_merges() {
        let mut tech = payload().into_technician();
        UpdateTechnicianPayload {
            status: Some(TechnicianStatus::Inactive),
            ..Default::default()
        }
        .apply(&mut tech);
        assert_eq!(tech.status, TechnicianStatus::Inactive);
        assert_eq!(tech.name, "Mike Johnson");
        assert_eq!(tech.assigned_days, vec!["Monday", "Wednesday"]);
    }
}
