// src/models/route.rs

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::{error::AppError, ids::new_id, validation::validate_weekday};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "route_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    #[default]
    Active,
    Inactive,
    Completed,
}

/// Rota diária de um técnico. `jobs` é a ordem das paradas e
/// `total_stops` sempre acompanha `jobs.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Route {
    #[schema(example = "route-1a2b3c4d")]
    pub id: String,
    #[schema(example = "Monday North Route")]
    pub name: String,
    pub technician_id: String,
    pub technician_name: String,
    #[schema(example = "Monday")]
    pub day: String,
    pub jobs: Vec<String>,
    pub total_stops: i32,
    /// Minutos
    #[schema(example = 240)]
    pub estimated_duration: i32,
    pub status: RouteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Route {
    fn sync_stops(&mut self) {
        self.total_stops = self.jobs.len() as i32;
        self.updated_at = Utc::now();
    }

    /// Retorna `false` quando o serviço já estava na rota.
    pub fn add_job(&mut self, job_id: &str) -> bool {
        if self.jobs.iter().any(|j| j == job_id) {
            return false;
        }
        self.jobs.push(job_id.to_string());
        self.sync_stops();
        true
    }

    pub fn remove_job(&mut self, job_id: &str) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j != job_id);
        let removed = self.jobs.len() != before;
        if removed {
            self.sync_stops();
        }
        removed
    }

    /// A nova ordem precisa ser uma permutação exata das paradas atuais.
    pub fn reorder(&mut self, jobs: Vec<String>) -> Result<(), AppError> {
        if jobs.len() != self.jobs.len() {
            return Err(AppError::InvalidRouteOrder);
        }
        let current: HashSet<&str> = self.jobs.iter().map(String::as_str).collect();
        let proposed: HashSet<&str> = jobs.iter().map(String::as_str).collect();
        if proposed.len() != jobs.len() || current != proposed {
            return Err(AppError::InvalidRouteOrder);
        }

        self.jobs = jobs;
        self.sync_stops();
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoutePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Monday North Route")]
    pub name: String,
    #[validate(length(min = 1, message = "required"))]
    pub technician_id: String,
    #[validate(length(min = 1, message = "required"))]
    pub technician_name: String,
    #[validate(custom(function = "validate_weekday"))]
    #[schema(example = "Monday")]
    pub day: String,
    #[serde(default)]
    pub jobs: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "must_not_be_negative"))]
    pub estimated_duration: i32,
    #[serde(default)]
    pub status: RouteStatus,
}

impl CreateRoutePayload {
    pub fn into_route(self) -> Route {
        let now = Utc::now();
        // Paradas repetidas no payload contam uma vez só
        let mut seen = HashSet::new();
        let jobs: Vec<String> = self.jobs.into_iter().filter(|j| seen.insert(j.clone())).collect();
        Route {
            id: new_id("route"),
            name: self.name,
            technician_id: self.technician_id,
            technician_name: self.technician_name,
            day: self.day,
            total_stops: jobs.len() as i32,
            jobs,
            estimated_duration: self.estimated_duration,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRoutePayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    pub technician_id: Option<String>,
    pub technician_name: Option<String>,
    #[validate(custom(function = "validate_weekday"))]
    pub day: Option<String>,
    pub jobs: Option<Vec<String>>,
    #[validate(range(min = 0, message = "must_not_be_negative"))]
    pub estimated_duration: Option<i32>,
    pub status: Option<RouteStatus>,
}

impl UpdateRoutePayload {
    pub fn apply(self, route: &mut Route) {
        if let Some(v) = self.name { route.name = v; }
        if let Some(v) = self.technician_id { route.technician_id = v; }
        if let Some(v) = self.technician_name { route.technician_name = v; }
        if let Some(v) = self.day { route.day = v; }
        if let Some(v) = self.estimated_duration { route.estimated_duration = v; }
        if let Some(v) = self.status { route.status = v; }
        if let Some(jobs) = self.jobs {
            let mut seen = HashSet::new();
            route.jobs = jobs.into_iter().filter(|j| seen.insert(j.clone())).collect();
        }
        route.sync_stops();
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteListQuery {
    #[param(example = "Monday")]
    pub day: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddJobQuery {
    pub job_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderRoutePayload {
    pub jobs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(jobs: &[&str]) -> Route {
        serde_json::from_value::<CreateRoutePayload>(serde_json::json!({
            "name": "Monday North",
            "technician_id": "tech-001",
            "technician_name": "Mike Johnson",
            "day": "Monday",
            "jobs": jobs,
            "estimated_duration": 240
        }))
        .unwrap()
        .into_route()
    }

    #[test]
    fn test_create_counts_stops() {
        let r = route(&["job-1", "job-2", "job-1"]);
        assert!(r.id.starts_with("route-"));
        assert_eq!(r.jobs, vec!["job-1", "job-2"]);
        assert_eq!(r.total_stops, 2);
        assert_eq!(r.status, RouteStatus::Active);
    }

    #[test]
    fn test_add_job_is_idempotent() {
        let mut r = route(&["job-1"]);
        assert!(r.add_job("job-2"));
        assert!(!r.add_job("job-2"));
        assert_eq!(r.jobs, vec!["job-1", "job-2"]);
        assert_eq!(r.total_stops, 2);
    }

    #[test]
    fn test_remove_job_is_idempotent() {
        let mut r = route(&["job-1", "job-2"]);
        assert!(r.remove_job("job-1"));
        assert!(!r.remove_job("job-1"));
        assert_eq!(r.jobs, vec!["job-2"]);
        assert_eq!(r.total_stops, 1);
    }

    #[test]
    fn test_reorder_accepts_permutation() {
        let mut r = route(&["job-1", "job-2", "job-3"]);
        r.reorder(vec!["job-3".into(), "job-1".into(), "job-2".into()]).unwrap();
        assert_eq!(r.jobs, vec!["job-3", "job-1", "job-2"]);
        assert_eq!(r.total_stops, 3);
    }

    #[test]
    fn test_reorder_rejects_other_sets() {
        let mut r = route(&["job-1", "job-2"]);
        // parada nova
        assert!(r.reorder(vec!["job-1".into(), "job-9".into()]).is_err());
        // parada faltando
        assert!(r.reorder(vec!["job-1".into()]).is_err());
        // duplicada
        assert!(r.reorder(vec!["job-1".into(), "job-1".into()]).is_err());
        assert_eq!(r.jobs, vec!["job-1", "job-2"]);
    }

    #[test]
    fn test_update_jobs_keeps_stop_count() {
        let mut r = route(&["job-1"]);
        UpdateRoutePayload {
            jobs: Some(vec!["job-4".into(), "job-5".into(), "job-6".into()]),
            ..Default::default()
        }
        .apply(&mut r);
        assert_eq!(r.total_stops, 3);

        UpdateRoutePayload { name: Some("Renamed".into()), ..Default::default() }.apply(&mut r);
        assert_eq!(r.total_stops, 3);
        assert_eq!(r.name, "Renamed");
    }
}
