// src/models/job.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::ids::new_id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "job_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Job {
    #[schema(example = "job-1a2b3c4d")]
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_address: String,
    pub quote_id: Option<String>,
    pub status: JobStatus,
    #[schema(example = "Routine Service")]
    pub service_type: String,
    #[schema(value_type = String, format = Date, example = "2025-01-20")]
    pub scheduled_date: NaiveDate,
    #[schema(example = "09:00 AM")]
    pub scheduled_time: Option<String>,
    // Nome do técnico (texto livre, como vem do front)
    #[schema(example = "Mike Johnson")]
    pub technician: Option<String>,
    pub technician_id: Option<String>,
    // IDs das piscinas atendidas
    pub pools: Vec<String>,
    pub notes: Option<String>,
    pub completion_notes: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn start(&mut self) {
        self.status = JobStatus::InProgress;
        self.updated_at = Utc::now();
    }

    pub fn complete(&mut self, completion_notes: Option<String>) {
        let now = Utc::now();
        self.status = JobStatus::Completed;
        self.completed_at = Some(now);
        if let Some(notes) = completion_notes.filter(|n| !n.trim().is_empty()) {
            self.completion_notes = Some(notes);
        }
        self.updated_at = now;
    }

    /// O serviço pertence ao técnico pelo ID ou, sem ID, pelo nome.
    pub fn is_assigned_to(&self, technician_id: &str, technician_name: &str) -> bool {
        match &self.technician_id {
            Some(id) => id == technician_id,
            None => self.technician.as_deref() == Some(technician_name),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateJobPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "cust-2")]
    pub customer_id: String,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Sarah Wilson")]
    pub customer_name: String,
    #[serde(default)]
    pub customer_address: String,
    pub quote_id: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "One-time Service")]
    pub service_type: String,
    #[schema(value_type = String, format = Date, example = "2025-01-20")]
    pub scheduled_date: NaiveDate,
    #[schema(example = "02:00 PM")]
    pub scheduled_time: Option<String>,
    pub technician: Option<String>,
    pub technician_id: Option<String>,
    #[serde(default)]
    pub pools: Vec<String>,
    pub notes: Option<String>,
}

impl CreateJobPayload {
    pub fn into_job(self) -> Job {
        let now = Utc::now();
        let completed_at = (self.status == JobStatus::Completed).then_some(now);
        Job {
            id: new_id("job"),
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            customer_address: self.customer_address,
            quote_id: self.quote_id,
            status: self.status,
            service_type: self.service_type,
            scheduled_date: self.scheduled_date,
            scheduled_time: self.scheduled_time,
            technician: self.technician,
            technician_id: self.technician_id,
            pools: self.pools,
            notes: self.notes,
            completion_notes: None,
            completed_at,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateJobPayload {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub quote_id: Option<String>,
    pub status: Option<JobStatus>,
    #[validate(length(min = 1, message = "required"))]
    pub service_type: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub technician: Option<String>,
    pub technician_id: Option<String>,
    pub pools: Option<Vec<String>>,
    pub notes: Option<String>,
    pub completion_notes: Option<String>,
}

impl UpdateJobPayload {
    pub fn apply(self, job: &mut Job) {
        if let Some(v) = self.customer_id { job.customer_id = v; }
        if let Some(v) = self.customer_name { job.customer_name = v; }
        if let Some(v) = self.customer_address { job.customer_address = v; }
        if let Some(v) = self.quote_id { job.quote_id = Some(v); }
        if let Some(v) = self.service_type { job.service_type = v; }
        if let Some(v) = self.scheduled_date { job.scheduled_date = v; }
        if let Some(v) = self.scheduled_time { job.scheduled_time = Some(v); }
        if let Some(v) = self.technician { job.technician = Some(v); }
        if let Some(v) = self.technician_id { job.technician_id = Some(v); }
        if let Some(v) = self.pools { job.pools = v; }
        if let Some(v) = self.notes { job.notes = Some(v); }
        if let Some(v) = self.completion_notes { job.completion_notes = Some(v); }

        // Mudar o status para "completed" carimba a hora da conclusão
        if let Some(status) = self.status {
            job.status = status;
            if status == JobStatus::Completed {
                job.completed_at = Some(Utc::now());
            }
        }
        job.updated_at = Utc::now();
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompleteJobPayload {
    #[schema(example = "Pool balanced. All equipment functioning properly.")]
    pub completion_notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobActionResponse {
    #[schema(example = "Job started")]
    pub message: String,
    pub job: Job,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        serde_json::from_value::<CreateJobPayload>(serde_json::json!({
            "customer_id": "cust-2",
            "customer_name": "Sarah Wilson",
            "service_type": "One-time Service",
            "scheduled_date": "2025-01-20",
            "technician": "David Chen",
            "pools": ["pool-2"]
        }))
        .unwrap()
        .into_job()
    }

    #[test]
    fn test_new_job_defaults() {
        let job = job();
        assert!(job.id.starts_with("job-"));
        assert_eq!(job.status, JobStatus::Scheduled);
        assert!(job.completed_at.is_none());
        assert_eq!(job.customer_address, "");
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_value(JobStatus::InProgress).unwrap();
        assert_eq!(json, "in-progress");
        let parsed: JobStatus = serde_json::from_value(serde_json::json!("completed")).unwrap();
        assert_eq!(parsed, JobStatus::Completed);
    }

    #[test]
    fn test_start_then_complete() {
        let mut job = job();
        job.start();
        assert_eq!(job.status, JobStatus::InProgress);

        job.complete(Some("All good".into()));
        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.completed_at.is_some());
        assert_eq!(job.completion_notes.as_deref(), Some("All good"));
    }

    #[test]
    fn test_complete_without_notes_keeps_previous() {
        let mut job = job();
        job.completion_notes = Some("earlier".into());
        job.complete(None);
        assert_eq!(job.completion_notes.as_deref(), Some("earlier"));
    }

    #[test]
    fn test_update_to_completed_sets_completed_at() {
        let mut job = job();
        UpdateJobPayload { status: Some(JobStatus::Completed), ..Default::default() }.apply(&mut job);
        assert!(job.completed_at.is_some());

        let mut other = self::job();
        UpdateJobPayload { notes: Some("gate code 1234".into()), ..Default::default() }.apply(&mut other);
        assert!(other.completed_at.is_none());
        assert_eq!(other.notes.as_deref(), Some("gate code 1234"));
    }

    #[test]
    fn test_is_assigned_to() {
        let mut job = job();
        assert!(job.is_assigned_to("tech-003", "David Chen"));
        assert!(!job.is_assigned_to("tech-001", "Mike Johnson"));

        job.technician_id = Some("tech-001".into());
        assert!(job.is_assigned_to("tech-001", "Someone Else"));
        assert!(!job.is_assigned_to("tech-003", "David Chen"));
    }
}
