// src/models/alert.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::ids::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "alert_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Chemical,
    Flow,
    Leak,
    Time,
    Cost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "alert_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Alert {
    #[schema(example = "alert-1a2b3c4d")]
    pub id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    #[schema(example = "Low Chlorine Level")]
    pub title: String,
    #[schema(example = "Free chlorine at 0.8 ppm, below the 1.0 ppm minimum.")]
    pub message: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub pool_id: Option<String>,
    pub pool_name: Option<String>,
    pub job_id: Option<String>,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Alert {
    /// Marca como resolvido; `resolved_at` sempre recebe o instante atual.
    pub fn resolve(&mut self) {
        let now = Utc::now();
        self.resolved = true;
        self.resolved_at = Some(now);
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAlertPayload {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    #[validate(length(min = 1, message = "required"))]
    pub title: String,
    #[validate(length(min = 1, message = "required"))]
    pub message: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub pool_id: Option<String>,
    pub pool_name: Option<String>,
    pub job_id: Option<String>,
    #[serde(default)]
    pub resolved: bool,
}

impl CreateAlertPayload {
    pub fn into_alert(self) -> Alert {
        let now = Utc::now();
        Alert {
            id: new_id("alert"),
            alert_type: self.alert_type,
            severity: self.severity,
            title: self.title,
            message: self.message,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            pool_id: self.pool_id,
            pool_name: self.pool_name,
            job_id: self.job_id,
            resolved: self.resolved,
            resolved_at: self.resolved.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAlertPayload {
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub severity: Option<AlertSeverity>,
    #[validate(length(min = 1, message = "required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub message: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub pool_id: Option<String>,
    pub pool_name: Option<String>,
    pub job_id: Option<String>,
    pub resolved: Option<bool>,
}

impl UpdateAlertPayload {
    pub fn apply(self, alert: &mut Alert) {
        if let Some(v) = self.alert_type { alert.alert_type = v; }
        if let Some(v) = self.severity { alert.severity = v; }
        if let Some(v) = self.title { alert.title = v; }
        if let Some(v) = self.message { alert.message = v; }
        if let Some(v) = self.customer_id { alert.customer_id = Some(v); }
        if let Some(v) = self.customer_name { alert.customer_name = Some(v); }
        if let Some(v) = self.pool_id { alert.pool_id = Some(v); }
        if let Some(v) = self.pool_name { alert.pool_name = Some(v); }
        if let Some(v) = self.job_id { alert.job_id = Some(v); }

        // Só a virada false -> true carimba `resolved_at`
        match self.resolved {
            Some(true) if !alert.resolved => alert.resolve(),
            Some(true) => {}
            Some(false) => {
                alert.resolved = false;
                alert.resolved_at = None;
            }
            None => {}
        }
        alert.updated_at = Utc::now();
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlertListQuery {
    pub resolved: Option<bool>,
    pub severity: Option<AlertSeverity>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub customer_id: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct TypeCounts {
    pub chemical: usize,
    pub flow: usize,
    pub leak: usize,
    pub time: usize,
    pub cost: usize,
}

/// Resposta do `GET /alerts/stats/summary`. Os agrupamentos contam só os não resolvidos.
#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct AlertStats {
    pub total: usize,
    pub unresolved: usize,
    pub resolved: usize,
    pub by_severity: SeverityCounts,
    pub by_type: TypeCounts,
}

impl AlertStats {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut stats = AlertStats { total: alerts.len(), ..Default::default() };

        for alert in alerts {
            if alert.resolved {
                stats.resolved += 1;
                continue;
            }
            stats.unresolved += 1;

            match alert.severity {
                AlertSeverity::High => stats.by_severity.high += 1,
                AlertSeverity::Medium => stats.by_severity.medium += 1,
                AlertSeverity::Low => stats.by_severity.low += 1,
            }
            match alert.alert_type {
                AlertType::Chemical => stats.by_type.chemical += 1,
                AlertType::Flow => stats.by_type.flow += 1,
                AlertType::Leak => stats.by_type.leak += 1,
                AlertType::Time => stats.by_type.time += 1,
                AlertType::Cost => stats.by_type.cost += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(alert_type: AlertType, severity: AlertSeverity, resolved: bool) -> Alert {
        CreateAlertPayload {
            alert_type,
            severity,
            title: "Test".into(),
            message: "Test alert".into(),
            customer_id: Some("cust-1".into()),
            customer_name: None,
            pool_id: None,
            pool_name: None,
            job_id: None,
            resolved,
        }
        .into_alert()
    }

    #[test]
    fn test_type_field_is_serialized_as_type() {
        let json = serde_json::to_value(alert(AlertType::Leak, AlertSeverity::High, false)).unwrap();
        assert_eq!(json["type"], "leak");
        assert_eq!(json["severity"], "high");
        assert!(json.get("alert_type").is_none());
    }

    #[test]
    fn test_resolve_again_refreshes_timestamp() {
        let mut a = alert(AlertType::Chemical, AlertSeverity::Medium, false);
        assert!(a.resolved_at.is_none());
        a.resolve();
        assert!(a.resolved && a.resolved_at.is_some());

        let earlier = Utc::now() - chrono::Duration::hours(2);
        a.resolved_at = Some(earlier);
        a.resolve();
        assert!(a.resolved);
        assert!(a.resolved_at.unwrap() > earlier);
    }

    #[test]
    fn test_update_keeps_timestamp_of_resolved_alert() {
        let mut a = alert(AlertType::Cost, AlertSeverity::Low, false);
        a.resolve();
        let earlier = Utc::now() - chrono::Duration::hours(2);
        a.resolved_at = Some(earlier);

        UpdateAlertPayload { resolved: Some(true), ..Default::default() }.apply(&mut a);
        assert_eq!(a.resolved_at, Some(earlier));
    }

    #[test]
    fn test_update_flip_to_resolved() {
        let mut a = alert(AlertType::Flow, AlertSeverity::Low, false);
        UpdateAlertPayload { resolved: Some(true), ..Default::default() }.apply(&mut a);
        assert!(a.resolved);
        assert!(a.resolved_at.is_some());

        UpdateAlertPayload { resolved: Some(false), ..Default::default() }.apply(&mut a);
        assert!(!a.resolved);
        assert!(a.resolved_at.is_none());
    }

    #[test]
    fn test_query_reads_type_param() {
        let q: AlertListQuery = serde_json::from_value(serde_json::json!({
            "type": "cost", "severity": "high", "resolved": false
        }))
        .unwrap();
        assert_eq!(q.alert_type, Some(AlertType::Cost));
        assert_eq!(q.severity, Some(AlertSeverity::High));
        assert_eq!(q.resolved, Some(false));
        assert!(q.customer_id.is_none());
    }

    #[test]
    fn test_stats_count_only_unresolved_in_groups() {
        let alerts = vec![
            alert(AlertType::Chemical, AlertSeverity::High, false),
            alert(AlertType::Chemical, AlertSeverity::Low, false),
            alert(AlertType::Leak, AlertSeverity::High, true),
        ];
        let stats = AlertStats::from_alerts(&alerts);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.unresolved, 2);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.by_severity, SeverityCounts { high: 1, medium: 0, low: 1 });
        assert_eq!(stats.by_type.chemical, 2);
        assert_eq!(stats.by_type.leak, 0);
    }
}
