//! Health report returned by `GET /api/health`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Component or overall state, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, but a background duty is not running
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServiceHealth {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
        }
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            message: Some(message.into()),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Per-component report plus the worst status among them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub services: HashMap<String, ServiceHealth>,
    pub timestamp: DateTime<Utc>,
    /// Crate version of the running binary
    pub version: String,
}

impl HealthResponse {
    pub fn from_services(services: HashMap<String, ServiceHealth>, version: impl Into<String>) -> Self {
        let status = services
            .values()
            .map(|s| s.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            services,
            timestamp: Utc::now(),
            version: version.into(),
        }
    }

    pub fn is_serving(&self) -> bool {
        self.status != HealthStatus::Unhealthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_takes_worst_status() {
        let mut services = HashMap::new();
        services.insert("storage".to_string(), ServiceHealth::healthy());
        services.insert("reaper".to_string(), ServiceHealth::degraded("stopped"));
        let health = HealthResponse::from_services(services.clone(), "0.1.0");
        assert_eq!(health.status, HealthStatus::Degraded);
        assert!(health.is_serving());

        services.insert("sms".to_string(), ServiceHealth::unhealthy("provider down"));
        let health = HealthResponse::from_services(services, "0.1.0");
        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert!(!health.is_serving());
    }

    #[test]
    fn test_empty_report_is_healthy() {
        let health = HealthResponse::from_services(HashMap::new(), "0.1.0");
        assert_eq!(health.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_message_omitted_when_absent() {
        let json = serde_json::to_value(ServiceHealth::healthy()).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("message").is_none());
    }
}
