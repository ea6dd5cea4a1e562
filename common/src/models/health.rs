use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Reachable, but answered with a redirect.
    Warning,
    Error,
    Unknown,
}

impl HealthStatus {
    /// Maps an HTTP status code onto the taxonomy. Codes below 200 are not
    /// classified.
    pub fn from_status_code(code: u16) -> Self {
        match code {
            200..=299 => HealthStatus::Healthy,
            300..=399 => HealthStatus::Warning,
            400..=u16::MAX => HealthStatus::Error,
            _ => HealthStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    pub item_id: String,
    pub url: Option<String>,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Milliseconds from request start to response or failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    pub const NO_URL_MESSAGE: &'static str = "No URL configured for this profile";

    /// Result for an item whose address chain is empty. No I/O happened.
    pub fn unresolved(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            url: None,
            status: HealthStatus::Error,
            status_code: None,
            response_time: None,
            error: Some(Self::NO_URL_MESSAGE.to_string()),
            checked_at: Utc::now(),
        }
    }

    pub fn from_response(item_id: impl Into<String>, url: String, code: u16, elapsed_ms: u64) -> Self {
        let status: HealthStatus = HealthStatus::from_status_code(code);
        let error: Option<String> = (status == HealthStatus::Error).then(|| format!("HTTP {code}"));
        Self {
            item_id: item_id.into(),
            url: Some(url),
            status,
            status_code: Some(code),
            response_time: Some(elapsed_ms),
            error,
            checked_at: Utc::now(),
        }
    }

    pub fn from_failure(item_id: impl Into<String>, url: String, err: &ProbeError, elapsed_ms: u64) -> Self {
        Self {
            item_id: item_id.into(),
            url: Some(url),
            status: HealthStatus::Error,
            status_code: None,
            response_time: Some(elapsed_ms),
            error: Some(err.to_string()),
            checked_at: Utc::now(),
        }
    }
}
