use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::carrier;
use crate::classify::classify_status;
use crate::models::TrackingResult;

/// Raw response from the external tracking provider
#[derive(Debug, Clone)]
pub struct RawTrackResult {
    pub last_status: String,
    pub last_time: DateTime<Utc>,
    pub payload: Option<serde_json::Value>,
}

/// External tracking provider boundary
#[async_trait]
pub trait TrackingProvider: Send + Sync {
    async fn track(
        &self,
        provider_code: &str,
        waybill_no: &str,
    ) -> Result<RawTrackResult, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("waybill number and courier code must not be empty")]
    InvalidArgument,

    #[error("unsupported courier: {0}")]
    UnsupportedCourier(String),

    #[error("tracking query failed: {0}")]
    QueryFailed(String),
}

/// Validates arguments, resolves the courier mapping, queries the provider
/// and classifies its last-status line
#[derive(Clone)]
pub struct TrackingClient {
    provider: Arc<dyn TrackingProvider>,
}

impl TrackingClient {
    pub fn new(provider: Arc<dyn TrackingProvider>) -> Self {
        Self { provider }
    }

    pub async fn query(
        &self,
        waybill_no: &str,
        courier_code: &str,
    ) -> Result<TrackingResult, TrackingError> {
        if waybill_no.trim().is_empty() || courier_code.trim().is_empty() {
            return Err(TrackingError::InvalidArgument);
        }

        let provider_code = carrier::provider_code(courier_code)
            .ok_or_else(|| TrackingError::UnsupportedCourier(courier_code.to_string()))?;

        debug!(waybill_no, courier_code, provider_code, "querying tracking provider");

        let raw = self
            .provider
            .track(provider_code, waybill_no)
            .await
            .map_err(|err| {
                error!(waybill_no, courier_code, error = %err, "tracking provider query failed");
                TrackingError::QueryFailed(err.to_string())
            })?;

        let status = classify_status(&raw.last_status);
        info!(waybill_no, status = ?status, "tracking status resolved");

        Ok(TrackingResult {
            status,
            status_time: raw.last_time,
            raw: raw.payload,
        })
    }
}

/// Provider stand-in used in local runs and tests; real carrier integrations
/// plug in through the same trait
pub struct MockTrackingProvider;

#[async_trait]
impl TrackingProvider for MockTrackingProvider {
    async fn track(
        &self,
        _provider_code: &str,
        waybill_no: &str,
    ) -> Result<RawTrackResult, Box<dyn std::error::Error + Send + Sync>> {
        // Trigger for exercising the failure path
        if waybill_no.ends_with("-fail") {
            return Err("simulated carrier outage".into());
        }

        let last_status = if waybill_no.ends_with("-done") {
            "Delivered, signed by recipient"
        } else {
            "In transit to destination city"
        };

        Ok(RawTrackResult {
            last_status: last_status.to_string(),
            last_time: Utc::now(),
            payload: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LogisticsStatus;

    struct ScriptedProvider {
        last_status: String,
    }

    #[async_trait]
    impl TrackingProvider for ScriptedProvider {
        async fn track(
            &self,
            _provider_code: &str,
            _waybill_no: &str,
        ) -> Result<RawTrackResult, Box<dyn std::error::Error + Send + Sync>> {
            Ok(RawTrackResult {
                last_status: self.last_status.clone(),
                last_time: Utc::now(),
                payload: None,
            })
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl TrackingProvider for FailingProvider {
        async fn track(
            &self,
            _provider_code: &str,
            _waybill_no: &str,
        ) -> Result<RawTrackResult, Box<dyn std::error::Error + Send + Sync>> {
            Err("connection timed out".into())
        }
    }

    #[tokio::test]
    async fn test_empty_arguments_rejected() {
        let client = TrackingClient::new(Arc::new(MockTrackingProvider));

        let err = client.query("", "SF").await.unwrap_err();
        assert!(matches!(err, TrackingError::InvalidArgument));

        let err = client.query("SF100", "  ").await.unwrap_err();
        assert!(matches!(err, TrackingError::InvalidArgument));
    }

    #[tokio::test]
    async fn test_unsupported_courier() {
        let client = TrackingClient::new(Arc::new(MockTrackingProvider));

        let err = client.query("AB100", "DHL").await.unwrap_err();
        assert!(matches!(err, TrackingError::UnsupportedCourier(ref code) if code == "DHL"));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_query_failed() {
        let client = TrackingClient::new(Arc::new(FailingProvider));

        let err = client.query("SF100", "SF").await.unwrap_err();
        assert!(matches!(err, TrackingError::QueryFailed(ref msg) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn test_success_path_classifies_status() {
        let client = TrackingClient::new(Arc::new(ScriptedProvider {
            last_status: "Package delivered at front desk".to_string(),
        }));

        let result = client.query("YT200", "YTO").await.unwrap();
        assert_eq!(result.status, LogisticsStatus::Delivered);
    }
}
