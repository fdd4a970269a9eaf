//! External prediction service integration
//!
//! This module contains:
//! - `PredictionService` - the trait report builders call through
//! - `client` - HTTP implementation backed by reqwest
//! - `persist` - write-after-predict persistence of churn labels
//!
//! A prediction fetch that fails or times out always degrades to the empty
//! prediction set - "no predictions available", never "zero risk".

pub mod client;
pub mod persist;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::ChurnRisk;

pub use client::{HttpPredictionService, PredictionConfig};
pub use persist::{persist_churn_predictions, PersistSummary};

/// Errors from the prediction service
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("prediction service returned status {0}")]
    Status(u16),

    #[error("invalid prediction payload: {0}")]
    Payload(String),
}

/// A churn prediction for a single rider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnPrediction {
    pub rider_id: String,
    pub risk: ChurnRisk,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

/// Payload returned by the prediction service
///
/// `predictions` and `recommendations` are always present (possibly empty);
/// endpoint-specific fields (forecasts, cluster profiles) ride along in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub predictions: Vec<ChurnPrediction>,
    #[serde(default)]
    pub recommendations: Vec<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Parameters for a swap demand forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub days: u32,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            location: None,
            days: 7,
        }
    }
}

/// The external prediction service, at the interface level
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Fleet-wide churn risk predictions
    async fn churn_predictions(&self) -> Result<PredictionResponse, PredictionError>;

    /// Swap demand forecast for a location and horizon
    async fn demand_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<PredictionResponse, PredictionError>;

    /// Rider segmentation analysis
    async fn rider_clustering(&self) -> Result<PredictionResponse, PredictionError>;

    /// Campaign targeting recommendations
    async fn marketing_optimization(
        &self,
        campaign_type: &str,
    ) -> Result<PredictionResponse, PredictionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: PredictionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.predictions.is_empty());
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn test_response_keeps_extra_fields() {
        let response: PredictionResponse =
            serde_json::from_str(r#"{"predictions": [], "forecast": [1, 2, 3]}"#).unwrap();
        assert!(response.extra.contains_key("forecast"));
    }

    #[test]
    fn test_prediction_wire_shape() {
        let json = r#"{"riderId": "RID-1", "risk": "high", "probability": 0.91}"#;
        let prediction: ChurnPrediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.rider_id, "RID-1");
        assert_eq!(prediction.risk, ChurnRisk::High);
    }
}
