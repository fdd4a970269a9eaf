//! HTTP prediction service client
//!
//! Thin reqwest wrapper over the prediction service's JSON API. The base
//! address is explicit configuration: when it is unset,
//! [`PredictionConfig::service`] returns `None` and callers short-circuit
//! to the empty-prediction default without constructing a client at all.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{ForecastRequest, PredictionError, PredictionResponse, PredictionService};

fn default_timeout_ms() -> u64 {
    5_000
}

/// Prediction service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Base address of the service. Absence is a valid, expected condition,
    /// not an error.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request ceiling in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: default_timeout_ms(),
            headers: HashMap::new(),
        }
    }
}

impl PredictionConfig {
    /// Build a client when a base address is configured
    pub fn service(&self) -> Result<Option<HttpPredictionService>, PredictionError> {
        match &self.base_url {
            Some(_) => HttpPredictionService::new(self.clone()).map(Some),
            None => {
                debug!("prediction service base address not configured");
                Ok(None)
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// reqwest-backed [`PredictionService`] implementation
#[derive(Debug)]
pub struct HttpPredictionService {
    config: PredictionConfig,
    client: reqwest::Client,
}

impl HttpPredictionService {
    pub fn new(config: PredictionConfig) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PredictionError::Http(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn build_url(&self, path: &str) -> String {
        let base = self
            .config
            .base_url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/');
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        format!("{base}{path}")
    }

    async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<PredictionResponse, PredictionError> {
        let url = self.build_url(path);
        let mut request = self.client.request(method.clone(), &url);
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        debug!("prediction request {} {}", method, url);
        let start = std::time::Instant::now();

        let response = request
            .send()
            .await
            .map_err(|e| PredictionError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::Status(status.as_u16()));
        }

        let payload: PredictionResponse = response
            .json()
            .await
            .map_err(|e| PredictionError::Payload(e.to_string()))?;

        info!(
            "{} {} -> {} ({}ms, {} predictions)",
            method,
            url,
            status.as_u16(),
            start.elapsed().as_millis(),
            payload.predictions.len()
        );
        Ok(payload)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn churn_predictions(&self) -> Result<PredictionResponse, PredictionError> {
        self.request(reqwest::Method::GET, "/predict/churn", None)
            .await
    }

    async fn demand_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        let body = serde_json::to_value(request)
            .map_err(|e| PredictionError::Payload(e.to_string()))?;
        self.request(reqwest::Method::POST, "/forecast/swaps", Some(body))
            .await
    }

    async fn rider_clustering(&self) -> Result<PredictionResponse, PredictionError> {
        self.request(reqwest::Method::GET, "/analytics/rider-clustering", None)
            .await
    }

    async fn marketing_optimization(
        &self,
        campaign_type: &str,
    ) -> Result<PredictionResponse, PredictionError> {
        let body = serde_json::json!({ "campaign_type": campaign_type });
        self.request(
            reqwest::Method::POST,
            "/analytics/marketing-optimization",
            Some(body),
        )
        .await
    }
}
