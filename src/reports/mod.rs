//! Report builders
//!
//! Each report assembles a batch of named operations against the store (and
//! optionally the prediction service), runs it through the resilient batch
//! executor, and maps the ordered results onto a typed composite. The
//! composite is always complete: failed operations contribute their
//! declared defaults, and only a defect in the report's own assembly can
//! fail the call.
//!
//! - `dashboard` - headline summary, churn, growth, locations, activity
//! - `trends` - daily swap/rider/payment trends over a trailing window
//! - `predictive` - churn predictions, forecasts, clustering, campaign
//!   optimization
//! - `locations` - per-location utilization
//! - `behavior` - per-rider usage and payment reliability
//! - `summary` - lightweight summary and the comprehensive report

pub mod behavior;
pub mod dashboard;
pub mod locations;
pub mod predictive;
pub mod summary;
pub mod trends;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::batch::{BatchError, Operation};
use crate::clock::Clock;
use crate::config::AnalyticsConfig;
use crate::model::DateRange;
use crate::predict::{
    ForecastRequest, PredictionError, PredictionResponse, PredictionService,
};
use crate::store::FleetStore;

pub use behavior::BehaviorReport;
pub use dashboard::{DashboardReport, DashboardSummary};
pub use locations::LocationReport;
pub use predictive::ChurnReport;
pub use summary::{ComprehensiveReport, ComprehensiveSummary, SummaryReport};
pub use trends::{ReportPeriod, TrendsReport};

/// Request ceiling for prediction-service operations, distinct from any
/// data-store timeout
pub(crate) const PREDICTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors assembling a report
///
/// Both variants are the catastrophic class: a defect in how the report
/// built or consumed its batch, never a data-source outage.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("assembly error: {0}")]
    Assembly(String),
}

impl ReportError {
    pub(crate) fn mismatch(field: &str, got: &dyn std::fmt::Debug) -> Self {
        Self::Assembly(format!("unexpected value for {field}: {got:?}"))
    }

    pub(crate) fn arity(report: &str, expected: usize, got: usize) -> Self {
        Self::Assembly(format!(
            "{report} batch produced {got} results, expected {expected}"
        ))
    }
}

/// Facade over the store, the prediction service, and the clock
///
/// Construct once at startup and share; each report call is stateless.
pub struct AnalyticsService {
    store: Arc<dyn FleetStore>,
    predictor: Option<Arc<dyn PredictionService>>,
    clock: Clock,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self {
            store,
            predictor: None,
            clock: Clock::System,
        }
    }

    /// Build from configuration: the prediction service is attached only
    /// when its base address is configured
    pub fn from_config(
        config: &AnalyticsConfig,
        store: Arc<dyn FleetStore>,
    ) -> Result<Self, PredictionError> {
        let predictor = match &config.prediction {
            Some(prediction) => prediction
                .service()?
                .map(|svc| Arc::new(svc) as Arc<dyn PredictionService>),
            None => None,
        };
        let mut service = Self::new(store);
        service.predictor = predictor;
        Ok(service)
    }

    pub fn with_predictor(mut self, predictor: Arc<dyn PredictionService>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub(crate) fn store(&self) -> Arc<dyn FleetStore> {
        Arc::clone(&self.store)
    }

    pub(crate) fn clock(&self) -> Clock {
        self.clock
    }

    /// Build a prediction-service operation
    ///
    /// When no service is configured the operation settles immediately to
    /// the empty prediction set: no network I/O is attempted, and the
    /// absence is not treated as a failure.
    pub(crate) fn prediction_op<F, Fut>(
        &self,
        name: &'static str,
        call: F,
    ) -> Operation<PredictionResponse>
    where
        F: FnOnce(Arc<dyn PredictionService>) -> Fut,
        Fut: Future<Output = Result<PredictionResponse, PredictionError>> + Send + 'static,
    {
        match &self.predictor {
            Some(svc) => {
                let request = call(Arc::clone(svc));
                Operation::new(name, PredictionResponse::default(), async move {
                    Ok(request.await?)
                })
                .with_timeout(PREDICTION_TIMEOUT)
            }
            None => Operation::resolved(name, PredictionResponse::default()),
        }
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    pub async fn dashboard(&self) -> Result<DashboardReport, ReportError> {
        dashboard::build(self).await
    }

    pub async fn trends(&self, days: u32) -> Result<TrendsReport, ReportError> {
        trends::build(self, days).await
    }

    pub async fn churn(&self) -> Result<ChurnReport, ReportError> {
        predictive::churn(self).await
    }

    pub async fn forecast(
        &self,
        request: ForecastRequest,
    ) -> Result<PredictionResponse, ReportError> {
        predictive::forecast(self, request).await
    }

    pub async fn rider_clustering(&self) -> Result<PredictionResponse, ReportError> {
        predictive::clustering(self).await
    }

    pub async fn marketing_optimization(
        &self,
        campaign_type: &str,
    ) -> Result<PredictionResponse, ReportError> {
        predictive::marketing(self, campaign_type).await
    }

    pub async fn locations(&self) -> Result<LocationReport, ReportError> {
        locations::build(self).await
    }

    pub async fn behavior(&self) -> Result<BehaviorReport, ReportError> {
        behavior::build(self).await
    }

    pub async fn comprehensive_report(
        &self,
        range: DateRange,
    ) -> Result<ComprehensiveReport, ReportError> {
        summary::comprehensive(self, range).await
    }

    pub async fn summary(&self) -> Result<SummaryReport, ReportError> {
        summary::build(self).await
    }
}

impl std::fmt::Debug for AnalyticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsService")
            .field("predictor_configured", &self.predictor.is_some())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
