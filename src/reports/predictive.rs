//! Prediction-backed reports
//!
//! Churn predictions (with write-after-predict persistence), demand
//! forecasts, rider clustering, and campaign optimization. Every prediction
//! fetch degrades to the empty prediction set on failure, timeout, or
//! absent configuration.

use serde::Serialize;
use tracing::instrument;

use super::{AnalyticsService, ReportError};
use crate::batch::{execute_batch, Operation};
use crate::model::ChurnBucketDetailed;
use crate::predict::{
    persist_churn_predictions, ChurnPrediction, ForecastRequest, PersistSummary,
    PredictionResponse,
};

/// Composite churn payload: the persisted breakdown plus the raw
/// predictions that produced it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnReport {
    pub breakdown: Vec<ChurnBucketDetailed>,
    pub predictions: Vec<ChurnPrediction>,
    pub persistence: PersistSummary,
}

/// Fetch churn predictions, persist them, then read back the breakdown
///
/// The prediction fetch and the breakdown read are separate sequential
/// batches: the breakdown depends on the persisted labels, so it cannot
/// share a batch with the fetch.
#[instrument(skip(service))]
pub(super) async fn churn(service: &AnalyticsService) -> Result<ChurnReport, ReportError> {
    let fetch = service.prediction_op("churn_predictions", |svc| async move {
        svc.churn_predictions().await
    });
    let mut results = execute_batch(vec![fetch]).await?;
    let predictions = results.remove(0).into_value().predictions;

    let persistence = persist_churn_predictions(service.store().as_ref(), &predictions).await;

    let stats = {
        let store = service.store();
        Operation::new("churn_stats", Vec::new(), async move {
            Ok(store.churn_breakdown_detailed().await?)
        })
    };
    let mut results = execute_batch(vec![stats]).await?;
    let breakdown = results.remove(0).into_value();

    Ok(ChurnReport {
        breakdown,
        predictions,
        persistence,
    })
}

#[instrument(skip(service))]
pub(super) async fn forecast(
    service: &AnalyticsService,
    request: ForecastRequest,
) -> Result<PredictionResponse, ReportError> {
    let op = service.prediction_op("swap_forecast", move |svc| async move {
        svc.demand_forecast(&request).await
    });
    let mut results = execute_batch(vec![op]).await?;
    Ok(results.remove(0).into_value())
}

#[instrument(skip(service))]
pub(super) async fn clustering(
    service: &AnalyticsService,
) -> Result<PredictionResponse, ReportError> {
    let op = service.prediction_op("rider_clustering", |svc| async move {
        svc.rider_clustering().await
    });
    let mut results = execute_batch(vec![op]).await?;
    Ok(results.remove(0).into_value())
}

#[instrument(skip(service))]
pub(super) async fn marketing(
    service: &AnalyticsService,
    campaign_type: &str,
) -> Result<PredictionResponse, ReportError> {
    let campaign_type = campaign_type.to_string();
    let op = service.prediction_op("marketing_optimization", move |svc| async move {
        svc.marketing_optimization(&campaign_type).await
    });
    let mut results = execute_batch(vec![op]).await?;
    Ok(results.remove(0).into_value())
}
