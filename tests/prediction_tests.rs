mod common;

use std::sync::Arc;

use common::*;
use fleet_analytics::model::ChurnRisk;
use fleet_analytics::predict::persist_churn_predictions;
use fleet_analytics::prelude::*;

fn clock() -> Clock {
    Clock::Fixed(at(2024, 6, 12, 15))
}

#[tokio::test]
async fn test_unconfigured_service_makes_no_prediction_calls() {
    // The counting collaborator exists, but the service is built without a
    // predictor - operations must short-circuit to the empty prediction
    // set without reaching it.
    let counting = Arc::new(CountingPredictor::with_predictions(vec![prediction(
        "RID-x",
        ChurnRisk::High,
    )]));

    let store = MemoryStore::new();
    store.insert_rider(rider_at("Solo", at(2024, 1, 1, 0))).await;
    let service = AnalyticsService::new(Arc::new(store)).with_clock(clock());

    let report = service.churn().await.unwrap();
    assert!(report.predictions.is_empty());
    assert_eq!(report.persistence.attempted, 0);

    let forecast = service.forecast(ForecastRequest::default()).await.unwrap();
    assert!(forecast.predictions.is_empty());

    assert_eq!(counting.calls(), 0);
}

#[tokio::test]
async fn test_unset_base_url_builds_service_without_predictor() {
    let config = AnalyticsConfig::default();
    let service =
        AnalyticsService::from_config(&config, Arc::new(MemoryStore::new())).unwrap();

    // No predictor, no network: the churn report still resolves
    let report = service.churn().await.unwrap();
    assert!(report.predictions.is_empty());
}

#[tokio::test]
async fn test_configured_predictor_is_called_once_per_churn_report() {
    let store = Arc::new(MemoryStore::new());
    let rider = rider_at("Amina", at(2024, 1, 1, 0));
    let rider_id = rider.rider_id.clone();
    store.insert_rider(rider).await;

    let counting = Arc::new(CountingPredictor::with_predictions(vec![prediction(
        &rider_id,
        ChurnRisk::High,
    )]));
    let service = AnalyticsService::new(store.clone())
        .with_clock(clock())
        .with_predictor(counting.clone());

    let report = service.churn().await.unwrap();
    assert_eq!(counting.calls(), 1);
    assert_eq!(report.predictions.len(), 1);
    assert_eq!(report.persistence.updated, 1);

    // The predicted label was written back and shows up in the breakdown
    assert_eq!(store.churn_risk_of(&rider_id).await, Some(ChurnRisk::High));
    let high = report
        .breakdown
        .iter()
        .find(|b| b.risk == ChurnRisk::High)
        .unwrap();
    assert_eq!(high.count, 1);
}

#[tokio::test]
async fn test_unreachable_service_degrades_to_empty_predictions() {
    let store = Arc::new(MemoryStore::new());
    store.insert_rider(rider_at("Solo", at(2024, 1, 1, 0))).await;

    let service = AnalyticsService::new(store)
        .with_clock(clock())
        .with_predictor(Arc::new(UnreachablePredictor));

    let report = service.churn().await.unwrap();
    assert!(report.predictions.is_empty());
    assert_eq!(report.persistence.attempted, 0);
    // The local breakdown query still ran
    assert_eq!(report.breakdown.len(), 1);

    let clustering = service.rider_clustering().await.unwrap();
    assert!(clustering.predictions.is_empty());

    let marketing = service.marketing_optimization("retention").await.unwrap();
    assert!(marketing.predictions.is_empty());
}

#[tokio::test]
async fn test_persist_attempts_every_record_despite_failure() {
    // Three predictions; the second targets a rider that does not exist,
    // so its write fails. The other two must still persist.
    let store = MemoryStore::new();
    let first = rider_at("First", at(2024, 1, 1, 0));
    let third = rider_at("Third", at(2024, 1, 1, 0));
    store.insert_rider(first.clone()).await;
    store.insert_rider(third.clone()).await;

    let predictions = vec![
        prediction(&first.rider_id, ChurnRisk::High),
        prediction("RID-missing", ChurnRisk::Medium),
        prediction(&third.rider_id, ChurnRisk::Medium),
    ];

    let summary = persist_churn_predictions(&store, &predictions).await;
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.updated, 2);
    assert_eq!(summary.failed, 1);

    assert_eq!(
        store.churn_risk_of(&first.rider_id).await,
        Some(ChurnRisk::High)
    );
    assert_eq!(
        store.churn_risk_of(&third.rider_id).await,
        Some(ChurnRisk::Medium)
    );

    // The input predictions are untouched by the failed write
    assert_eq!(predictions.len(), 3);
    assert_eq!(predictions[1].rider_id, "RID-missing");
}

#[tokio::test]
async fn test_churn_report_returns_predictions_unchanged_when_writes_fail() {
    // Every write fails (no riders exist), but the predictions the service
    // returned are reported as-is.
    let counting = Arc::new(CountingPredictor::with_predictions(vec![
        prediction("RID-1", ChurnRisk::High),
        prediction("RID-2", ChurnRisk::Low),
    ]));
    let service = AnalyticsService::new(Arc::new(MemoryStore::new()))
        .with_clock(clock())
        .with_predictor(counting);

    let report = service.churn().await.unwrap();
    assert_eq!(report.predictions.len(), 2);
    assert_eq!(report.persistence.attempted, 2);
    assert_eq!(report.persistence.failed, 2);
    assert_eq!(report.persistence.updated, 0);
}

#[tokio::test]
async fn test_forecast_passthrough_keeps_extra_fields() {
    let response: PredictionResponse = serde_json::from_value(serde_json::json!({
        "predictions": [],
        "forecast": [{"day": "2024-06-13", "expectedSwaps": 120}]
    }))
    .unwrap();
    let service = AnalyticsService::new(Arc::new(MemoryStore::new()))
        .with_clock(clock())
        .with_predictor(Arc::new(CountingPredictor::new(response)));

    let forecast = service
        .forecast(ForecastRequest {
            location: Some("CBD".to_string()),
            days: 7,
        })
        .await
        .unwrap();
    assert!(forecast.extra.contains_key("forecast"));
}
