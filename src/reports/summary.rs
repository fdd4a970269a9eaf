//! Summary and comprehensive reports
//!
//! The summary report is the lightweight headline endpoint; the
//! comprehensive report folds rider, swap, payment, and campaign totals
//! over an optional date range together with churn predictions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use super::{AnalyticsService, ReportError};
use crate::batch::{execute_batch, BatchResult, Operation};
use crate::model::{
    CampaignTotals, ChurnRisk, DateRange, MoneyTotal, PaymentTotals, RiderStatus, RiderTotals,
    SwapTotals,
};
use crate::predict::{ChurnPrediction, PredictionResponse};

/// How many high-risk predictions the comprehensive summary carries inline
const CHURN_PREVIEW_LIMIT: usize = 10;

/// Lightweight summary payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub total_riders: u64,
    pub active_riders: u64,
    pub today_swaps: u64,
    pub total_revenue: f64,
    pub timestamp: DateTime<Utc>,
}

/// Churn section of the comprehensive summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnRiskSummary {
    pub total_at_risk: u64,
    pub predictions: Vec<ChurnPrediction>,
}

/// Aggregated totals section of the comprehensive report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveSummary {
    pub riders: RiderTotals,
    pub swaps: SwapTotals,
    pub payments: PaymentTotals,
    pub marketing: CampaignTotals,
    pub churn_risk: ChurnRiskSummary,
}

/// Composite comprehensive payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveReport {
    pub report_date: DateTime<Utc>,
    pub date_range: DateRange,
    pub summary: ComprehensiveSummary,
}

#[derive(Debug, Clone)]
enum Fetched {
    Count(u64),
    Revenue(Option<MoneyTotal>),
}

#[instrument(skip(service))]
pub(super) async fn build(service: &AnalyticsService) -> Result<SummaryReport, ReportError> {
    let clock = service.clock();
    let start_of_day = clock.start_of_day();

    let operations = vec![
        {
            let store = service.store();
            Operation::new("total_riders", Fetched::Count(0), async move {
                Ok(Fetched::Count(store.count_riders().await?))
            })
        },
        {
            let store = service.store();
            Operation::new("active_riders", Fetched::Count(0), async move {
                Ok(Fetched::Count(
                    store.count_riders_with_status(RiderStatus::Active).await?,
                ))
            })
        },
        {
            let store = service.store();
            Operation::new("today_swaps", Fetched::Count(0), async move {
                Ok(Fetched::Count(store.count_swaps_since(start_of_day).await?))
            })
        },
        {
            let store = service.store();
            Operation::new("total_revenue", Fetched::Revenue(None), async move {
                Ok(Fetched::Revenue(
                    store.revenue_since(DateTime::<Utc>::MIN_UTC).await?,
                ))
            })
        },
    ];

    let results = execute_batch(operations).await?;
    let [total, active, today, revenue]: [BatchResult<Fetched>; 4] = results
        .try_into()
        .map_err(|v: Vec<_>| ReportError::arity("summary", 4, v.len()))?;

    Ok(SummaryReport {
        total_riders: count(total, "total_riders")?,
        active_riders: count(active, "active_riders")?,
        today_swaps: count(today, "today_swaps")?,
        total_revenue: match revenue.into_value() {
            Fetched::Revenue(total) => total.map(|t| t.total).unwrap_or(0.0),
            other => return Err(ReportError::mismatch("total_revenue", &other)),
        },
        timestamp: clock.now(),
    })
}

fn count(result: BatchResult<Fetched>, field: &str) -> Result<u64, ReportError> {
    match result.into_value() {
        Fetched::Count(n) => Ok(n),
        other => Err(ReportError::mismatch(field, &other)),
    }
}

#[derive(Debug, Clone)]
enum Totals {
    Riders(Option<RiderTotals>),
    Swaps(Option<SwapTotals>),
    Payments(Option<PaymentTotals>),
    Campaigns(Option<CampaignTotals>),
    Predictions(PredictionResponse),
}

#[instrument(skip(service))]
pub(super) async fn comprehensive(
    service: &AnalyticsService,
    range: DateRange,
) -> Result<ComprehensiveReport, ReportError> {
    let operations = vec![
        {
            let store = service.store();
            Operation::new("rider_stats", Totals::Riders(None), async move {
                Ok(Totals::Riders(store.rider_totals(range).await?))
            })
        },
        {
            let store = service.store();
            Operation::new("swap_stats", Totals::Swaps(None), async move {
                Ok(Totals::Swaps(store.swap_totals(range).await?))
            })
        },
        {
            let store = service.store();
            Operation::new("payment_stats", Totals::Payments(None), async move {
                Ok(Totals::Payments(store.payment_totals(range).await?))
            })
        },
        {
            let store = service.store();
            Operation::new("marketing_stats", Totals::Campaigns(None), async move {
                Ok(Totals::Campaigns(store.campaign_totals(range).await?))
            })
        },
        service
            .prediction_op("churn_predictions", |svc| async move {
                svc.churn_predictions().await
            })
            .map(Totals::Predictions),
    ];

    let results = execute_batch(operations).await?;
    let [riders, swaps, payments, campaigns, predictions]: [BatchResult<Totals>; 5] = results
        .try_into()
        .map_err(|v: Vec<_>| ReportError::arity("comprehensive", 5, v.len()))?;

    let predictions = match predictions.into_value() {
        Totals::Predictions(response) => response.predictions,
        other => return Err(ReportError::mismatch("churn_predictions", &other)),
    };
    let total_at_risk = predictions
        .iter()
        .filter(|p| p.risk == ChurnRisk::High)
        .count() as u64;

    Ok(ComprehensiveReport {
        report_date: service.clock().now(),
        date_range: range,
        summary: ComprehensiveSummary {
            // Double defaulting: an in-range aggregate over zero rows is a
            // zeroed record, not an absence.
            riders: match riders.into_value() {
                Totals::Riders(totals) => totals.unwrap_or_default(),
                other => return Err(ReportError::mismatch("rider_stats", &other)),
            },
            swaps: match swaps.into_value() {
                Totals::Swaps(totals) => totals.unwrap_or_default(),
                other => return Err(ReportError::mismatch("swap_stats", &other)),
            },
            payments: match payments.into_value() {
                Totals::Payments(totals) => totals.unwrap_or_default(),
                other => return Err(ReportError::mismatch("payment_stats", &other)),
            },
            marketing: match campaigns.into_value() {
                Totals::Campaigns(totals) => totals.unwrap_or_default(),
                other => return Err(ReportError::mismatch("marketing_stats", &other)),
            },
            churn_risk: ChurnRiskSummary {
                total_at_risk,
                predictions: predictions.into_iter().take(CHURN_PREVIEW_LIMIT).collect(),
            },
        },
    })
}
