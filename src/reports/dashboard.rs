//! Dashboard report
//!
//! The headline view: summary counts, monthly revenue, churn breakdown,
//! growth curve, top locations, recent activity, and the week's payment
//! trend - nine independent queries launched as one batch.

use serde::Serialize;
use tracing::instrument;

use super::{AnalyticsService, ReportError};
use crate::batch::{execute_batch, BatchResult, Operation};
use crate::model::{
    ChurnBucket, GrowthPoint, LocationPerformance, MoneyTotal, PaymentTrendPoint, RiderStatus,
    SwapActivity,
};

const TOP_LOCATIONS_LIMIT: usize = 10;
const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Headline counters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_riders: u64,
    pub active_riders: u64,
    pub total_swaps_today: u64,
    pub monthly_revenue: f64,
}

/// Composite dashboard payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub summary: DashboardSummary,
    pub churn_analysis: Vec<ChurnBucket>,
    pub rider_growth: Vec<GrowthPoint>,
    pub top_locations: Vec<LocationPerformance>,
    pub recent_activity: Vec<SwapActivity>,
    pub payment_trends: Vec<PaymentTrendPoint>,
}

#[derive(Debug, Clone)]
enum Fetched {
    Count(u64),
    Revenue(Option<MoneyTotal>),
    Churn(Vec<ChurnBucket>),
    Growth(Vec<GrowthPoint>),
    Locations(Vec<LocationPerformance>),
    Activity(Vec<SwapActivity>),
    Payments(Vec<PaymentTrendPoint>),
}

#[instrument(skip(service))]
pub(super) async fn build(service: &AnalyticsService) -> Result<DashboardReport, ReportError> {
    let clock = service.clock();
    let start_of_day = clock.start_of_day();
    let start_of_month = clock.start_of_month();
    let start_of_week = clock.start_of_week();

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
            Operation::new("swaps_today", Fetched::Count(0), async move {
                Ok(Fetched::Count(store.count_swaps_since(start_of_day).await?))
            })
        },
        {
            let store = service.store();
            Operation::new("monthly_revenue", Fetched::Revenue(None), async move {
                Ok(Fetched::Revenue(store.revenue_since(start_of_month).await?))
            })
        },
        {
            let store = service.store();
            Operation::new("churn_analysis", Fetched::Churn(vec![]), async move {
                Ok(Fetched::Churn(store.churn_breakdown().await?))
            })
        },
        {
            let store = service.store();
            Operation::new("rider_growth", Fetched::Growth(vec![]), async move {
                Ok(Fetched::Growth(store.monthly_registrations().await?))
            })
        },
        {
            let store = service.store();
            Operation::new("top_locations", Fetched::Locations(vec![]), async move {
                Ok(Fetched::Locations(
                    store.top_locations(TOP_LOCATIONS_LIMIT).await?,
                ))
            })
        },
        {
            let store = service.store();
            Operation::new("recent_activity", Fetched::Activity(vec![]), async move {
                Ok(Fetched::Activity(
                    store.recent_swaps(RECENT_ACTIVITY_LIMIT).await?,
                ))
            })
        },
        {
            let store = service.store();
            Operation::new("payment_trends", Fetched::Payments(vec![]), async move {
                Ok(Fetched::Payments(
                    store.daily_payment_trends(start_of_week).await?,
                ))
            })
        },
    ];

    let results = execute_batch(operations).await?;
    let [total_riders, active_riders, swaps_today, revenue, churn, growth, locations, activity, payments]: [BatchResult<Fetched>; 9] =
        results
            .try_into()
            .map_err(|v: Vec<_>| ReportError::arity("dashboard", 9, v.len()))?;

    Ok(DashboardReport {
        summary: DashboardSummary {
            total_riders: count(total_riders, "total_riders")?,
            active_riders: count(active_riders, "active_riders")?,
            total_swaps_today: count(swaps_today, "swaps_today")?,
            // Double defaulting: a successful query with no matching rows
            // still yields zero revenue.
            monthly_revenue: match revenue.into_value() {
                Fetched::Revenue(total) => total.map(|t| t.total).unwrap_or(0.0),
                other => return Err(ReportError::mismatch("monthly_revenue", &other)),
            },
        },
        churn_analysis: match churn.into_value() {
            Fetched::Churn(rows) => rows,
            other => return Err(ReportError::mismatch("churn_analysis", &other)),
        },
        rider_growth: match growth.into_value() {
            Fetched::Growth(rows) => rows,
            other => return Err(ReportError::mismatch("rider_growth", &other)),
        },
        top_locations: match locations.into_value() {
            Fetched::Locations(rows) => rows,
            other => return Err(ReportError::mismatch("top_locations", &other)),
        },
        recent_activity: match activity.into_value() {
            Fetched::Activity(rows) => rows,
            other => return Err(ReportError::mismatch("recent_activity", &other)),
        },
        payment_trends: match payments.into_value() {
            Fetched::Payments(rows) => rows,
            other => return Err(ReportError::mismatch("payment_trends", &other)),
        },
    })
}

fn count(result: BatchResult<Fetched>, field: &str) -> Result<u64, ReportError> {
    match result.into_value() {
        Fetched::Count(n) => Ok(n),
        other => Err(ReportError::mismatch(field, &other)),
    }
}
