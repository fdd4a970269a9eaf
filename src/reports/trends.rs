//! Trends report
//!
//! Daily swap, registration, and payment trends plus hourly usage patterns
//! over a trailing window of `days` days.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use super::{AnalyticsService, ReportError};
use crate::batch::{execute_batch, BatchResult, Operation};
use crate::model::{HourlyPoint, PaymentTrendPoint, RegistrationPoint, SwapTrendPoint};

/// The window a trends report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub days: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Composite trends payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsReport {
    pub swap_trends: Vec<SwapTrendPoint>,
    pub rider_trends: Vec<RegistrationPoint>,
    pub payment_trends: Vec<PaymentTrendPoint>,
    pub hourly_patterns: Vec<HourlyPoint>,
    pub period: ReportPeriod,
}

#[derive(Debug, Clone)]
enum Fetched {
    Swaps(Vec<SwapTrendPoint>),
    Registrations(Vec<RegistrationPoint>),
    Payments(Vec<PaymentTrendPoint>),
    Hourly(Vec<HourlyPoint>),
}

#[instrument(skip(service))]
pub(super) async fn build(
    service: &AnalyticsService,
    days: u32,
) -> Result<TrendsReport, ReportError> {
    let clock = service.clock();
    let since = clock.days_ago(days);

    let operations = vec![
        {
            let store = service.store();
            Operation::new("swap_trends", Fetched::Swaps(vec![]), async move {
                Ok(Fetched::Swaps(store.daily_swap_trends(since).await?))
            })
        },
        {
            let store = service.store();
            Operation::new("rider_trends", Fetched::Registrations(vec![]), async move {
                Ok(Fetched::Registrations(
                    store.daily_registrations(since).await?,
                ))
            })
        },
        {
            let store = service.store();
            Operation::new("payment_trends", Fetched::Payments(vec![]), async move {
                Ok(Fetched::Payments(store.daily_payment_trends(since).await?))
            })
        },
        {
            let store = service.store();
            Operation::new("hourly_patterns", Fetched::Hourly(vec![]), async move {
                Ok(Fetched::Hourly(
                    store.hourly_swap_distribution(Some(since)).await?,
                ))
            })
        },
    ];

    let results = execute_batch(operations).await?;
    let [swaps, registrations, payments, hourly]: [BatchResult<Fetched>; 4] = results
        .try_into()
        .map_err(|v: Vec<_>| ReportError::arity("trends", 4, v.len()))?;

    Ok(TrendsReport {
        swap_trends: match swaps.into_value() {
            Fetched::Swaps(rows) => rows,
            other => return Err(ReportError::mismatch("swap_trends", &other)),
        },
        rider_trends: match registrations.into_value() {
            Fetched::Registrations(rows) => rows,
            other => return Err(ReportError::mismatch("rider_trends", &other)),
        },
        payment_trends: match payments.into_value() {
            Fetched::Payments(rows) => rows,
            other => return Err(ReportError::mismatch("payment_trends", &other)),
        },
        hourly_patterns: match hourly.into_value() {
            Fetched::Hourly(rows) => rows,
            other => return Err(ReportError::mismatch("hourly_patterns", &other)),
        },
        period: ReportPeriod {
            days,
            start_date: since,
            end_date: clock.now(),
        },
    })
}
