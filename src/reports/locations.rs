//! Location analytics report

use serde::Serialize;
use tracing::instrument;

use super::{AnalyticsService, ReportError};
use crate::batch::{execute_batch, BatchResult, Operation};
use crate::model::{HourlyPoint, LocationStats};

/// Composite location payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    pub location_stats: Vec<LocationStats>,
    pub hourly_distribution: Vec<HourlyPoint>,
}

#[derive(Debug, Clone)]
enum Fetched {
    Stats(Vec<LocationStats>),
    Hourly(Vec<HourlyPoint>),
}

#[instrument(skip(service))]
pub(super) async fn build(service: &AnalyticsService) -> Result<LocationReport, ReportError> {
    let operations = vec![
        {
            let store = service.store();
            Operation::new("location_stats", Fetched::Stats(vec![]), async move {
                Ok(Fetched::Stats(store.location_stats().await?))
            })
        },
        {
            let store = service.store();
            Operation::new("hourly_distribution", Fetched::Hourly(vec![]), async move {
                Ok(Fetched::Hourly(store.hourly_swap_distribution(None).await?))
            })
        },
    ];

    let results = execute_batch(operations).await?;
    let [stats, hourly]: [BatchResult<Fetched>; 2] = results
        .try_into()
        .map_err(|v: Vec<_>| ReportError::arity("locations", 2, v.len()))?;

    Ok(LocationReport {
        location_stats: match stats.into_value() {
            Fetched::Stats(rows) => rows,
            other => return Err(ReportError::mismatch("location_stats", &other)),
        },
        hourly_distribution: match hourly.into_value() {
            Fetched::Hourly(rows) => rows,
            other => return Err(ReportError::mismatch("hourly_distribution", &other)),
        },
    })
}
