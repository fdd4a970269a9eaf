//! Rider behavior report

use serde::Serialize;
use tracing::instrument;

use super::{AnalyticsService, ReportError};
use crate::batch::{execute_batch, BatchResult, Operation};
use crate::model::{PaymentBehavior, RiderUsage};

/// Composite behavior payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorReport {
    pub usage_patterns: Vec<RiderUsage>,
    pub payment_behavior: Vec<PaymentBehavior>,
}

#[derive(Debug, Clone)]
enum Fetched {
    Usage(Vec<RiderUsage>),
    Payments(Vec<PaymentBehavior>),
}

#[instrument(skip(service))]
pub(super) async fn build(service: &AnalyticsService) -> Result<BehaviorReport, ReportError> {
    let now = service.clock().now();

    let operations = vec![
        {
            let store = service.store();
            Operation::new("usage_patterns", Fetched::Usage(vec![]), async move {
                Ok(Fetched::Usage(store.usage_patterns(now).await?))
            })
        },
        {
            let store = service.store();
            Operation::new("payment_behavior", Fetched::Payments(vec![]), async move {
                Ok(Fetched::Payments(store.payment_behavior().await?))
            })
        },
    ];

    let results = execute_batch(operations).await?;
    let [usage, payments]: [BatchResult<Fetched>; 2] = results
        .try_into()
        .map_err(|v: Vec<_>| ReportError::arity("behavior", 2, v.len()))?;

    Ok(BehaviorReport {
        usage_patterns: match usage.into_value() {
            Fetched::Usage(rows) => rows,
            other => return Err(ReportError::mismatch("usage_patterns", &other)),
        },
        payment_behavior: match payments.into_value() {
            Fetched::Payments(rows) => rows,
            other => return Err(ReportError::mismatch("payment_behavior", &other)),
        },
    })
}
