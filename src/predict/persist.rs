//! Write-after-predict persistence
//!
//! Persisting predicted churn labels is a sequential post-processing step,
//! never part of a read batch. Each write settles on its own: a failure is
//! logged and counted, the remaining writes continue, and the prediction
//! data already returned to the caller is left untouched.

use serde::Serialize;
use tracing::{error, info};

use super::ChurnPrediction;
use crate::store::FleetStore;

/// Outcome of a prediction persistence pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistSummary {
    pub attempted: u64,
    pub updated: u64,
    pub failed: u64,
}

/// Write each prediction's risk label onto its rider record
///
/// Attempts every prediction exactly once, in order. Never aborts early:
/// one failed write does not stop the rest, and the input predictions are
/// not modified or re-validated here.
pub async fn persist_churn_predictions(
    store: &dyn FleetStore,
    predictions: &[ChurnPrediction],
) -> PersistSummary {
    let mut summary = PersistSummary::default();

    for prediction in predictions {
        summary.attempted += 1;
        match store
            .update_churn_risk(&prediction.rider_id, prediction.risk)
            .await
        {
            Ok(()) => summary.updated += 1,
            Err(err) => {
                summary.failed += 1;
                error!(
                    rider_id = %prediction.rider_id,
                    "failed to persist churn risk: {err}"
                );
            }
        }
    }

    if summary.attempted > 0 {
        info!(
            attempted = summary.attempted,
            updated = summary.updated,
            failed = summary.failed,
            "persisted churn predictions"
        );
    }
    summary
}
