//! Data store seam
//!
//! This module contains:
//! - `FleetStore` - the read-mostly aggregate query interface reports run
//!   against, plus the point write used by prediction persistence
//! - `memory` - an in-memory reference implementation
//!
//! The store is an externally owned, already-initialized collaborator; the
//! analytics layer holds no locks and manages no connections of its own.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::{
    CampaignTotals, ChurnBucket, ChurnBucketDetailed, ChurnRisk, DateRange, GrowthPoint,
    HourlyPoint, LocationPerformance, LocationStats, MoneyTotal, PaymentBehavior,
    PaymentTotals, PaymentTrendPoint, RegistrationPoint, RiderStatus, RiderTotals,
    RiderUsage, SwapActivity, SwapTotals, SwapTrendPoint,
};

pub use memory::{DatasetError, FleetDataset, MemoryStore};

/// Errors returned by store queries and writes
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("record not found: {0}")]
    NotFound(String),
}

/// Ordered, read-only aggregate queries over the fleet data, plus the point
/// write used to persist churn predictions
///
/// Every method is a single round-trip; callers compose them into batches
/// and decide how individual failures degrade.
#[async_trait]
pub trait FleetStore: Send + Sync {
    // ------------------------------------------------------------------
    // Counts
    // ------------------------------------------------------------------

    async fn count_riders(&self) -> Result<u64, StoreError>;

    async fn count_riders_with_status(&self, status: RiderStatus) -> Result<u64, StoreError>;

    async fn count_swaps_since(&self, when: DateTime<Utc>) -> Result<u64, StoreError>;

    // ------------------------------------------------------------------
    // Revenue and trends
    // ------------------------------------------------------------------

    /// Sum of completed payments since `when`. `None` means no matching
    /// rows, which is not the same thing as a zero total.
    async fn revenue_since(&self, when: DateTime<Utc>) -> Result<Option<MoneyTotal>, StoreError>;

    /// Completed-payment revenue per day since `when`, ascending by day
    async fn daily_payment_trends(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<PaymentTrendPoint>, StoreError>;

    /// Swap volume, revenue, and battery usage per day since `since`,
    /// ascending by day
    async fn daily_swap_trends(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SwapTrendPoint>, StoreError>;

    /// New registrations per day since `since`, ascending by day
    async fn daily_registrations(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<RegistrationPoint>, StoreError>;

    /// New riders per `YYYY-MM` month over all time, ascending by month
    async fn monthly_registrations(&self) -> Result<Vec<GrowthPoint>, StoreError>;

    // ------------------------------------------------------------------
    // Churn
    // ------------------------------------------------------------------

    async fn churn_breakdown(&self) -> Result<Vec<ChurnBucket>, StoreError>;

    async fn churn_breakdown_detailed(&self) -> Result<Vec<ChurnBucketDetailed>, StoreError>;

    // ------------------------------------------------------------------
    // Locations and activity
    // ------------------------------------------------------------------

    /// Best-performing locations by swap count, descending, at most `limit`
    async fn top_locations(&self, limit: usize) -> Result<Vec<LocationPerformance>, StoreError>;

    /// Latest swaps joined with rider names, newest first, at most `limit`
    async fn recent_swaps(&self, limit: usize) -> Result<Vec<SwapActivity>, StoreError>;

    /// Swap count per hour of day since `since` (None for all time),
    /// ascending by hour
    async fn hourly_swap_distribution(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<HourlyPoint>, StoreError>;

    /// Per-location swap totals and utilization, descending by swap count
    async fn location_stats(&self) -> Result<Vec<LocationStats>, StoreError>;

    // ------------------------------------------------------------------
    // Rider behavior
    // ------------------------------------------------------------------

    /// Per-rider swap behavior, including days since last swap relative to
    /// `now`
    async fn usage_patterns(&self, now: DateTime<Utc>) -> Result<Vec<RiderUsage>, StoreError>;

    /// Per-rider payment reliability
    async fn payment_behavior(&self) -> Result<Vec<PaymentBehavior>, StoreError>;

    // ------------------------------------------------------------------
    // Range totals (comprehensive report)
    // ------------------------------------------------------------------

    async fn rider_totals(&self, range: DateRange) -> Result<Option<RiderTotals>, StoreError>;

    async fn swap_totals(&self, range: DateRange) -> Result<Option<SwapTotals>, StoreError>;

    async fn payment_totals(&self, range: DateRange) -> Result<Option<PaymentTotals>, StoreError>;

    async fn campaign_totals(&self, range: DateRange)
        -> Result<Option<CampaignTotals>, StoreError>;

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Persist a predicted churn risk onto a rider record
    async fn update_churn_risk(&self, rider_id: &str, risk: ChurnRisk) -> Result<(), StoreError>;
}
