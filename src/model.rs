//! Domain records and aggregate row types
//!
//! This module contains the typed records the analytics layer operates on:
//! - `Rider`, `SwapRecord`, `PaymentRecord`, `CampaignRecord` - fleet entities
//! - Aggregate rows produced by store queries (buckets, trends, totals)
//!
//! All wire-facing types serialize as camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Entities
// ============================================================================

/// Rider account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiderStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// Predicted churn risk bucket for a rider
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ChurnRisk {
    #[default]
    Low,
    Medium,
    High,
}

/// Payment settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// Battery swap transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    #[default]
    Completed,
    Failed,
    Pending,
}

/// A registered rider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rider {
    pub rider_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: RiderStatus,
    #[serde(default)]
    pub churn_risk: ChurnRisk,
    pub registration_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_swap_date: Option<DateTime<Utc>>,
}

impl Rider {
    /// Create a rider with a generated `RID-`-prefixed identifier
    pub fn new(first_name: &str, last_name: &str, registration_date: DateTime<Utc>) -> Self {
        Self {
            rider_id: format!("RID-{}", uuid::Uuid::new_v4()),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: String::new(),
            status: RiderStatus::Active,
            churn_risk: ChurnRisk::Low,
            registration_date,
            last_swap_date: None,
        }
    }
}

/// A completed (or attempted) battery swap
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRecord {
    pub rider_id: String,
    pub swap_date: DateTime<Utc>,
    pub cabinet_id: String,
    pub location_name: String,
    /// Battery charge percentage handed in
    pub battery_level_before: f64,
    /// Battery charge percentage handed out
    pub battery_level_after: f64,
    pub cost: f64,
    #[serde(default)]
    pub status: SwapStatus,
}

/// A payment made by a rider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub payment_id: String,
    pub rider_id: String,
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    #[serde(default)]
    pub status: PaymentStatus,
}

impl PaymentRecord {
    /// Create a completed payment with a generated `PAY-`-prefixed identifier
    pub fn completed(rider_id: &str, amount: f64, payment_date: DateTime<Utc>) -> Self {
        Self {
            payment_id: format!("PAY-{}", uuid::Uuid::new_v4()),
            rider_id: rider_id.to_string(),
            amount,
            payment_date,
            status: PaymentStatus::Completed,
        }
    }
}

/// A marketing campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub campaign_id: String,
    pub name: String,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Aggregate rows
// ============================================================================

/// Single-row sum aggregate. Queries return `None` when no rows matched,
/// which callers must distinguish from a genuine zero total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneyTotal {
    pub total: f64,
}

/// Rider count per churn-risk bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnBucket {
    pub risk: ChurnRisk,
    pub count: u64,
}

/// Compact rider projection carried inside detailed churn buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderSummary {
    pub rider_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub registration_date: DateTime<Utc>,
}

/// Churn bucket with the riders it contains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnBucketDetailed {
    pub risk: ChurnRisk,
    pub count: u64,
    pub riders: Vec<RiderSummary>,
}

/// New-rider count per `YYYY-MM` month bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub month: String,
    pub new_riders: u64,
}

/// Swap volume and revenue per location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPerformance {
    pub location: String,
    pub swap_count: u64,
    pub revenue: f64,
}

/// A recent swap joined with the rider's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapActivity {
    pub rider_id: String,
    pub rider_name: String,
    pub location: String,
    pub swap_date: DateTime<Utc>,
    pub cost: f64,
}

/// Completed-payment revenue per `YYYY-MM-DD` day bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTrendPoint {
    pub day: String,
    pub revenue: f64,
    pub transactions: u64,
}

/// Swap volume, revenue, and battery usage per `YYYY-MM-DD` day bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTrendPoint {
    pub day: String,
    pub swaps: u64,
    pub revenue: f64,
    pub avg_battery_usage: f64,
}

/// New registrations per `YYYY-MM-DD` day bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPoint {
    pub day: String,
    pub new_riders: u64,
}

/// Swap count per hour of day (0-23)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    pub hour: u32,
    pub count: u64,
}

/// Per-location utilization profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStats {
    pub location: String,
    pub total_swaps: u64,
    pub avg_battery_level: f64,
    pub utilization_rate: f64,
}

/// Per-rider swap behavior profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderUsage {
    pub rider_id: String,
    pub total_swaps: u64,
    pub avg_battery_usage: f64,
    pub favorite_location: String,
    pub last_swap_date: DateTime<Utc>,
    pub days_since_last_swap: f64,
}

/// Per-rider payment reliability profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBehavior {
    pub rider_id: String,
    pub total_payments: u64,
    pub avg_payment_amount: f64,
    pub failed_payments: u64,
    pub on_time_payments: u64,
    pub payment_reliability: f64,
}

/// Single-row rider totals for a date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RiderTotals {
    pub total_riders: u64,
    pub active_riders: u64,
}

/// Single-row swap totals for a date range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SwapTotals {
    pub total_swaps: u64,
    pub avg_battery_usage: f64,
}

/// Single-row payment totals for a date range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotals {
    pub total_revenue: f64,
    pub avg_payment_amount: f64,
    pub total_transactions: u64,
}

/// Single-row campaign totals for a date range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CampaignTotals {
    pub total_campaigns: u64,
    pub total_cost: f64,
}

/// Optional date-range filter for the comprehensive report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Whether a timestamp falls inside the (inclusive) range
    pub fn contains(&self, when: DateTime<Utc>) -> bool {
        if let Some(start) = self.start_date {
            if when < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if when > end {
                return false;
            }
        }
        true
    }
}
