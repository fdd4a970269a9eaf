//! In-memory fleet store
//!
//! Reference implementation of [`FleetStore`] backed by plain vectors behind
//! a `tokio::sync::RwLock`. Backs the CLI and the test suite; the
//! aggregations mirror what a database engine would compute server-side.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{FleetStore, StoreError};
use crate::model::{
    CampaignRecord, CampaignTotals, ChurnBucket, ChurnBucketDetailed, ChurnRisk, DateRange,
    GrowthPoint, HourlyPoint, LocationPerformance, LocationStats, MoneyTotal, PaymentBehavior,
    PaymentRecord, PaymentStatus, PaymentTotals, PaymentTrendPoint, RegistrationPoint, Rider,
    RiderStatus, RiderSummary, RiderTotals, RiderUsage, SwapActivity, SwapRecord, SwapTotals,
    SwapTrendPoint,
};

/// Assumed maximum daily swap capacity per location, used for the
/// utilization rate
const LOCATION_DAILY_CAPACITY: f64 = 100.0;

/// Errors loading a dataset fixture from disk
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {file}: {error}")]
    Json {
        file: String,
        error: serde_json::Error,
    },
}

/// Serializable snapshot of the fleet data, used as a fixture format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetDataset {
    #[serde(default)]
    pub riders: Vec<Rider>,
    #[serde(default)]
    pub swaps: Vec<SwapRecord>,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    #[serde(default)]
    pub campaigns: Vec<CampaignRecord>,
}

impl FleetDataset {
    /// Load a dataset from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|error| DatasetError::Json {
            file: path.display().to_string(),
            error,
        })
    }

    /// A small deterministic dataset for demos and smoke runs
    pub fn sample(now: DateTime<Utc>) -> Self {
        let mut riders = Vec::new();
        let mut swaps = Vec::new();
        let mut payments = Vec::new();

        let locations = ["Kilimani Hub", "CBD Station", "Westlands Depot"];
        for i in 0..6 {
            let mut rider = Rider::new(
                ["Amina", "Brian", "Chebet", "David", "Esther", "Felix"][i],
                "Rider",
                now - Duration::days(30 * (i as i64 + 1)),
            );
            rider.phone = format!("+2547000000{i:02}");
            if i == 5 {
                rider.status = RiderStatus::Inactive;
                rider.churn_risk = ChurnRisk::High;
            }

            for day in 0..3i64 {
                let swap_date = now - Duration::days(day * (i as i64 + 1));
                swaps.push(SwapRecord {
                    rider_id: rider.rider_id.clone(),
                    swap_date,
                    cabinet_id: format!("CAB-{:03}", i * 3 + day as usize),
                    location_name: locations[i % locations.len()].to_string(),
                    battery_level_before: 20.0 + day as f64 * 5.0,
                    battery_level_after: 95.0,
                    cost: 150.0,
                    status: crate::model::SwapStatus::Completed,
                });
                payments.push(PaymentRecord::completed(&rider.rider_id, 150.0, swap_date));
            }

            rider.last_swap_date = Some(now);
            riders.push(rider);
        }

        let campaigns = vec![CampaignRecord {
            campaign_id: "CMP-0001".to_string(),
            name: "Retention June".to_string(),
            cost: 25000.0,
            created_at: now - Duration::days(20),
        }];

        Self {
            riders,
            swaps,
            payments,
            campaigns,
        }
    }
}

/// In-memory [`FleetStore`] implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<FleetDataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(dataset: FleetDataset) -> Self {
        Self {
            data: RwLock::new(dataset),
        }
    }

    pub async fn insert_rider(&self, rider: Rider) {
        self.data.write().await.riders.push(rider);
    }

    pub async fn insert_swap(&self, swap: SwapRecord) {
        self.data.write().await.swaps.push(swap);
    }

    pub async fn insert_payment(&self, payment: PaymentRecord) {
        self.data.write().await.payments.push(payment);
    }

    pub async fn insert_campaign(&self, campaign: CampaignRecord) {
        self.data.write().await.campaigns.push(campaign);
    }

    /// Look up a rider's current churn risk (test/diagnostic helper)
    pub async fn churn_risk_of(&self, rider_id: &str) -> Option<ChurnRisk> {
        self.data
            .read()
            .await
            .riders
            .iter()
            .find(|r| r.rider_id == rider_id)
            .map(|r| r.churn_risk)
    }
}

fn day_bucket(when: DateTime<Utc>) -> String {
    when.format("%Y-%m-%d").to_string()
}

fn month_bucket(when: DateTime<Utc>) -> String {
    when.format("%Y-%m").to_string()
}

#[async_trait]
impl FleetStore for MemoryStore {
    async fn count_riders(&self) -> Result<u64, StoreError> {
        Ok(self.data.read().await.riders.len() as u64)
    }

    async fn count_riders_with_status(&self, status: RiderStatus) -> Result<u64, StoreError> {
        let data = self.data.read().await;
        Ok(data.riders.iter().filter(|r| r.status == status).count() as u64)
    }

    async fn count_swaps_since(&self, when: DateTime<Utc>) -> Result<u64, StoreError> {
        let data = self.data.read().await;
        Ok(data.swaps.iter().filter(|s| s.swap_date >= when).count() as u64)
    }

    async fn revenue_since(&self, when: DateTime<Utc>) -> Result<Option<MoneyTotal>, StoreError> {
        let data = self.data.read().await;
        let matching: Vec<_> = data
            .payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Completed && p.payment_date >= when)
            .collect();

        if matching.is_empty() {
            return Ok(None);
        }
        Ok(Some(MoneyTotal {
            total: matching.iter().map(|p| p.amount).sum(),
        }))
    }

    async fn daily_payment_trends(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<PaymentTrendPoint>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: BTreeMap<String, (f64, u64)> = BTreeMap::new();
        for payment in data
            .payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Completed && p.payment_date >= since)
        {
            let entry = buckets.entry(day_bucket(payment.payment_date)).or_default();
            entry.0 += payment.amount;
            entry.1 += 1;
        }
        Ok(buckets
            .into_iter()
            .map(|(day, (revenue, transactions))| PaymentTrendPoint {
                day,
                revenue,
                transactions,
            })
            .collect())
    }

    async fn daily_swap_trends(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SwapTrendPoint>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: BTreeMap<String, (u64, f64, f64)> = BTreeMap::new();
        for swap in data.swaps.iter().filter(|s| s.swap_date >= since) {
            let entry = buckets.entry(day_bucket(swap.swap_date)).or_default();
            entry.0 += 1;
            entry.1 += swap.cost;
            entry.2 += swap.battery_level_before - swap.battery_level_after;
        }
        Ok(buckets
            .into_iter()
            .map(|(day, (swaps, revenue, usage_sum))| SwapTrendPoint {
                day,
                swaps,
                revenue,
                avg_battery_usage: usage_sum / swaps as f64,
            })
            .collect())
    }

    async fn daily_registrations(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<RegistrationPoint>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
        for rider in data
            .riders
            .iter()
            .filter(|r| r.registration_date >= since)
        {
            *buckets.entry(day_bucket(rider.registration_date)).or_default() += 1;
        }
        Ok(buckets
            .into_iter()
            .map(|(day, new_riders)| RegistrationPoint { day, new_riders })
            .collect())
    }

    async fn monthly_registrations(&self) -> Result<Vec<GrowthPoint>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
        for rider in &data.riders {
            *buckets
                .entry(month_bucket(rider.registration_date))
                .or_default() += 1;
        }
        Ok(buckets
            .into_iter()
            .map(|(month, new_riders)| GrowthPoint { month, new_riders })
            .collect())
    }

    async fn churn_breakdown(&self) -> Result<Vec<ChurnBucket>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: BTreeMap<ChurnRisk, u64> = BTreeMap::new();
        for rider in &data.riders {
            *buckets.entry(rider.churn_risk).or_default() += 1;
        }
        Ok(buckets
            .into_iter()
            .map(|(risk, count)| ChurnBucket { risk, count })
            .collect())
    }

    async fn churn_breakdown_detailed(&self) -> Result<Vec<ChurnBucketDetailed>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: BTreeMap<ChurnRisk, Vec<RiderSummary>> = BTreeMap::new();
        for rider in &data.riders {
            buckets
                .entry(rider.churn_risk)
                .or_default()
                .push(RiderSummary {
                    rider_id: rider.rider_id.clone(),
                    first_name: rider.first_name.clone(),
                    last_name: rider.last_name.clone(),
                    phone: rider.phone.clone(),
                    registration_date: rider.registration_date,
                });
        }
        Ok(buckets
            .into_iter()
            .map(|(risk, riders)| ChurnBucketDetailed {
                risk,
                count: riders.len() as u64,
                riders,
            })
            .collect())
    }

    async fn top_locations(&self, limit: usize) -> Result<Vec<LocationPerformance>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: HashMap<String, (u64, f64)> = HashMap::new();
        for swap in &data.swaps {
            let entry = buckets.entry(swap.location_name.clone()).or_default();
            entry.0 += 1;
            entry.1 += swap.cost;
        }
        let mut rows: Vec<_> = buckets
            .into_iter()
            .map(|(location, (swap_count, revenue))| LocationPerformance {
                location,
                swap_count,
                revenue,
            })
            .collect();
        rows.sort_by(|a, b| b.swap_count.cmp(&a.swap_count).then(a.location.cmp(&b.location)));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn recent_swaps(&self, limit: usize) -> Result<Vec<SwapActivity>, StoreError> {
        let data = self.data.read().await;
        let names: HashMap<&str, String> = data
            .riders
            .iter()
            .map(|r| {
                (
                    r.rider_id.as_str(),
                    format!("{} {}", r.first_name, r.last_name),
                )
            })
            .collect();

        let mut swaps: Vec<&SwapRecord> = data.swaps.iter().collect();
        swaps.sort_by(|a, b| b.swap_date.cmp(&a.swap_date));
        Ok(swaps
            .into_iter()
            .take(limit)
            .map(|swap| SwapActivity {
                rider_id: swap.rider_id.clone(),
                rider_name: names
                    .get(swap.rider_id.as_str())
                    .cloned()
                    .unwrap_or_else(|| swap.rider_id.clone()),
                location: swap.location_name.clone(),
                swap_date: swap.swap_date,
                cost: swap.cost,
            })
            .collect())
    }

    async fn hourly_swap_distribution(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<HourlyPoint>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: BTreeMap<u32, u64> = BTreeMap::new();
        for swap in &data.swaps {
            if let Some(cutoff) = since {
                if swap.swap_date < cutoff {
                    continue;
                }
            }
            *buckets.entry(swap.swap_date.hour()).or_default() += 1;
        }
        Ok(buckets
            .into_iter()
            .map(|(hour, count)| HourlyPoint { hour, count })
            .collect())
    }

    async fn location_stats(&self) -> Result<Vec<LocationStats>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: HashMap<String, (u64, f64)> = HashMap::new();
        for swap in &data.swaps {
            let entry = buckets.entry(swap.location_name.clone()).or_default();
            entry.0 += 1;
            entry.1 += swap.battery_level_before;
        }
        let mut rows: Vec<_> = buckets
            .into_iter()
            .map(|(location, (total_swaps, battery_sum))| LocationStats {
                location,
                total_swaps,
                avg_battery_level: battery_sum / total_swaps as f64,
                utilization_rate: (total_swaps as f64 / LOCATION_DAILY_CAPACITY) * 100.0,
            })
            .collect();
        rows.sort_by(|a, b| b.total_swaps.cmp(&a.total_swaps).then(a.location.cmp(&b.location)));
        Ok(rows)
    }

    async fn usage_patterns(&self, now: DateTime<Utc>) -> Result<Vec<RiderUsage>, StoreError> {
        let data = self.data.read().await;
        struct Acc {
            total: u64,
            usage_sum: f64,
            favorite: String,
            last: DateTime<Utc>,
        }
        let mut buckets: BTreeMap<String, Acc> = BTreeMap::new();
        for swap in &data.swaps {
            let entry = buckets.entry(swap.rider_id.clone()).or_insert_with(|| Acc {
                total: 0,
                usage_sum: 0.0,
                favorite: swap.location_name.clone(),
                last: swap.swap_date,
            });
            entry.total += 1;
            entry.usage_sum += swap.battery_level_before - swap.battery_level_after;
            if swap.swap_date > entry.last {
                entry.last = swap.swap_date;
            }
        }
        Ok(buckets
            .into_iter()
            .map(|(rider_id, acc)| RiderUsage {
                rider_id,
                total_swaps: acc.total,
                avg_battery_usage: acc.usage_sum / acc.total as f64,
                favorite_location: acc.favorite,
                last_swap_date: acc.last,
                days_since_last_swap: (now - acc.last).num_seconds() as f64 / 86_400.0,
            })
            .collect())
    }

    async fn payment_behavior(&self) -> Result<Vec<PaymentBehavior>, StoreError> {
        let data = self.data.read().await;
        let mut buckets: BTreeMap<String, (u64, f64, u64, u64)> = BTreeMap::new();
        for payment in &data.payments {
            let entry = buckets.entry(payment.rider_id.clone()).or_default();
            entry.0 += 1;
            entry.1 += payment.amount;
            match payment.status {
                PaymentStatus::Failed => entry.2 += 1,
                PaymentStatus::Completed => entry.3 += 1,
                _ => {}
            }
        }
        Ok(buckets
            .into_iter()
            .map(|(rider_id, (total, amount_sum, failed, on_time))| PaymentBehavior {
                rider_id,
                total_payments: total,
                avg_payment_amount: amount_sum / total as f64,
                failed_payments: failed,
                on_time_payments: on_time,
                payment_reliability: if total > 0 {
                    on_time as f64 / total as f64
                } else {
                    0.0
                },
            })
            .collect())
    }

    async fn rider_totals(&self, range: DateRange) -> Result<Option<RiderTotals>, StoreError> {
        let data = self.data.read().await;
        let matching: Vec<_> = data
            .riders
            .iter()
            .filter(|r| range.contains(r.registration_date))
            .collect();
        if matching.is_empty() {
            return Ok(None);
        }
        Ok(Some(RiderTotals {
            total_riders: matching.len() as u64,
            active_riders: matching
                .iter()
                .filter(|r| r.status == RiderStatus::Active)
                .count() as u64,
        }))
    }

    async fn swap_totals(&self, range: DateRange) -> Result<Option<SwapTotals>, StoreError> {
        let data = self.data.read().await;
        let matching: Vec<_> = data
            .swaps
            .iter()
            .filter(|s| range.contains(s.swap_date))
            .collect();
        if matching.is_empty() {
            return Ok(None);
        }
        let usage_sum: f64 = matching
            .iter()
            .map(|s| s.battery_level_before - s.battery_level_after)
            .sum();
        Ok(Some(SwapTotals {
            total_swaps: matching.len() as u64,
            avg_battery_usage: usage_sum / matching.len() as f64,
        }))
    }

    async fn payment_totals(&self, range: DateRange) -> Result<Option<PaymentTotals>, StoreError> {
        let data = self.data.read().await;
        let matching: Vec<_> = data
            .payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Completed && range.contains(p.payment_date))
            .collect();
        if matching.is_empty() {
            return Ok(None);
        }
        let revenue: f64 = matching.iter().map(|p| p.amount).sum();
        Ok(Some(PaymentTotals {
            total_revenue: revenue,
            avg_payment_amount: revenue / matching.len() as f64,
            total_transactions: matching.len() as u64,
        }))
    }

    async fn campaign_totals(
        &self,
        range: DateRange,
    ) -> Result<Option<CampaignTotals>, StoreError> {
        let data = self.data.read().await;
        let matching: Vec<_> = data
            .campaigns
            .iter()
            .filter(|c| range.contains(c.created_at))
            .collect();
        if matching.is_empty() {
            return Ok(None);
        }
        Ok(Some(CampaignTotals {
            total_campaigns: matching.len() as u64,
            total_cost: matching.iter().map(|c| c.cost).sum(),
        }))
    }

    async fn update_churn_risk(&self, rider_id: &str, risk: ChurnRisk) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        match data.riders.iter_mut().find(|r| r.rider_id == rider_id) {
            Some(rider) => {
                rider.churn_risk = risk;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("rider {rider_id}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn rider_at(name: &str, registered: DateTime<Utc>) -> Rider {
        Rider::new(name, "Test", registered)
    }

    fn swap_at(rider_id: &str, location: &str, when: DateTime<Utc>, cost: f64) -> SwapRecord {
        SwapRecord {
            rider_id: rider_id.to_string(),
            swap_date: when,
            cabinet_id: "CAB-001".to_string(),
            location_name: location.to_string(),
            battery_level_before: 20.0,
            battery_level_after: 90.0,
            cost,
            status: crate::model::SwapStatus::Completed,
        }
    }

    async fn seeded() -> (MemoryStore, Rider, Rider) {
        let store = MemoryStore::new();
        let alice = rider_at("Alice", at(2024, 1, 10, 9));
        let bob = rider_at("Bob", at(2024, 3, 5, 9));

        store.insert_rider(alice.clone()).await;
        store.insert_rider(bob.clone()).await;

        store
            .insert_swap(swap_at(&alice.rider_id, "CBD", at(2024, 6, 1, 8), 150.0))
            .await;
        store
            .insert_swap(swap_at(&alice.rider_id, "CBD", at(2024, 6, 2, 8), 150.0))
            .await;
        store
            .insert_swap(swap_at(&bob.rider_id, "Westlands", at(2024, 6, 2, 17), 200.0))
            .await;

        store
            .insert_payment(PaymentRecord::completed(
                &alice.rider_id,
                150.0,
                at(2024, 6, 1, 8),
            ))
            .await;
        store
            .insert_payment(PaymentRecord::completed(
                &bob.rider_id,
                200.0,
                at(2024, 6, 2, 17),
            ))
            .await;

        (store, alice, bob)
    }

    #[tokio::test]
    async fn test_counts() {
        let (store, _, _) = seeded().await;
        assert_eq!(store.count_riders().await.unwrap(), 2);
        assert_eq!(
            store
                .count_riders_with_status(RiderStatus::Active)
                .await
                .unwrap(),
            2
        );
        assert_eq!(store.count_swaps_since(at(2024, 6, 2, 0)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_revenue_none_when_no_rows() {
        let (store, _, _) = seeded().await;
        assert_eq!(store.revenue_since(at(2025, 1, 1, 0)).await.unwrap(), None);
        assert_eq!(
            store.revenue_since(at(2024, 1, 1, 0)).await.unwrap(),
            Some(MoneyTotal { total: 350.0 })
        );
    }

    #[tokio::test]
    async fn test_top_locations_ordering() {
        let (store, _, _) = seeded().await;
        let rows = store.top_locations(10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].location, "CBD");
        assert_eq!(rows[0].swap_count, 2);
        assert_eq!(rows[0].revenue, 300.0);
    }

    #[tokio::test]
    async fn test_recent_swaps_join_names_newest_first() {
        let (store, alice, bob) = seeded().await;
        let rows = store.recent_swaps(2).await.unwrap();
        assert_eq!(rows.len(), 2);
        // 17:00 swap (Bob) before 08:00 swap (Alice), June 2nd
        assert_eq!(rows[0].rider_id, bob.rider_id);
        assert!(rows[0].rider_name.starts_with("Bob"));
        assert_eq!(rows[1].rider_id, alice.rider_id);
    }

    #[tokio::test]
    async fn test_monthly_registrations_ascending() {
        let (store, _, _) = seeded().await;
        let rows = store.monthly_registrations().await.unwrap();
        assert_eq!(
            rows,
            vec![
                GrowthPoint {
                    month: "2024-01".to_string(),
                    new_riders: 1
                },
                GrowthPoint {
                    month: "2024-03".to_string(),
                    new_riders: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_hourly_distribution() {
        let (store, _, _) = seeded().await;
        let rows = store.hourly_swap_distribution(None).await.unwrap();
        assert_eq!(
            rows,
            vec![
                HourlyPoint { hour: 8, count: 2 },
                HourlyPoint { hour: 17, count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_usage_patterns_days_since_last_swap() {
        let (store, alice, _) = seeded().await;
        let now = at(2024, 6, 5, 8);
        let rows = store.usage_patterns(now).await.unwrap();
        let mine = rows.iter().find(|r| r.rider_id == alice.rider_id).unwrap();
        assert_eq!(mine.total_swaps, 2);
        assert_eq!(mine.favorite_location, "CBD");
        assert!((mine.days_since_last_swap - 3.0).abs() < 1e-9);
        // battery usage is handed-in minus handed-out
        assert!((mine.avg_battery_usage - (-70.0)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_range_totals_none_outside_range() {
        let (store, _, _) = seeded().await;
        let empty_range = DateRange {
            start_date: Some(at(2030, 1, 1, 0)),
            end_date: None,
        };
        assert_eq!(store.rider_totals(empty_range).await.unwrap(), None);
        assert_eq!(store.payment_totals(empty_range).await.unwrap(), None);

        let totals = store.rider_totals(DateRange::default()).await.unwrap();
        assert_eq!(
            totals,
            Some(RiderTotals {
                total_riders: 2,
                active_riders: 2
            })
        );
    }

    #[tokio::test]
    async fn test_update_churn_risk() {
        let (store, alice, _) = seeded().await;
        store
            .update_churn_risk(&alice.rider_id, ChurnRisk::High)
            .await
            .unwrap();
        assert_eq!(
            store.churn_risk_of(&alice.rider_id).await,
            Some(ChurnRisk::High)
        );

        let missing = store.update_churn_risk("RID-missing", ChurnRisk::Low).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_payment_behavior_reliability() {
        let (store, alice, _) = seeded().await;
        store
            .insert_payment(PaymentRecord {
                payment_id: "PAY-failed".to_string(),
                rider_id: alice.rider_id.clone(),
                amount: 150.0,
                payment_date: at(2024, 6, 3, 9),
                status: PaymentStatus::Failed,
            })
            .await;

        let rows = store.payment_behavior().await.unwrap();
        let mine = rows.iter().find(|r| r.rider_id == alice.rider_id).unwrap();
        assert_eq!(mine.total_payments, 2);
        assert_eq!(mine.failed_payments, 1);
        assert_eq!(mine.on_time_payments, 1);
        assert!((mine.payment_reliability - 0.5).abs() < 1e-9);
    }
}
