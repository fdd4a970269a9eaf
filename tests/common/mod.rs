use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use fleet_analytics::model::{
    CampaignTotals, ChurnBucket, ChurnBucketDetailed, ChurnRisk, DateRange, GrowthPoint,
    HourlyPoint, LocationPerformance, LocationStats, MoneyTotal, PaymentBehavior, PaymentRecord,
    PaymentTotals, PaymentTrendPoint, RegistrationPoint, Rider, RiderStatus, RiderTotals,
    RiderUsage, SwapActivity, SwapRecord, SwapStatus, SwapTotals, SwapTrendPoint,
};
use fleet_analytics::predict::{
    ChurnPrediction, ForecastRequest, PredictionError, PredictionResponse, PredictionService,
};
use fleet_analytics::store::{FleetStore, MemoryStore, StoreError};

pub fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

pub fn rider_at(name: &str, registered: DateTime<Utc>) -> Rider {
    Rider::new(name, "Test", registered)
}

pub fn swap_at(rider_id: &str, location: &str, when: DateTime<Utc>, cost: f64) -> SwapRecord {
    SwapRecord {
        rider_id: rider_id.to_string(),
        swap_date: when,
        cabinet_id: "CAB-001".to_string(),
        location_name: location.to_string(),
        battery_level_before: 20.0,
        battery_level_after: 90.0,
        cost,
        status: SwapStatus::Completed,
    }
}

pub fn prediction(rider_id: &str, risk: ChurnRisk) -> ChurnPrediction {
    ChurnPrediction {
        rider_id: rider_id.to_string(),
        risk,
        probability: None,
    }
}

pub fn completed_payment(rider_id: &str, amount: f64, when: DateTime<Utc>) -> PaymentRecord {
    PaymentRecord::completed(rider_id, amount, when)
}

/// Store wrapper that injects failures into named queries
pub struct FlakyStore {
    inner: MemoryStore,
    fail: HashSet<&'static str>,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail: HashSet::new(),
        }
    }

    pub fn failing(mut self, method: &'static str) -> Self {
        self.fail.insert(method);
        self
    }

    fn check(&self, method: &'static str) -> Result<(), StoreError> {
        if self.fail.contains(method) {
            Err(StoreError::Unavailable(format!(
                "injected failure: {method}"
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FleetStore for FlakyStore {
    async fn count_riders(&self) -> Result<u64, StoreError> {
        self.check("count_riders")?;
        self.inner.count_riders().await
    }

    async fn count_riders_with_status(&self, status: RiderStatus) -> Result<u64, StoreError> {
        self.check("count_riders_with_status")?;
        self.inner.count_riders_with_status(status).await
    }

    async fn count_swaps_since(&self, when: DateTime<Utc>) -> Result<u64, StoreError> {
        self.check("count_swaps_since")?;
        self.inner.count_swaps_since(when).await
    }

    async fn revenue_since(&self, when: DateTime<Utc>) -> Result<Option<MoneyTotal>, StoreError> {
        self.check("revenue_since")?;
        self.inner.revenue_since(when).await
    }

    async fn daily_payment_trends(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<PaymentTrendPoint>, StoreError> {
        self.check("daily_payment_trends")?;
        self.inner.daily_payment_trends(since).await
    }

    async fn daily_swap_trends(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SwapTrendPoint>, StoreError> {
        self.check("daily_swap_trends")?;
        self.inner.daily_swap_trends(since).await
    }

    async fn daily_registrations(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<RegistrationPoint>, StoreError> {
        self.check("daily_registrations")?;
        self.inner.daily_registrations(since).await
    }

    async fn monthly_registrations(&self) -> Result<Vec<GrowthPoint>, StoreError> {
        self.check("monthly_registrations")?;
        self.inner.monthly_registrations().await
    }

    async fn churn_breakdown(&self) -> Result<Vec<ChurnBucket>, StoreError> {
        self.check("churn_breakdown")?;
        self.inner.churn_breakdown().await
    }

    async fn churn_breakdown_detailed(&self) -> Result<Vec<ChurnBucketDetailed>, StoreError> {
        self.check("churn_breakdown_detailed")?;
        self.inner.churn_breakdown_detailed().await
    }

    async fn top_locations(&self, limit: usize) -> Result<Vec<LocationPerformance>, StoreError> {
        self.check("top_locations")?;
        self.inner.top_locations(limit).await
    }

    async fn recent_swaps(&self, limit: usize) -> Result<Vec<SwapActivity>, StoreError> {
        self.check("recent_swaps")?;
        self.inner.recent_swaps(limit).await
    }

    async fn hourly_swap_distribution(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<HourlyPoint>, StoreError> {
        self.check("hourly_swap_distribution")?;
        self.inner.hourly_swap_distribution(since).await
    }

    async fn location_stats(&self) -> Result<Vec<LocationStats>, StoreError> {
        self.check("location_stats")?;
        self.inner.location_stats().await
    }

    async fn usage_patterns(&self, now: DateTime<Utc>) -> Result<Vec<RiderUsage>, StoreError> {
        self.check("usage_patterns")?;
        self.inner.usage_patterns(now).await
    }

    async fn payment_behavior(&self) -> Result<Vec<PaymentBehavior>, StoreError> {
        self.check("payment_behavior")?;
        self.inner.payment_behavior().await
    }

    async fn rider_totals(&self, range: DateRange) -> Result<Option<RiderTotals>, StoreError> {
        self.check("rider_totals")?;
        self.inner.rider_totals(range).await
    }

    async fn swap_totals(&self, range: DateRange) -> Result<Option<SwapTotals>, StoreError> {
        self.check("swap_totals")?;
        self.inner.swap_totals(range).await
    }

    async fn payment_totals(&self, range: DateRange) -> Result<Option<PaymentTotals>, StoreError> {
        self.check("payment_totals")?;
        self.inner.payment_totals(range).await
    }

    async fn campaign_totals(
        &self,
        range: DateRange,
    ) -> Result<Option<CampaignTotals>, StoreError> {
        self.check("campaign_totals")?;
        self.inner.campaign_totals(range).await
    }

    async fn update_churn_risk(&self, rider_id: &str, risk: ChurnRisk) -> Result<(), StoreError> {
        self.check("update_churn_risk")?;
        self.inner.update_churn_risk(rider_id, risk).await
    }
}

/// Prediction stub that counts how many calls it receives
pub struct CountingPredictor {
    calls: AtomicUsize,
    response: PredictionResponse,
}

impl CountingPredictor {
    pub fn new(response: PredictionResponse) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response,
        }
    }

    pub fn with_predictions(predictions: Vec<ChurnPrediction>) -> Self {
        Self::new(PredictionResponse {
            predictions,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> PredictionResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

#[async_trait]
impl PredictionService for CountingPredictor {
    async fn churn_predictions(&self) -> Result<PredictionResponse, PredictionError> {
        Ok(self.record())
    }

    async fn demand_forecast(
        &self,
        _request: &ForecastRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        Ok(self.record())
    }

    async fn rider_clustering(&self) -> Result<PredictionResponse, PredictionError> {
        Ok(self.record())
    }

    async fn marketing_optimization(
        &self,
        _campaign_type: &str,
    ) -> Result<PredictionResponse, PredictionError> {
        Ok(self.record())
    }
}

/// Prediction stub whose every call fails
pub struct UnreachablePredictor;

#[async_trait]
impl PredictionService for UnreachablePredictor {
    async fn churn_predictions(&self) -> Result<PredictionResponse, PredictionError> {
        Err(PredictionError::Http("connection refused".to_string()))
    }

    async fn demand_forecast(
        &self,
        _request: &ForecastRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        Err(PredictionError::Http("connection refused".to_string()))
    }

    async fn rider_clustering(&self) -> Result<PredictionResponse, PredictionError> {
        Err(PredictionError::Http("connection refused".to_string()))
    }

    async fn marketing_optimization(
        &self,
        _campaign_type: &str,
    ) -> Result<PredictionResponse, PredictionError> {
        Err(PredictionError::Http("connection refused".to_string()))
    }
}
