//! # Fleet Analytics
//!
//! Analytics core for a battery-swap fleet-management service: riders,
//! swap transactions, payments, and marketing campaigns, aggregated into
//! dashboard-ready reports.
//!
//! ## Features
//!
//! - **Resilient batch execution** - run independent queries concurrently;
//!   a failed or timed-out query degrades to its declared default instead
//!   of failing the report
//! - **Typed reports** - dashboard, trends, churn, locations, behavior,
//!   and comprehensive composites with explicit success/default status per
//!   operation
//! - **Prediction integration** - optional external churn/forecast service
//!   with bounded timeouts and write-after-predict persistence
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fleet_analytics::reports::AnalyticsService;
//! use fleet_analytics::store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(MemoryStore::new());
//!     let service = AnalyticsService::new(store);
//!
//!     let dashboard = service.dashboard().await?;
//!     println!("riders: {}", dashboard.summary.total_riders);
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod clock;
pub mod config;
pub mod envelope;
pub mod model;
pub mod predict;
pub mod reports;
pub mod store;

// Re-export main types
pub use batch::{execute_batch, BatchError, BatchResult, Operation};
pub use clock::Clock;
pub use config::{AnalyticsConfig, ConfigError, Environment};
pub use envelope::{respond, ApiResponse};
pub use predict::{
    persist_churn_predictions, ChurnPrediction, ForecastRequest, HttpPredictionService,
    PersistSummary, PredictionConfig, PredictionError, PredictionResponse, PredictionService,
};
pub use reports::{
    AnalyticsService, BehaviorReport, ChurnReport, ComprehensiveReport, DashboardReport,
    LocationReport, ReportError, SummaryReport, TrendsReport,
};
pub use store::{FleetDataset, FleetStore, MemoryStore, StoreError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::batch::{execute_batch, BatchError, BatchResult, Operation};
    pub use crate::clock::Clock;
    pub use crate::config::{AnalyticsConfig, Environment};
    pub use crate::envelope::{respond, ApiResponse};
    pub use crate::model::{ChurnRisk, DateRange, PaymentStatus, RiderStatus};
    pub use crate::predict::{
        ChurnPrediction, ForecastRequest, PredictionConfig, PredictionResponse, PredictionService,
    };
    pub use crate::reports::{AnalyticsService, ReportError};
    pub use crate::store::{FleetDataset, FleetStore, MemoryStore, StoreError};
}
