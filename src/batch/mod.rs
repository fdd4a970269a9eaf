//! Resilient batch execution module
//!
//! This module contains:
//! - `executor` - `Operation`, and `execute_batch` for settle-all fan-out
//! - `error` - Batch error types
//! - `result` - Per-operation outcome records

pub mod error;
pub mod executor;
pub mod result;

pub use error::BatchError;
pub use executor::{execute_batch, Operation};
pub use result::BatchResult;
