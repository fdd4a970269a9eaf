//! Batch error types

/// Errors that can occur launching a batch
///
/// These are caller-programming-error conditions. Individual operation
/// failures never surface here; they are absorbed into
/// [`BatchResult::UsedDefault`](super::BatchResult::UsedDefault).
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("batch contains no operations")]
    EmptyBatch,

    #[error("duplicate operation name in batch: {0}")]
    DuplicateName(String),
}
