//! Resilient batch executor
//!
//! Runs a batch of independent asynchronous read operations concurrently,
//! isolates failures to the operation that caused them, and produces a
//! complete, positionally-ordered result list. A failed or timed-out
//! operation settles to its declared default value; nothing an individual
//! operation does can fail the batch as a whole.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use super::error::BatchError;
use super::result::BatchResult;

type OperationFuture<T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send>>;

/// A single named asynchronous action with a declared default value
///
/// Operations within a batch must be independent: none may depend on the
/// output of another in the same batch. A dependency between fetches is
/// expressed as a separate, sequential batch.
pub struct Operation<T> {
    name: String,
    default: T,
    timeout: Option<Duration>,
    run: OperationFuture<T>,
}

impl<T> Operation<T> {
    /// Create an operation from an async action and its fallback value
    pub fn new<F>(name: impl Into<String>, default: T, run: F) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self {
            name: name.into(),
            default,
            timeout: None,
            run: Box::pin(run),
        }
    }

    /// Create an operation that settles immediately to a known value
    ///
    /// Used when a collaborator is absent by configuration: the operation
    /// resolves successfully without performing any I/O.
    pub fn resolved(name: impl Into<String>, value: T) -> Self
    where
        T: Clone + Send + 'static,
    {
        let settled = value.clone();
        Self {
            name: name.into(),
            default: value,
            timeout: None,
            run: Box::pin(async move { Ok(settled) }),
        }
    }

    /// Bound the operation's runtime. A timed-out operation is treated
    /// identically to a failed one: default substituted, no retry, no
    /// cancellation of siblings.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adapt the operation's value type, mapping both the action's output
    /// and the declared default. Name and timeout are preserved.
    pub fn map<U, F>(self, f: F) -> Operation<U>
    where
        T: 'static,
        U: 'static,
        F: Fn(T) -> U + Send + 'static,
    {
        let Self {
            name,
            default,
            timeout,
            run,
        } = self;
        let default = f(default);
        Operation {
            name,
            default,
            timeout,
            run: Box::pin(async move { run.await.map(&f) }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settle this operation: run it once, catching failure at the boundary
    async fn execute(self) -> BatchResult<T> {
        let Self {
            name,
            default,
            timeout,
            run,
        } = self;

        let outcome = match timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => Err(anyhow::anyhow!("timed out after {limit:?}")),
            },
            None => run.await,
        };

        match outcome {
            Ok(value) => BatchResult::Success { value },
            Err(err) => {
                let reason = err.to_string();
                warn!(operation = %name, %reason, "operation failed, using default");
                BatchResult::UsedDefault {
                    value: default,
                    reason,
                }
            }
        }
    }
}

impl<T> std::fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Run every operation in the batch concurrently and settle each one
/// independently
///
/// Returns one [`BatchResult`] per input operation, in input order,
/// regardless of completion order or which subset failed. The call itself
/// fails only for malformed input (empty batch, duplicate names) - a defect
/// in the calling code, never a data-source outage.
#[instrument(skip(operations), fields(batch_size = operations.len()))]
pub async fn execute_batch<T>(
    operations: Vec<Operation<T>>,
) -> Result<Vec<BatchResult<T>>, BatchError>
where
    T: Send + 'static,
{
    if operations.is_empty() {
        return Err(BatchError::EmptyBatch);
    }

    let mut seen = HashSet::new();
    for op in &operations {
        if !seen.insert(op.name.clone()) {
            return Err(BatchError::DuplicateName(op.name.clone()));
        }
    }

    debug!("launching batch");
    Ok(join_all(operations.into_iter().map(Operation::execute)).await)
}
