//! JSON response envelope
//!
//! The boundary between report values and whatever transport serves them.
//! Normal completion - including fully degraded data - is always a success
//! envelope; only the catastrophic class (a defect in batch construction or
//! composite assembly) becomes a failure envelope, with the underlying
//! detail exposed only outside production.

use serde::Serialize;
use tracing::error;

use crate::config::Environment;
use crate::reports::ReportError;

/// Wire-shaped response envelope
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success {
        success: bool,
        data: T,
    },
    Failure {
        success: bool,
        message: String,
        error: String,
    },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::Success {
            success: true,
            data,
        }
    }

    pub fn failure(message: &str, err: &ReportError, environment: Environment) -> Self {
        error!("{message}: {err}");
        let error = match environment {
            Environment::Development => err.to_string(),
            Environment::Production => "Internal server error".to_string(),
        };
        Self::Failure {
            success: false,
            message: message.to_string(),
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Translate a report outcome into an envelope
pub fn respond<T>(
    message_on_error: &str,
    result: Result<T, ReportError>,
    environment: Environment,
) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::success(data),
        Err(err) => ApiResponse::failure(message_on_error, &err, environment),
    }
}
