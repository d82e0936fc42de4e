//! Structured turn results handed back to the language layer.

use serde::{Deserialize, Serialize};

use actlog_core::errors::{ActlogErrorCode, ActlogResult};
use actlog_core::models::{AnalysisOutcome, RetrievalReport};

/// What one turn did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOutcome {
    /// Set when the turn ran a retrieval.
    pub retrieval: Option<RetrievalReport>,
    /// Set when the turn produced an analysis.
    pub analysis: Option<AnalysisOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResponse {
    Success(RouteOutcome),
    Failure {
        /// Stable machine-readable code, e.g. `NO_CACHED_DATA`.
        code: String,
        message: String,
        /// The caller can fix the request and try again.
        retryable: bool,
    },
}

impl ToolResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { code, .. } => Some(code),
        }
    }
}

impl From<ActlogResult<RouteOutcome>> for ToolResponse {
    fn from(result: ActlogResult<RouteOutcome>) -> Self {
        match result {
            Ok(outcome) => Self::Success(outcome),
            Err(err) => Self::Failure {
                code: err.error_code().to_string(),
                message: err.to_string(),
                retryable: err.is_caller_correctable(),
            },
        }
    }
}
