//! StructuredRequest: what the language layer extracted from one turn.

use serde::{Deserialize, Serialize};

use actlog_core::config::CategoryConfig;
use actlog_core::errors::QueryError;
use actlog_core::models::AnalysisRequest;
use actlog_core::RecordType;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredRequest {
    pub patient_id: Option<String>,
    /// A record type name, or a phrase configured in
    /// `categories.record_type_aliases`.
    pub record_type: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub analysis: Option<AnalysisRequest>,
    /// The language layer's own reading of the turn. Explicit retrieval
    /// parameters override it.
    pub is_analysis_only: bool,
}

impl StructuredRequest {
    /// A request with no retrieval parameters.
    pub fn analysis(analysis: AnalysisRequest) -> Self {
        Self {
            analysis: Some(analysis),
            is_analysis_only: true,
            ..Self::default()
        }
    }

    /// A full retrieval request.
    pub fn retrieval(
        patient_id: impl Into<String>,
        record_type: impl Into<String>,
        start_time: i64,
        end_time: i64,
    ) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            record_type: Some(record_type.into()),
            start_time: Some(start_time),
            end_time: Some(end_time),
            ..Self::default()
        }
    }

    pub fn then(mut self, analysis: AnalysisRequest) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn has_retrieval_parameters(&self) -> bool {
        self.patient_id.is_some()
            || self.record_type.is_some()
            || self.start_time.is_some()
            || self.end_time.is_some()
    }

    /// Rewrite an alias phrase in `record_type` to the record type it names.
    /// Exact record type names pass through untouched.
    pub fn resolve_aliases(mut self, categories: &CategoryConfig) -> Result<Self, QueryError> {
        if let Some(raw) = self.record_type.as_deref() {
            if raw.parse::<RecordType>().is_err() {
                if let Some(resolved) = categories.resolve_record_type(raw)? {
                    self.record_type = Some(resolved.to_string());
                }
            }
        }
        Ok(self)
    }
}
