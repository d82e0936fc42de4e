//! Pure routing decision: fresh retrieval or analysis of the cached set.

use actlog_core::config::RouterConfig;
use actlog_core::errors::{ActlogError, ActlogResult, QueryError};
use actlog_core::models::AnalysisRequest;
use actlog_core::{PatientId, RangeQuery};
use actlog_session::SessionCache;

use crate::request::StructuredRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// Run `query`, then `then` over the new set if given.
    Retrieve {
        query: RangeQuery,
        then: Option<AnalysisRequest>,
    },
    /// Answer from the cached set.
    Analyze(AnalysisRequest),
}

/// Decide how to serve `request` given the session's cache.
///
/// Retrieval parameters the request leaves out are taken from the cached
/// query. A merged query equal to the cached one is served from the cache.
pub fn decide(
    request: &StructuredRequest,
    cache: &SessionCache,
    config: &RouterConfig,
) -> ActlogResult<RouteDecision> {
    if !request.has_retrieval_parameters() {
        if !cache.is_populated() {
            return Err(ActlogError::NoCachedData);
        }
        return Ok(RouteDecision::Analyze(
            request.analysis.clone().unwrap_or_default(),
        ));
    }

    let query = merge_query(request, cache.originating_query(), config)?;
    if cache.originating_query() == Some(&query) {
        return Ok(RouteDecision::Analyze(
            request.analysis.clone().unwrap_or_default(),
        ));
    }
    Ok(RouteDecision::Retrieve {
        query,
        then: request.analysis.clone(),
    })
}

fn merge_query(
    request: &StructuredRequest,
    cached: Option<&RangeQuery>,
    config: &RouterConfig,
) -> Result<RangeQuery, QueryError> {
    let patient_id = match request.patient_id.as_deref() {
        Some(raw) => PatientId::parse(raw)?,
        None => cached
            .map(|q| q.patient_id)
            .ok_or(QueryError::MissingParameter { name: "patient_id" })?,
    };
    let record_type = match request.record_type.as_deref() {
        Some(raw) => raw.parse()?,
        None => cached
            .map(|q| q.record_type)
            .or(config.default_record_type)
            .ok_or(QueryError::MissingParameter {
                name: "record_type",
            })?,
    };
    let start_time = request
        .start_time
        .or(cached.map(|q| q.start_time))
        .ok_or(QueryError::MissingParameter { name: "start_time" })?;
    let end_time = request
        .end_time
        .or(cached.map(|q| q.end_time))
        .ok_or(QueryError::MissingParameter { name: "end_time" })?;

    let query = RangeQuery {
        patient_id,
        record_type,
        start_time,
        end_time,
    };
    query.validate()?;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actlog_core::models::AnalysisKind;
    use actlog_core::{CachedResultSet, RecordType};
    use test_fixtures::{day_query, DAY_END, DAY_START, OTHER_PATIENT, PATIENT};

    fn populated() -> SessionCache {
        let mut cache = SessionCache::new();
        cache.replace(CachedResultSet::new(day_query("UserActivityRecord"), Vec::new(), 0));
        cache
    }

    fn missing(err: ActlogError) -> &'static str {
        match err {
            ActlogError::InvalidQuery(QueryError::MissingParameter { name }) => name,
            other => panic!("expected missing parameter, got {other:?}"),
        }
    }

    #[test]
    fn bare_analysis_on_empty_cache_is_no_cached_data() {
        let request = StructuredRequest::analysis(AnalysisRequest::default());
        let err = decide(&request, &SessionCache::new(), &RouterConfig::default()).unwrap_err();
        assert!(matches!(err, ActlogError::NoCachedData));
    }

    #[test]
    fn bare_request_on_populated_cache_summarizes() {
        let decision =
            decide(&StructuredRequest::default(), &populated(), &RouterConfig::default()).unwrap();
        assert_eq!(decision, RouteDecision::Analyze(AnalysisRequest::default()));
    }

    #[test]
    fn full_parameters_on_empty_cache_retrieve() {
        let request = StructuredRequest::retrieval(PATIENT, "UserActivityRecord", DAY_START, DAY_END);
        let decision = decide(&request, &SessionCache::new(), &RouterConfig::default()).unwrap();
        assert_eq!(
            decision,
            RouteDecision::Retrieve {
                query: day_query("UserActivityRecord"),
                then: None
            }
        );
    }

    #[test]
    fn unchanged_parameters_analyze_the_cache() {
        let spikes = AnalysisRequest::new(AnalysisKind::DetectSpikes { window_secs: None });
        let request = StructuredRequest::retrieval(PATIENT, "UserActivityRecord", DAY_START, DAY_END)
            .then(spikes.clone());
        let decision = decide(&request, &populated(), &RouterConfig::default()).unwrap();
        assert_eq!(decision, RouteDecision::Analyze(spikes));
    }

    #[test]
    fn parameters_override_analysis_only_flag() {
        let mut request = StructuredRequest::analysis(AnalysisRequest::default());
        request.start_time = Some(DAY_START - 86_400);
        let decision = decide(&request, &populated(), &RouterConfig::default()).unwrap();
        let RouteDecision::Retrieve { query, then } = decision else {
            panic!("expected retrieval");
        };
        assert_eq!(query.start_time, DAY_START - 86_400);
        assert_eq!(query.end_time, DAY_END);
        assert_eq!(then, Some(AnalysisRequest::default()));
    }

    #[test]
    fn changed_patient_keeps_cached_window() {
        let request = StructuredRequest {
            patient_id: Some(OTHER_PATIENT.to_string()),
            ..StructuredRequest::default()
        };
        let RouteDecision::Retrieve { query, .. } =
            decide(&request, &populated(), &RouterConfig::default()).unwrap()
        else {
            panic!("expected retrieval");
        };
        assert_eq!(query.patient_id.to_string(), OTHER_PATIENT);
        assert_eq!((query.start_time, query.end_time), (DAY_START, DAY_END));
    }

    #[test]
    fn empty_cache_requires_patient_and_window() {
        let config = RouterConfig::default();
        let request = StructuredRequest {
            start_time: Some(DAY_START),
            end_time: Some(DAY_END),
            ..StructuredRequest::default()
        };
        assert_eq!(missing(decide(&request, &SessionCache::new(), &config).unwrap_err()), "patient_id");

        let request = StructuredRequest {
            patient_id: Some(PATIENT.to_string()),
            start_time: Some(DAY_START),
            ..StructuredRequest::default()
        };
        assert_eq!(missing(decide(&request, &SessionCache::new(), &config).unwrap_err()), "end_time");
    }

    #[test]
    fn record_type_falls_back_to_configured_default() {
        let request = StructuredRequest {
            patient_id: Some(PATIENT.to_string()),
            start_time: Some(DAY_START),
            end_time: Some(DAY_END),
            ..StructuredRequest::default()
        };
        let RouteDecision::Retrieve { query, .. } =
            decide(&request, &SessionCache::new(), &RouterConfig::default()).unwrap()
        else {
            panic!("expected retrieval");
        };
        assert_eq!(query.record_type, RecordType::UserActivityRecord);

        let strict = RouterConfig {
            default_record_type: None,
        };
        let err = decide(&request, &SessionCache::new(), &strict).unwrap_err();
        assert_eq!(missing(err), "record_type");
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let reversed = StructuredRequest::retrieval(PATIENT, "UserActivityRecord", 100, 50);
        let err = decide(&reversed, &SessionCache::new(), &RouterConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ActlogError::InvalidQuery(QueryError::ReversedWindow { .. })
        ));

        let bad_patient = StructuredRequest::retrieval("patient-7", "UserActivityRecord", 0, 10);
        let err = decide(&bad_patient, &SessionCache::new(), &RouterConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ActlogError::InvalidQuery(QueryError::InvalidPatientId { .. })
        ));
    }
}
