//! Router: runs one session turn end to end.

use std::sync::Arc;

use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, info, warn, Instrument};

use actlog_analysis::AnalysisEngine;
use actlog_core::config::{CategoryConfig, RouterConfig, SessionConfig};
use actlog_core::errors::{ActlogErrorCode, ActlogResult};
use actlog_core::tracing::init_tracing;
use actlog_core::{route_span, ActlogConfig, IRecordStore};
use actlog_retrieval::RetrievalEngine;
use actlog_session::{cleanup_idle_sessions, SessionCache, SessionManager};
use actlog_storage::SqliteRecordStore;

use crate::decision::{decide, RouteDecision};
use crate::request::StructuredRequest;
use crate::response::{RouteOutcome, ToolResponse};

pub struct Router {
    store: Arc<dyn IRecordStore>,
    sessions: SessionManager,
    analysis: AnalysisEngine,
    config: RouterConfig,
    session_config: SessionConfig,
}

impl Router {
    pub fn new(store: Arc<dyn IRecordStore>, config: &ActlogConfig) -> Self {
        Self {
            store,
            sessions: SessionManager::new(),
            analysis: AnalysisEngine::new(config.analysis.clone(), config.categories.clone()),
            config: config.router.clone(),
            session_config: config.session.clone(),
        }
    }

    /// Router over the SQLite store described by `config.store`. Also
    /// installs the tracing subscriber described by `config.observability`.
    pub fn open(config: &ActlogConfig) -> ActlogResult<Self> {
        init_tracing(&config.observability);
        let store = SqliteRecordStore::from_config(&config.store)?;
        info!(db_path = ?store.db_path(), "record store opened");
        Ok(Self::new(Arc::new(store), config))
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    fn categories(&self) -> &CategoryConfig {
        self.analysis.categories()
    }

    /// Run one turn. Turns on the same session run one at a time.
    ///
    /// The store scan blocks. On a multi-thread runtime the turn runs under
    /// `block_in_place`, so other sessions keep their workers; on a
    /// current-thread runtime it runs inline and stalls the executor for
    /// the length of the scan.
    pub async fn handle(
        &self,
        session_id: &str,
        request: &StructuredRequest,
    ) -> ActlogResult<RouteOutcome> {
        let span = route_span!(session_id);
        async {
            let mut session = self.sessions.acquire(session_id).await;
            let result = run_blocking(|| self.run_turn(&mut session.cache, request));
            session.finish_turn();
            if let Err(err) = &result {
                warn!(code = err.error_code(), error = %err, "turn failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    /// [`handle`](Self::handle), folded into a structured response.
    pub async fn respond(&self, session_id: &str, request: &StructuredRequest) -> ToolResponse {
        self.handle(session_id, request).await.into()
    }

    fn run_turn(
        &self,
        cache: &mut SessionCache,
        request: &StructuredRequest,
    ) -> ActlogResult<RouteOutcome> {
        let request = request.clone().resolve_aliases(self.categories())?;
        let decision = decide(&request, cache, &self.config)?;
        debug!(?decision, "route decided");

        match decision {
            RouteDecision::Retrieve { query, then } => {
                // Reject a bad follow-up before touching the store.
                if let Some(follow_up) = &then {
                    self.analysis.check_request(follow_up)?;
                }
                let report = RetrievalEngine::new(self.store.as_ref()).retrieve(&query, cache)?;
                let analysis = then
                    .map(|request| self.analysis.analyze(cache, &request))
                    .transpose()?;
                Ok(RouteOutcome {
                    retrieval: Some(report),
                    analysis,
                })
            }
            RouteDecision::Analyze(request) => Ok(RouteOutcome {
                retrieval: None,
                analysis: Some(self.analysis.analyze(cache, &request)?),
            }),
        }
    }

    /// Tear down sessions idle longer than `session.max_idle_secs`.
    pub fn cleanup_idle(&self) -> usize {
        let max_idle = i64::try_from(self.session_config.max_idle_secs).unwrap_or(i64::MAX);
        cleanup_idle_sessions(
            &self.sessions,
            chrono::Duration::seconds(max_idle.min(i64::from(u32::MAX))),
        )
    }
}

/// Run blocking turn work without starving the executor where the runtime
/// allows it.
fn run_blocking<T>(work: impl FnOnce() -> T) -> T {
    match Handle::try_current().map(|handle| handle.runtime_flavor()) {
        Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(work),
        _ => work(),
    }
}
