use std::sync::Arc;

use crate::config::Config;
use crate::editor::store::SessionStore;
use crate::extraction::DocumentExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable extractor. Default: `ModelExtractor` over the Gemini client.
    pub extractor: Arc<dyn DocumentExtractor>,
    pub sessions: SessionStore,
    pub config: Config,
}
