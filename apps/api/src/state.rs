use std::sync::Arc;

use crate::config::Config;
use crate::editing::registry::SessionRegistry;
use crate::generation::generator::ReportBackend;
use crate::history::topics::TopicHistory;
use crate::layout::Typography;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Generation capability. Default: LLM-backed; tests swap in a canned backend.
    pub backend: Arc<dyn ReportBackend>,
    pub history: TopicHistory,
    /// Open report sessions, one authoritative report each.
    pub sessions: SessionRegistry,
    /// Export typography: font tiers and block gaps for the pagination engine.
    pub typography: Typography,
}
