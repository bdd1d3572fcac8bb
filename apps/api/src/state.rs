use std::sync::Arc;

use crate::allocation::scoring::MatchScorer;
use crate::config::Config;
use crate::store::ResourceStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResourceStore>,
    /// Pluggable match scorer. Default: WeightedMatchScorer.
    pub match_scorer: Arc<dyn MatchScorer>,
    pub config: Config,
}
