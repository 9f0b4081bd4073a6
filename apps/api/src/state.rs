use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::matching::MatchEvaluator;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub evaluator: MatchEvaluator,
    /// Resume text extractor. Default: PdfExtractor.
    pub extractor: Arc<dyn DocumentExtractor>,
    pub config: Config,
}
