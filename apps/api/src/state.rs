use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::gap::taxonomy::TaxonomyLookup;
use crate::llm_client::LlmClient;
use crate::parsing::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Lazily connected. `None` when `DATABASE_URL` is unset.
    pub db: Option<PgPool>,
    /// `None` when `ANTHROPIC_API_KEY` is unset.
    pub llm: Option<LlmClient>,
    /// Resume parsing pipeline. Holds the vision extractor when one is configured.
    pub parser: ResumeParser,
    /// Loaded once at startup, never mutated.
    pub taxonomy: Arc<dyn TaxonomyLookup>,
    pub config: Config,
}
