mod config;
mod db;
mod errors;
mod gap;
mod generation;
mod llm_client;
mod models;
mod parsing;
mod profile;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_lazy_pool;
use crate::errors::handle_panic;
use crate::gap::taxonomy::SkillTaxonomy;
use crate::llm_client::LlmClient;
use crate::parsing::confidence::ConfidenceWeights;
use crate::parsing::vision::{LlmVisionExtractor, VisionExtractor};
use crate::parsing::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},tower_http={level}",
                env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting talent-api v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL (optional, connects on first use)
    let db = match &config.database_url {
        Some(url) => Some(create_lazy_pool(url)?),
        None => {
            warn!("DATABASE_URL not set, profile saving disabled");
            None
        }
    };

    // LLM client (optional): vision extraction and job generation
    let llm = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.llm_timeout)?;
            info!(
                "LLM client initialized (model: {}, timeout: {}s)",
                llm_client::MODEL,
                config.llm_timeout.as_secs()
            );
            Some(llm)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set, resumes are parsed rule-based only");
            None
        }
    };

    let vision = llm
        .clone()
        .map(|llm| Arc::new(LlmVisionExtractor::new(llm)) as Arc<dyn VisionExtractor>);
    let parser = ResumeParser::new(vision, ConfidenceWeights::default());

    let taxonomy = Arc::new(SkillTaxonomy::load(config.skill_taxonomy_path.as_deref())?);

    let state = AppState {
        db,
        llm,
        parser,
        taxonomy,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
