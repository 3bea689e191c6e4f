use std::sync::Arc;

use anyhow::Context;

use mail_triage::api::{email_routes, shutdown_on};
use mail_triage::config::TriageConfig;
use mail_triage::jobs::{InMemoryJobStore, JobRunner, JobStore};
use mail_triage::llm::create_provider;
use mail_triage::pipeline::EmailProcessor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = TriageConfig::from_env().context("invalid configuration")?;

    eprintln!("📬 Mail Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.llm.model);
    eprintln!(
        "   Remote: {}",
        if config.llm.api_key.is_some() {
            "enabled"
        } else {
            "disabled (GEMINI_API_KEY not set, heuristics only)"
        }
    );
    eprintln!("   API: http://{}/emails\n", config.bind_addr);

    // ── Pipeline ─────────────────────────────────────────────────────────
    let llm = create_provider(&config.llm)?;
    let processor = Arc::new(EmailProcessor::new(llm, config.fallback_delay));

    // ── Jobs ─────────────────────────────────────────────────────────────
    let store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let (runner, _dispatcher) = JobRunner::spawn(processor, store, config.max_concurrent_jobs);

    // ── HTTP ─────────────────────────────────────────────────────────────
    let app = email_routes(runner);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "Mail triage server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    Ok(())
}
