use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use triage_core::{
    DEFAULT_REST_ADDR, TriagePipeline, TriageTables, build_guidance, llm_settings_from_env_values,
};

/// Main entry point for the triage service
///
/// Resolves configuration once, chooses the guidance mode, builds the pipeline and serves the
/// REST API until the process is stopped.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `OPENAI_API_KEY`: enables model-assisted guidance when set and non-blank
/// - `OPENAI_BASE_URL`: base URL of the chat-completions service
/// - `OPENAI_MODEL`: model name sent with each request
/// - `LLM_TIMEOUT_SECS`: per-request timeout for the model service (default: 30)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid, or the server fails to bind or run
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_run=info".parse()?)
                .add_directive("triage_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("TRIAGE_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let settings = llm_settings_from_env_values(
        std::env::var("OPENAI_API_KEY").ok(),
        std::env::var("OPENAI_BASE_URL").ok(),
        std::env::var("OPENAI_MODEL").ok(),
        std::env::var("LLM_TIMEOUT_SECS").ok(),
    )?;
    match &settings {
        Some(s) => tracing::info!(model = s.model(), base_url = s.base_url(), "guidance mode: model"),
        None => tracing::info!("guidance mode: fallback (OPENAI_API_KEY not set)"),
    }

    let guidance = build_guidance(settings.as_ref())?;
    let pipeline = TriagePipeline::new(Arc::new(TriageTables::default()), guidance);

    tracing::info!("++ Starting triage REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, api_rest::router(AppState::new(pipeline))).await?;

    Ok(())
}
