//! Tasklens server entry point.

use tasklens::api;
use tasklens::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklens=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    if config.has_api_key() {
        tracing::info!("Provider credential configured, model: {}", config.model);
    } else {
        tracing::warn!(
            "OPENAI_API_KEY not set; task processing will return a configuration error"
        );
    }

    api::serve(config).await
}
