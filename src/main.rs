use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use forecast_relay::completion::OpenAiClient;
use forecast_relay::prompt::PromptTemplate;
use forecast_relay::{build_app, run_server, AppConfig, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let template = match PromptTemplate::forecast() {
        Ok(template) => template,
        Err(err) => {
            error!(%err, "invalid prompt template");
            std::process::exit(1);
        }
    };

    let AppConfig {
        port,
        api_key,
        model,
        base_url,
        timeout,
        mode,
    } = config;

    let client = OpenAiClient::new(api_key, model, &base_url, timeout);
    let state = AppState::new(Arc::new(client), template, mode);

    run_server(build_app(state), port).await;
}
