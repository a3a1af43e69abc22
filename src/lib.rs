//! HTTP relay that turns a location into an LLM-generated weather forecast.
//!
//! A `POST /forecast` request carries a location; the service renders a fixed
//! prompt around it, forwards the prompt to a completion service, and returns
//! the answer either schema-parsed or verbatim, depending on the configured
//! response mode.

pub mod api;
pub mod completion;
pub mod config;
pub mod parser;
pub mod prompt;

use std::sync::Arc;

use axum::Router;
use tracing::info;

use completion::CompletionClient;
use config::ResponseMode;
use prompt::PromptTemplate;

pub use config::AppConfig;
pub use parser::Forecast;

/// Read-only per-process state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub template: Arc<PromptTemplate>,
    pub mode: ResponseMode,
}

impl AppState {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        template: PromptTemplate,
        mode: ResponseMode,
    ) -> Self {
        Self {
            client,
            template: Arc::new(template),
            mode,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("bind failed");

    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "forecast relay listening");
    }

    axum::serve(listener, app).await.expect("server failed");
}
