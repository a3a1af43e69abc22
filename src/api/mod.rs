mod handlers;
mod models;

use axum::{routing::post, Router};

use crate::AppState;

pub use models::{ErrorResponse, ForecastRequest, ForecastResponse, ForecastResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/forecast", post(handlers::forecast))
        .fallback(handlers::not_found)
        .with_state(state)
}
