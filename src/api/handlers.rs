use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::config::ResponseMode;
use crate::parser::parse_forecast;
use crate::AppState;

use super::models::{ErrorResponse, ForecastRequest, ForecastResponse, ForecastResult};

pub async fn forecast(
    State(state): State<AppState>,
    Json(payload): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, (StatusCode, Json<ErrorResponse>)> {
    let location = payload.location.as_deref().unwrap_or("").trim();
    if location.is_empty() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Please provide a location in the request body.",
        ));
    }

    let prompt = state.template.render(location);

    let completion = state.client.complete(&prompt).await.map_err(|err| {
        error!(%err, "completion request failed");
        internal_error()
    })?;

    let result = match state.mode {
        ResponseMode::Raw => ForecastResult::Raw(completion),
        ResponseMode::Structured => {
            let forecast = parse_forecast(&completion).map_err(|err| {
                error!(%err, raw = %completion, "completion did not match the instructed format");
                internal_error()
            })?;
            ForecastResult::Structured(forecast)
        }
    };

    Ok(Json(ForecastResponse { result }))
}

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
