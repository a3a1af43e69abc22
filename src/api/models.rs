use serde::{Deserialize, Serialize};

use crate::parser::Forecast;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForecastRequest {
    pub location: Option<String>,
}

/// Either the schema-parsed forecast or the untouched completion text,
/// depending on the configured response mode.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ForecastResult {
    Structured(Forecast),
    Raw(String),
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub result: ForecastResult,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
