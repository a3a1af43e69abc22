use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The structured forecast the model is instructed to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    pub temperature: String,
    pub condition: String,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("completion is missing the `{0}` field")]
    MissingField(&'static str),
}

/// Parse the model's `name: value` lines back into a [`Forecast`].
///
/// Blank lines, markdown code fences and unknown lines are ignored; every
/// schema field must appear with a non-empty value.
pub fn parse_forecast(text: &str) -> Result<Forecast, ParseError> {
    let mut location = None;
    let mut temperature = None;
    let mut condition = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("```") {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match name.trim().to_ascii_lowercase().as_str() {
            "location" => location = Some(value.to_string()),
            "temperature" => temperature = Some(value.to_string()),
            "condition" => condition = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(Forecast {
        location: location.ok_or(ParseError::MissingField("location"))?,
        temperature: temperature.ok_or(ParseError::MissingField("temperature"))?,
        condition: condition.ok_or(ParseError::MissingField("condition"))?,
    })
}
