use thiserror::Error;

/// Field names and descriptions of the forecast the model is asked to emit.
/// The format instructions are derived from this list, so the prompt and the
/// parser cannot drift apart.
pub const FORECAST_FIELDS: [(&str, &str); 3] = [
    ("location", "the location the forecast is for"),
    ("temperature", "the current temperature, including units"),
    ("condition", "a short description of the sky and precipitation"),
];

const FORECAST_TEMPLATE: &str = "Provide a weather forecast for the following location: {location}.\n\
    Follow this output format:\n\
    {format_instructions}";

const LOCATION_PLACEHOLDER: &str = "{location}";
const FORMAT_PLACEHOLDER: &str = "{format_instructions}";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template is missing the {0} placeholder")]
    MissingPlaceholder(&'static str),
}

/// Build the instruction block telling the model how to shape its answer so
/// [`crate::parser::parse_forecast`] can read it back. Deterministic; computed
/// once at startup.
pub fn format_instructions() -> String {
    let mut out = String::from(
        "Respond with exactly one line per field, in the form `name: value`, with no other text:",
    );
    for (name, description) in FORECAST_FIELDS {
        out.push('\n');
        out.push_str(name);
        out.push_str(": <");
        out.push_str(description);
        out.push('>');
    }
    out
}

/// A fixed two-placeholder prompt template with the format instructions
/// applied once at construction, so rendering is a single substitution per
/// request.
#[derive(Debug)]
pub struct PromptTemplate {
    prefilled: String,
}

impl PromptTemplate {
    pub fn new(template: &str, format_instructions: &str) -> Result<Self, TemplateError> {
        if !template.contains(LOCATION_PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder(LOCATION_PLACEHOLDER));
        }
        if !template.contains(FORMAT_PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder(FORMAT_PLACEHOLDER));
        }
        Ok(Self {
            prefilled: template.replace(FORMAT_PLACEHOLDER, format_instructions),
        })
    }

    /// The production forecast template.
    pub fn forecast() -> Result<Self, TemplateError> {
        Self::new(FORECAST_TEMPLATE, &format_instructions())
    }

    /// Substitute the location into the template. The HTTP layer rejects
    /// empty locations before this is called; no validation happens here.
    pub fn render(&self, location: &str) -> String {
        self.prefilled.replace(LOCATION_PLACEHOLDER, location)
    }
}
