//! Visual-aid flow: generates a drawing or chart image from a description.

use crate::error::{Error, Result};
use crate::flows::require_min_chars;
use crate::genai::GenerationClient;
use crate::prompt::{self, Prompt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// History label for this flow.
pub const FEATURE_NAME: &str = "Visual Aid";

const PROMPT_TEMPLATE: &str = "\
You are an AI assistant designed to generate visual aids based on user descriptions.

Please generate a visual aid based on the following description:
{{description}}
";

/// Input contract for visual-aid generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualAidInput {
    /// Description of the drawing or chart to generate.
    pub description: String,
}

impl VisualAidInput {
    /// Validate the input contract.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        require_min_chars("description", &self.description, 10)
    }

    fn render_prompt(&self) -> Result<Prompt> {
        let vars: HashMap<&str, &str> = [("description", self.description.as_str())]
            .into_iter()
            .collect();
        prompt::render(PROMPT_TEMPLATE, &vars)
    }
}

/// Output contract for visual-aid generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualAidOutput {
    /// The generated visual aid as a data URI
    /// (`data:<mimetype>;base64,<encoded_data>`).
    pub visual_aid_data_uri: String,
}

/// Run the flow: validate, render, call the backend once, and require a
/// media reference in the response.
///
/// # Errors
///
/// Returns a `Validation` error before any external call on bad input, a
/// transport error from the backend, or `Generation("failed to generate
/// visual aid")` when the response carries no media.
pub async fn run(client: &dyn GenerationClient, input: &VisualAidInput) -> Result<VisualAidOutput> {
    input.validate()?;
    let prompt = input.render_prompt()?;
    let media = client
        .generate_image(&prompt)
        .await?
        .ok_or_else(|| Error::Generation("failed to generate visual aid".to_string()))?;
    Ok(VisualAidOutput {
        visual_aid_data_uri: media.data_uri,
    })
}
