//! Hyper-local content flow: lesson content about a topic, in a target
//! language, tailored to a specific location.

use crate::error::Result;
use crate::flows::{require_min_chars, validate_output};
use crate::genai::GenerationClient;
use crate::prompt::{self, Prompt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// History label for this flow.
pub const FEATURE_NAME: &str = "Hyper-Local Content";

const PROMPT_TEMPLATE: &str = "\
You are an expert in generating hyper-local content tailored to specific regions and languages.

Generate content about the following topic:
{{topic}}

The content should be in the following language:
{{language}}

The content should be tailored to the following location:
{{location}}

Ensure the content is culturally relevant and appropriate for students.
";

/// Input contract for hyper-local content generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalContentInput {
    /// Topic to generate content about.
    pub topic: String,

    /// Target language for the content.
    pub language: String,

    /// Local context (e.g. city, region) to tailor the content to.
    pub location: String,
}

impl LocalContentInput {
    /// Validate the input contract.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        require_min_chars("topic", &self.topic, 2)?;
        require_min_chars("language", &self.language, 2)?;
        require_min_chars("location", &self.location, 2)?;
        Ok(())
    }

    fn render_prompt(&self) -> Result<Prompt> {
        let vars: HashMap<&str, &str> = [
            ("topic", self.topic.as_str()),
            ("language", self.language.as_str()),
            ("location", self.location.as_str()),
        ]
        .into_iter()
        .collect();
        prompt::render(PROMPT_TEMPLATE, &vars)
    }
}

/// Output contract for hyper-local content generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalContentOutput {
    /// The generated hyper-local content.
    pub content: String,
}

/// Run the flow: validate, render, call the backend once, validate output.
///
/// # Errors
///
/// Returns a `Validation` error before any external call on bad input, or a
/// `Generation`/transport error from the backend.
pub async fn run(
    client: &dyn GenerationClient,
    input: &LocalContentInput,
) -> Result<LocalContentOutput> {
    input.validate()?;
    let prompt = input.render_prompt()?;
    let raw = client.generate_json(&prompt).await?;
    validate_output(raw)
}
