//! Knowledge-base flow: explains a complex student question in the local
//! language, using analogies.

use crate::error::Result;
use crate::flows::{require_min_chars, validate_output};
use crate::genai::GenerationClient;
use crate::prompt::{self, Prompt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// History label for this flow.
pub const FEATURE_NAME: &str = "Knowledge Base";

const PROMPT_TEMPLATE: &str = "\
You are an expert tutor, skilled at explaining complex topics in simple terms.

You will answer the student's question in their local language, and use analogies to help them understand.

Local Language: {{localLanguage}}

Question: {{question}}

Explanation:";

/// Input contract for knowledge-base explanations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseInput {
    /// The complex question from the student.
    pub question: String,

    /// Local language to provide the explanation in.
    pub local_language: String,
}

impl KnowledgeBaseInput {
    /// Validate the input contract.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        require_min_chars("question", &self.question, 10)?;
        require_min_chars("localLanguage", &self.local_language, 2)?;
        Ok(())
    }

    fn render_prompt(&self) -> Result<Prompt> {
        let vars: HashMap<&str, &str> = [
            ("question", self.question.as_str()),
            ("localLanguage", self.local_language.as_str()),
        ]
        .into_iter()
        .collect();
        prompt::render(PROMPT_TEMPLATE, &vars)
    }
}

/// Output contract for knowledge-base explanations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseOutput {
    /// Explanation in the local language, with analogies.
    pub explanation: String,
}

/// Run the flow: validate, render, call the backend once, validate output.
///
/// # Errors
///
/// Returns a `Validation` error before any external call on bad input, or a
/// `Generation`/transport error from the backend.
pub async fn run(
    client: &dyn GenerationClient,
    input: &KnowledgeBaseInput,
) -> Result<KnowledgeBaseOutput> {
    input.validate()?;
    let prompt = input.render_prompt()?;
    let raw = client.generate_json(&prompt).await?;
    validate_output(raw)
}
