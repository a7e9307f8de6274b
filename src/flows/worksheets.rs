//! Differentiated worksheets flow: turns a textbook page image into
//! worksheets tailored to each requested grade level.

use crate::error::Result;
use crate::flows::{require_min_chars, validate_output};
use crate::genai::GenerationClient;
use crate::media;
use crate::prompt::{self, Prompt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// History label for this flow.
pub const FEATURE_NAME: &str = "Differentiated Materials";

const PROMPT_TEMPLATE: &str = "\
You are an expert teacher specializing in creating differentiated worksheets for students of varying grade levels.

You will use the provided textbook page to create worksheets tailored to each specified grade level. The worksheets should be designed to cater to the learning needs of students at each grade level.

Textbook Page: {{media:textbookPage}}

Grade Levels: {{gradeLevels}}

Create differentiated worksheets for each grade level.

Ensure that the worksheets are appropriate for the specified grade level and cover the content from the textbook page.

Output should be formatted as a JSON object with a 'worksheets' field. The 'worksheets' field should be an array of objects, where each object has a 'gradeLevel' and a 'worksheet' field. The gradeLevel field should be a string, and the worksheet field should contain the text of the worksheet.
";

/// Input contract for worksheet generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetsInput {
    /// Textbook page as a self-describing data URI
    /// (`data:<mimetype>;base64,<encoded_data>`).
    pub textbook_page_data_uri: String,

    /// Grade levels to create worksheets for, comma separated.
    pub grade_levels: String,
}

impl WorksheetsInput {
    /// Validate the input contract.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !media::is_data_uri(&self.textbook_page_data_uri) {
            return Err(crate::Error::validation(
                "textbookPageDataUri",
                "must be a data URI with a MIME type and Base64 payload",
            ));
        }
        require_min_chars("gradeLevels", &self.grade_levels, 1)?;
        Ok(())
    }

    fn render_prompt(&self) -> Result<Prompt> {
        let vars: HashMap<&str, &str> = [
            ("textbookPage", self.textbook_page_data_uri.as_str()),
            ("gradeLevels", self.grade_levels.as_str()),
        ]
        .into_iter()
        .collect();
        prompt::render(PROMPT_TEMPLATE, &vars)
    }
}

/// One worksheet in the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worksheet {
    /// Grade level the worksheet targets.
    pub grade_level: String,

    /// Worksheet content.
    pub worksheet: String,
}

/// Output contract for worksheet generation. Worksheets keep the order the
/// model returned them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetsOutput {
    /// Generated worksheets, one per grade level.
    pub worksheets: Vec<Worksheet>,
}

/// Run the flow: validate, render, call the backend once, validate output.
///
/// # Errors
///
/// Returns a `Validation` error before any external call on bad input, or a
/// `Generation`/transport error from the backend.
pub async fn run(
    client: &dyn GenerationClient,
    input: &WorksheetsInput,
) -> Result<WorksheetsOutput> {
    input.validate()?;
    let prompt = input.render_prompt()?;
    let raw = client.generate_json(&prompt).await?;
    validate_output(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptPart;

    fn valid_input() -> WorksheetsInput {
        WorksheetsInput {
            textbook_page_data_uri: "data:image/png;base64,YWJj".to_string(),
            grade_levels: "3rd, 5th".to_string(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn plain_string_page_is_rejected() {
        let mut input = valid_input();
        input.textbook_page_data_uri = "not a data uri".to_string();
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("textbookPageDataUri"));
    }

    #[test]
    fn empty_grade_levels_is_rejected() {
        let mut input = valid_input();
        input.grade_levels = "  ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn prompt_embeds_page_as_media_part() {
        let input = valid_input();
        let prompt = input.render_prompt().unwrap();
        assert!(prompt.parts.iter().any(|p| matches!(
            p,
            PromptPart::Media { data_uri } if data_uri == &input.textbook_page_data_uri
        )));
        // The URI is bound by reference, not spliced into the text
        assert!(!prompt.text().contains("base64"));
        assert!(prompt.text().contains("Grade Levels: 3rd, 5th"));
    }

    #[test]
    fn output_deserializes_in_model_order() {
        let output: WorksheetsOutput = serde_json::from_value(serde_json::json!({
            "worksheets": [
                {"gradeLevel": "5th", "worksheet": "b"},
                {"gradeLevel": "3rd", "worksheet": "a"}
            ]
        }))
        .unwrap();
        assert_eq!(output.worksheets.len(), 2);
        assert_eq!(output.worksheets[0].grade_level, "5th");
        assert_eq!(output.worksheets[1].grade_level, "3rd");
    }
}
