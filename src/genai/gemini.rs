//! Gemini `generateContent` API client.

use crate::error::{Error, Result};
use crate::media;
use crate::prompt::{Prompt, PromptPart};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{GeneratedMedia, GenerationClient};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini generation backend.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot
    /// be built.
    pub fn new(
        api_key: impl Into<String>,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::Config("Gemini API key is required".to_string()));
        }

        let client = Client::builder()
            .user_agent(concat!("sahayak/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            api_key,
            api_base: GEMINI_API_BASE.to_string(),
            text_model: text_model.into(),
            image_model: image_model.into(),
        })
    }

    /// Create a client from the `[genai]` config section. The API key
    /// usually arrives via the `GEMINI_API_KEY` environment override.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is available.
    pub fn from_config(config: &crate::config::GenAiConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            Error::Config("no API key: set GEMINI_API_KEY or [genai] api_key".to_string())
        })?;
        Self::new(api_key, &config.text_model, &config.image_model)
    }

    /// Override the API base URL. Intended for tests.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Make one `generateContent` call against the given model.
    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/models/{model}:generateContent", self.api_base);
        debug!(model = %model, "Calling Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map_or(error_text, |body| body.error.message);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(Error::Serde)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate_json(&self, prompt: &Prompt) -> Result<serde_json::Value> {
        let request = GenerateRequest {
            contents: vec![Content::from_prompt(prompt)?],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_modalities: None,
            }),
        };
        let response = self.generate(&self.text_model, &request).await?;
        parse_json_response(&response)
    }

    async fn generate_image(&self, prompt: &Prompt) -> Result<Option<GeneratedMedia>> {
        let request = GenerateRequest {
            contents: vec![Content::from_prompt(prompt)?],
            generation_config: Some(GenerationConfig {
                response_mime_type: None,
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
            }),
        };
        let response = self.generate(&self.image_model, &request).await?;
        parse_image_response(&response)
    }
}

// Wire types. The API accepts and emits camelCase field names.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

impl Content {
    /// Convert a rendered prompt into request parts. Media parts carry the
    /// raw bytes as `inlineData`, never as prose.
    fn from_prompt(prompt: &Prompt) -> Result<Self> {
        let mut parts = Vec::with_capacity(prompt.parts.len());
        for part in &prompt.parts {
            match part {
                PromptPart::Text(text) => parts.push(Part::Text { text: text.clone() }),
                PromptPart::Media { data_uri } => {
                    let decoded = media::decode_data_uri(data_uri)?;
                    parts.push(Part::InlineData {
                        inline_data: InlineData {
                            mime_type: decoded.mime_type,
                            data: base64_encode(&decoded.bytes),
                        },
                    });
                }
            }
        }
        Ok(Self { parts })
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn base64_encode(bytes: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    STANDARD.encode(bytes)
}

/// Extract the first candidate's text and parse it as JSON.
fn parse_json_response(response: &GenerateResponse) -> Result<serde_json::Value> {
    let text: String = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::Generation(
            "model returned no text content".to_string(),
        ));
    }

    serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| Error::Generation(format!("model returned malformed JSON: {e}")))
}

/// Extract the first inline media part, if any, as a data URI.
fn parse_image_response(response: &GenerateResponse) -> Result<Option<GeneratedMedia>> {
    let inline = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.iter().find_map(|p| p.inline_data.as_ref()));

    match inline {
        Some(data) => Ok(Some(GeneratedMedia {
            mime_type: data.mime_type.clone(),
            data_uri: format!("data:{};base64,{}", data.mime_type, data.data),
        })),
        None => Ok(None),
    }
}

/// Strip a surrounding markdown code fence. Models sometimes wrap JSON-mode
/// output in ```json fences despite the response MIME type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line
    match rest.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => rest.trim(),
    }
}
