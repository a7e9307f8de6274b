//! Prompt templates and rendering.
//!
//! A flow's prompt template is a string with `{{field}}` placeholders for
//! text substitution and `{{media:field}}` placeholders that bind an encoded
//! media value by reference. Rendering is a pure function from validated
//! input fields to a [`Prompt`]; media is never inlined as prose.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// One segment of a rendered prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    /// Plain prompt text.
    Text(String),

    /// Embedded media, referenced by its data URI.
    Media {
        /// Self-describing encoded media (`data:<mime>;base64,<payload>`).
        data_uri: String,
    },
}

/// A rendered prompt: an ordered sequence of text and media parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prompt {
    /// Segments in the order they appear in the template.
    pub parts: Vec<PromptPart>,
}

impl Prompt {
    /// Build a prompt from a single text segment.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![PromptPart::Text(text.into())],
        }
    }

    /// Concatenation of all text parts, for logging and assertions.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                PromptPart::Text(t) => Some(t.as_str()),
                PromptPart::Media { .. } => None,
            })
            .collect()
    }
}

/// Render a template against the given field values.
///
/// `{{field}}` substitutes the field's value into the surrounding text;
/// `{{media:field}}` closes the current text segment and emits a media part
/// holding the field's data URI.
///
/// # Errors
///
/// Returns `Error::Template` on an unterminated placeholder or a placeholder
/// naming a field that was not supplied.
pub fn render(template: &str, vars: &HashMap<&str, &str>) -> Result<Prompt> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        text.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| Error::Template("unterminated placeholder".to_string()))?;
        let name = after[..end].trim();

        if let Some(field) = name.strip_prefix("media:") {
            let uri = vars
                .get(field)
                .ok_or_else(|| Error::Template(format!("unbound media placeholder: {field}")))?;
            if !text.is_empty() {
                parts.push(PromptPart::Text(std::mem::take(&mut text)));
            }
            parts.push(PromptPart::Media {
                data_uri: (*uri).to_string(),
            });
        } else {
            let value = vars
                .get(name)
                .ok_or_else(|| Error::Template(format!("unbound placeholder: {name}")))?;
            text.push_str(value);
        }
        rest = &after[end + 2..];
    }

    text.push_str(rest);
    if !text.is_empty() {
        parts.push(PromptPart::Text(text));
    }
    Ok(Prompt { parts })
}
