//! Flow invocation adapter.
//!
//! Glue between the presentation layer and the flows: converts binary
//! uploads to data URIs, invokes the designated flow, and on success
//! forwards the interaction to the history store. On flow failure the error
//! propagates and history is untouched. Large binary payloads are redacted
//! before storage.

use crate::error::Result;
use crate::flows::knowledge_base::{self, KnowledgeBaseInput, KnowledgeBaseOutput};
use crate::flows::local_content::{self, LocalContentInput, LocalContentOutput};
use crate::flows::visual_aid::{self, VisualAidInput, VisualAidOutput};
use crate::flows::worksheets::{self, WorksheetsInput, WorksheetsOutput};
use crate::genai::GenerationClient;
use crate::history::{HistoryStore, NewHistoryItem};
use crate::media;
use serde_json::json;

/// Placeholder stored in place of a large binary payload.
const REDACTED: &str = "...";

/// An uploaded binary file, as collected by the presentation layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name, kept for the history entry.
    pub name: String,

    /// MIME type of the file contents.
    pub mime_type: String,

    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Submit a hyper-local content request.
///
/// # Errors
///
/// Propagates validation and generation errors; no history entry is written
/// on failure.
pub async fn submit_local_content(
    client: &dyn GenerationClient,
    history: &mut HistoryStore,
    input: LocalContentInput,
) -> Result<LocalContentOutput> {
    let output = local_content::run(client, &input).await?;
    history.add(NewHistoryItem {
        feature: local_content::FEATURE_NAME.to_string(),
        query: serde_json::to_value(&input)?,
        result: serde_json::to_value(&output)?,
    });
    Ok(output)
}

/// Submit a textbook page upload for differentiated worksheets.
///
/// The upload is converted to a lossless data URI before the flow call; the
/// history entry stores the file name, never the encoded page.
///
/// # Errors
///
/// Fails on oversize uploads (`max_upload_bytes`), invalid input, or a
/// generation error; no history entry is written on failure.
pub async fn submit_worksheets(
    client: &dyn GenerationClient,
    history: &mut HistoryStore,
    file: &UploadedFile,
    grade_levels: String,
    max_upload_bytes: usize,
) -> Result<WorksheetsOutput> {
    let textbook_page_data_uri =
        media::encode_data_uri(&file.mime_type, &file.bytes, max_upload_bytes)?;
    let input = WorksheetsInput {
        textbook_page_data_uri,
        grade_levels,
    };
    let output = worksheets::run(client, &input).await?;
    history.add(NewHistoryItem {
        feature: worksheets::FEATURE_NAME.to_string(),
        query: json!({
            "gradeLevels": input.grade_levels,
            "fileName": file.name,
        }),
        result: serde_json::to_value(&output)?,
    });
    Ok(output)
}

/// Submit a knowledge-base question.
///
/// # Errors
///
/// Propagates validation and generation errors; no history entry is written
/// on failure.
pub async fn submit_knowledge_base(
    client: &dyn GenerationClient,
    history: &mut HistoryStore,
    input: KnowledgeBaseInput,
) -> Result<KnowledgeBaseOutput> {
    let output = knowledge_base::run(client, &input).await?;
    history.add(NewHistoryItem {
        feature: knowledge_base::FEATURE_NAME.to_string(),
        query: serde_json::to_value(&input)?,
        result: serde_json::to_value(&output)?,
    });
    Ok(output)
}

/// Submit a visual-aid description.
///
/// The generated image is returned in full but redacted in the history
/// entry, since the data URI can run to megabytes.
///
/// # Errors
///
/// Propagates validation and generation errors; no history entry is written
/// on failure.
pub async fn submit_visual_aid(
    client: &dyn GenerationClient,
    history: &mut HistoryStore,
    input: VisualAidInput,
) -> Result<VisualAidOutput> {
    let output = visual_aid::run(client, &input).await?;
    history.add(NewHistoryItem {
        feature: visual_aid::FEATURE_NAME.to_string(),
        query: serde_json::to_value(&input)?,
        result: json!({ "visualAidDataUri": REDACTED }),
    });
    Ok(output)
}
