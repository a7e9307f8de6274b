//! Generation commands: one per flow.

use crate::adapter::{self, UploadedFile};
use crate::config::{load_config, Config};
use crate::error::Result;
use crate::flows::knowledge_base::KnowledgeBaseInput;
use crate::flows::local_content::LocalContentInput;
use crate::flows::visual_aid::VisualAidInput;
use crate::genai::GeminiClient;
use crate::history::{FileBackend, HistoryStore};
use crate::media;
use std::fs;
use std::path::{Path, PathBuf};

/// Shared setup: config, Gemini client, history store over the storage dir.
fn open_context() -> Result<(Config, GeminiClient, HistoryStore)> {
    let config = load_config()?;
    let client = GeminiClient::from_config(&config.genai)?;
    let backend = FileBackend::new(config.storage.path.clone())?;
    let history = HistoryStore::open(Box::new(backend));
    Ok((config, client, history))
}

/// Generate hyper-local content and print it.
///
/// # Errors
///
/// Returns an error on invalid input or a failed generation call.
pub async fn local_content(topic: String, language: String, location: String) -> Result<()> {
    let (_config, client, mut history) = open_context()?;
    let output = adapter::submit_local_content(
        &client,
        &mut history,
        LocalContentInput {
            topic,
            language,
            location,
        },
    )
    .await?;
    println!("{}", output.content);
    Ok(())
}

/// Generate differentiated worksheets from a textbook page image.
///
/// # Errors
///
/// Returns an error if the page file cannot be read, is too large, or the
/// generation call fails.
pub async fn worksheets(page: PathBuf, grade_levels: String) -> Result<()> {
    let (config, client, mut history) = open_context()?;
    let bytes = fs::read(&page)?;
    let file = UploadedFile {
        name: page
            .file_name()
            .map_or_else(|| page.display().to_string(), |n| {
                n.to_string_lossy().into_owned()
            }),
        mime_type: media::mime_for_path(&page).to_string(),
        bytes,
    };
    let output = adapter::submit_worksheets(
        &client,
        &mut history,
        &file,
        grade_levels,
        config.media.max_upload_bytes,
    )
    .await?;

    for sheet in &output.worksheets {
        println!("=== {} ===", sheet.grade_level);
        println!("{}\n", sheet.worksheet);
    }
    Ok(())
}

/// Answer a student question in the local language and print the explanation.
///
/// # Errors
///
/// Returns an error on invalid input or a failed generation call.
pub async fn explain(question: String, language: String) -> Result<()> {
    let (_config, client, mut history) = open_context()?;
    let output = adapter::submit_knowledge_base(
        &client,
        &mut history,
        KnowledgeBaseInput {
            question,
            local_language: language,
        },
    )
    .await?;
    println!("{}", output.explanation);
    Ok(())
}

/// Generate a visual aid; write it to `out` or report its size.
///
/// # Errors
///
/// Returns an error on invalid input, a failed generation call, or when the
/// output file cannot be written.
pub async fn visual_aid(description: String, out: Option<PathBuf>) -> Result<()> {
    let (_config, client, mut history) = open_context()?;
    let output =
        adapter::submit_visual_aid(&client, &mut history, VisualAidInput { description }).await?;

    let decoded = media::decode_data_uri(&output.visual_aid_data_uri)?;
    match out {
        Some(path) => {
            write_image(&path, &decoded.bytes)?;
            println!("Saved {} ({} bytes) to {}", decoded.mime_type, decoded.bytes.len(), path.display());
        }
        None => {
            println!(
                "Generated {} ({} bytes). Pass --out <file> to save it.",
                decoded.mime_type,
                decoded.bytes.len()
            );
        }
    }
    Ok(())
}

fn write_image(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    Ok(())
}
