//! Integration tests for the full submit flow: adapter → flow → fake
//! generation client → history store.

use async_trait::async_trait;
use sahayak::adapter::{self, UploadedFile};
use sahayak::flows::knowledge_base::KnowledgeBaseInput;
use sahayak::flows::local_content::LocalContentInput;
use sahayak::flows::visual_aid::VisualAidInput;
use sahayak::genai::{GeneratedMedia, GenerationClient};
use sahayak::history::{HistoryStore, MemoryBackend};
use sahayak::media;
use sahayak::prompt::{Prompt, PromptPart};
use sahayak::{Error, Result};
use serde_json::json;
use std::sync::Mutex;

/// Scripted generation client that records every prompt it receives.
struct FakeClient {
    json_response: serde_json::Value,
    media: Option<GeneratedMedia>,
    calls: Mutex<Vec<Prompt>>,
}

impl FakeClient {
    fn with_json(json_response: serde_json::Value) -> Self {
        Self {
            json_response,
            media: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_media(media: Option<GeneratedMedia>) -> Self {
        Self {
            json_response: json!({}),
            media,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn last_prompt(&self) -> Prompt {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl GenerationClient for FakeClient {
    async fn generate_json(&self, prompt: &Prompt) -> Result<serde_json::Value> {
        self.calls.lock().unwrap().push(prompt.clone());
        Ok(self.json_response.clone())
    }

    async fn generate_image(&self, prompt: &Prompt) -> Result<Option<GeneratedMedia>> {
        self.calls.lock().unwrap().push(prompt.clone());
        Ok(self.media.clone())
    }
}

fn new_store() -> HistoryStore {
    HistoryStore::open(Box::new(MemoryBackend::new()))
}

#[tokio::test]
async fn local_content_scenario_records_history() {
    let client = FakeClient::with_json(json!({
        "content": "दिल्ली में प्रकाश संश्लेषण..."
    }));
    let mut history = new_store();

    let output = adapter::submit_local_content(
        &client,
        &mut history,
        LocalContentInput {
            topic: "Photosynthesis".to_string(),
            language: "Hindi".to_string(),
            location: "Delhi, India".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(!output.content.is_empty());
    assert_eq!(client.call_count(), 1);

    let items = history.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].feature, "Hyper-Local Content");
    assert_eq!(items[0].query["topic"], "Photosynthesis");
    assert_eq!(items[0].query["language"], "Hindi");
    assert_eq!(items[0].result["content"], output.content);
}

#[tokio::test]
async fn invalid_input_fails_before_any_external_call() {
    let client = FakeClient::with_json(json!({"content": "x"}));
    let mut history = new_store();

    let err = adapter::submit_local_content(
        &client,
        &mut history,
        LocalContentInput {
            topic: "x".to_string(),
            language: "Hindi".to_string(),
            location: "Delhi".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(client.call_count(), 0);
    assert!(history.items().is_empty());
}

#[tokio::test]
async fn output_schema_mismatch_fails_without_history_entry() {
    let client = FakeClient::with_json(json!({"unexpected": 42}));
    let mut history = new_store();

    let err = adapter::submit_local_content(
        &client,
        &mut history,
        LocalContentInput {
            topic: "Photosynthesis".to_string(),
            language: "Hindi".to_string(),
            location: "Delhi, India".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Generation(_)));
    assert_eq!(client.call_count(), 1);
    assert!(history.items().is_empty());
}

#[tokio::test]
async fn worksheets_keeps_model_order_and_redacts_the_upload() {
    let client = FakeClient::with_json(json!({
        "worksheets": [
            {"gradeLevel": "3rd", "worksheet": "Color the leaf."},
            {"gradeLevel": "5th", "worksheet": "Label the chloroplast."}
        ]
    }));
    let mut history = new_store();
    let page_bytes = vec![137u8, 80, 78, 71, 13, 10, 26, 10];
    let file = UploadedFile {
        name: "chapter-3.png".to_string(),
        mime_type: "image/png".to_string(),
        bytes: page_bytes.clone(),
    };

    let output = adapter::submit_worksheets(
        &client,
        &mut history,
        &file,
        "3rd, 5th".to_string(),
        media::DEFAULT_MAX_UPLOAD_BYTES,
    )
    .await
    .unwrap();

    assert_eq!(output.worksheets.len(), 2);
    assert_eq!(output.worksheets[0].grade_level, "3rd");
    assert_eq!(output.worksheets[1].grade_level, "5th");

    // The prompt carried the page as a media part with the original bytes
    let prompt = client.last_prompt();
    let uri = prompt
        .parts
        .iter()
        .find_map(|p| match p {
            PromptPart::Media { data_uri } => Some(data_uri.clone()),
            PromptPart::Text(_) => None,
        })
        .expect("prompt should carry a media part");
    assert_eq!(media::decode_data_uri(&uri).unwrap().bytes, page_bytes);

    // History stores the file name, not the encoded page
    let items = history.items();
    assert_eq!(items[0].feature, "Differentiated Materials");
    assert_eq!(items[0].query["fileName"], "chapter-3.png");
    assert_eq!(items[0].query["gradeLevels"], "3rd, 5th");
    assert!(items[0].query.get("textbookPageDataUri").is_none());
}

#[tokio::test]
async fn oversize_upload_is_rejected_before_the_flow_runs() {
    let client = FakeClient::with_json(json!({"worksheets": []}));
    let mut history = new_store();
    let file = UploadedFile {
        name: "huge.png".to_string(),
        mime_type: "image/png".to_string(),
        bytes: vec![0u8; 64],
    };

    let err = adapter::submit_worksheets(&client, &mut history, &file, "3rd".to_string(), 16)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Media(_)));
    assert_eq!(client.call_count(), 0);
    assert!(history.items().is_empty());
}

#[tokio::test]
async fn knowledge_base_records_history() {
    let client = FakeClient::with_json(json!({
        "explanation": "Think of the sky as a giant prism..."
    }));
    let mut history = new_store();

    let output = adapter::submit_knowledge_base(
        &client,
        &mut history,
        KnowledgeBaseInput {
            question: "Why is the sky blue?".to_string(),
            local_language: "English".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(!output.explanation.is_empty());
    let items = history.items();
    assert_eq!(items[0].feature, "Knowledge Base");
    assert_eq!(items[0].query["localLanguage"], "English");
}

#[tokio::test]
async fn visual_aid_without_media_fails_and_leaves_history_untouched() {
    let client = FakeClient::with_media(None);
    let mut history = new_store();

    let err = adapter::submit_visual_aid(
        &client,
        &mut history,
        VisualAidInput {
            description: "A simple diagram of the water cycle.".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("failed to generate visual aid"));
    assert_eq!(client.call_count(), 1);
    assert!(history.items().is_empty());
}

#[tokio::test]
async fn visual_aid_result_is_redacted_in_history() {
    let client = FakeClient::with_media(Some(GeneratedMedia {
        mime_type: "image/png".to_string(),
        data_uri: "data:image/png;base64,YWJj".to_string(),
    }));
    let mut history = new_store();

    let output = adapter::submit_visual_aid(
        &client,
        &mut history,
        VisualAidInput {
            description: "A simple diagram of the water cycle.".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(output.visual_aid_data_uri, "data:image/png;base64,YWJj");

    let items = history.items();
    assert_eq!(items[0].feature, "Visual Aid");
    assert_eq!(items[0].result["visualAidDataUri"], "...");
}

#[tokio::test]
async fn successive_submissions_order_newest_first_with_unique_ids() {
    let client = FakeClient::with_json(json!({"content": "ok"}));
    let mut history = new_store();

    for topic in ["Rivers", "Mountains", "Deserts"] {
        adapter::submit_local_content(
            &client,
            &mut history,
            LocalContentInput {
                topic: topic.to_string(),
                language: "Hindi".to_string(),
                location: "Delhi, India".to_string(),
            },
        )
        .await
        .unwrap();
    }

    let items = history.items();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].query["topic"], "Deserts");
    assert_eq!(items[2].query["topic"], "Rivers");

    let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}
