//! Extraction adapter: uploaded document in, `ResumeData` out.
//!
//! Flow: base64-encode → one structured `generateContent` call →
//!       parse JSON → back-fill ids.
//!
//! One attempt only. Any failure collapses into a single user-facing
//! `ExtractionError`; nothing from a failed call is kept.

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use thiserror::Error;
use tracing::{info, warn};

use crate::extraction::normalize::parse_resume_response;
use crate::extraction::prompts::build_extraction_prompt;
use crate::extraction::schema::resume_response_schema;
use crate::extraction::upload::UploadedDocument;
use crate::llm_client::{GenerativeModel, LlmError, StructuredRequest};
use crate::models::{CareerFocus, ResumeData};

/// Why an extraction failed. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read the uploaded file.")]
    FileRead,

    /// Details stay in the logs; the message is fixed.
    #[error("The AI service could not analyze this document. Please try again later.")]
    Service(#[source] LlmError),

    #[error("Failed to parse extracted resume data.")]
    Malformed(#[source] serde_json::Error),
}

/// Runs one extraction against `model`.
pub async fn extract_resume(
    model: &dyn GenerativeModel,
    document: &UploadedDocument,
    focus: CareerFocus,
) -> Result<ResumeData, ExtractionError> {
    if document.bytes.is_empty() {
        return Err(ExtractionError::FileRead);
    }

    let data_base64 = BASE64_STD.encode(&document.bytes);
    let instruction = build_extraction_prompt(focus);
    let schema = resume_response_schema();

    info!(
        "Extracting '{}' ({} bytes, {}) with {} [focus={}]",
        document.file_name,
        document.bytes.len(),
        document.mime_type,
        model.model_id(),
        focus
    );

    let text = model
        .generate_structured(StructuredRequest {
            mime_type: &document.mime_type,
            data_base64: &data_base64,
            instruction: &instruction,
            schema: &schema,
        })
        .await
        .map_err(|e| {
            warn!("Extraction call to {} failed: {e}", model.model_id());
            ExtractionError::Service(e)
        })?;

    let data = parse_resume_response(&text).map_err(|e| {
        warn!("Extraction returned malformed JSON: {e}");
        ExtractionError::Malformed(e)
    })?;

    info!(
        "Extracted {} experience, {} education, {} skill, {} project entries",
        data.experience.len(),
        data.education.len(),
        data.skills.len(),
        data.projects.len()
    );
    Ok(data)
}


#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::test_support::StubModel;
    use super::*;

    fn doc(name: &str, body: &'static [u8]) -> UploadedDocument {
        UploadedDocument::new(name, None, Bytes::from_static(body), 1024).unwrap()
    }

    #[tokio::test]
    async fn test_sends_base64_payload_and_focus_prompt() {
        let model = StubModel::replying(r#"{"personalInfo": {"fullName": "Kim"}}"#);
        let data = extract_resume(&model, &doc("cv.txt", b"hello"), CareerFocus::Data)
            .await
            .unwrap();

        assert_eq!(data.personal_info.full_name, "Kim");
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.last_payload.lock().unwrap().as_deref(), Some("aGVsbG8="));
        assert_eq!(model.last_mime.lock().unwrap().as_deref(), Some("text/plain"));
        let instruction = model.last_instruction.lock().unwrap().clone().unwrap();
        assert!(instruction.contains("data roles"));
    }

    #[tokio::test]
    async fn test_malformed_reply_is_single_parse_error() {
        let model = StubModel::replying("I could not find a resume here.");
        let err = extract_resume(&model, &doc("cv.pdf", b"%PDF"), CareerFocus::General)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
        assert_eq!(err.to_string(), "Failed to parse extracted resume data.");
        assert_eq!(model.call_count(), 1, "no retry after a parse failure");
    }

    #[tokio::test]
    async fn test_service_failure_is_not_retried() {
        let model = StubModel::failing(503, "overloaded");
        let err = extract_resume(&model, &doc("cv.pdf", b"%PDF"), CareerFocus::General)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Service(LlmError::Api { status: 503, .. })));
        assert!(!err.to_string().contains("overloaded"), "service detail reached the user: {err}");
        assert_eq!(model.call_count(), 1);
    }
}
