/// LLM Client: the single point of entry for all Gemini API calls in Folio.
///
/// ARCHITECTURAL RULE: No other module may call the generative API directly.
/// All model interactions go through `GenerativeModel`; the extractor holds it
/// as `Arc<dyn GenerativeModel>` so tests can swap in a stub.
///
/// Model: gemini-3-pro-preview (hardcoded, not configurable)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const API_VERSION: &str = "v1beta";
/// The model used for document extraction.
pub const MODEL: &str = "gemini-3-pro-preview";

#[derive(Debug, Error)]
pub enum LlmError {
    /// Built with the request URL stripped.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request blocked by the model: {0}")]
    Blocked(String),
}

/// One structured-output request: a document, an instruction and the JSON
/// schema the answer must follow.
#[derive(Debug, Clone, Copy)]
pub struct StructuredRequest<'a> {
    pub mime_type: &'a str,
    /// Standard-alphabet base64 of the document bytes.
    pub data_base64: &'a str,
    pub instruction: &'a str,
    pub schema: &'a Value,
}

/// The seam between Folio and the hosted model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends one request and returns the raw response text (possibly empty).
    /// Never retries.
    async fn generate_structured(&self, request: StructuredRequest<'_>) -> Result<String, LlmError>;

    fn model_id(&self) -> &str;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, trimmed.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    /// Reason the request or the first candidate was refused, if any.
    pub fn block_reason(&self) -> Option<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Some(reason);
        }
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|r| matches!(*r, "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT"))
            .map(String::from)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini REST client. One request per call: no retries, no backoff.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The key travels in the `x-goog-api-key` header, never in the URL.
    fn generate_content_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, API_VERSION, MODEL
        )
    }
}

fn http_error(err: reqwest::Error) -> LlmError {
    LlmError::Http(err.without_url())
}

#[async_trait]
impl GenerativeModel for LlmClient {
    async fn generate_structured(&self, request: StructuredRequest<'_>) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: request.mime_type,
                            data: request.data_base64,
                        }),
                    },
                    Part {
                        text: Some(request.instruction),
                        inline_data: None,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: request.schema,
            },
        };

        let response = self
            .client
            .post(self.generate_content_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}", status);
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await.map_err(http_error)?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw)?;

        if let Some(reason) = parsed.block_reason() {
            return Err(LlmError::Blocked(reason));
        }

        let usage = parsed.usage_metadata.as_ref();
        debug!(
            "Gemini call succeeded: prompt_tokens={}, output_tokens={}",
            usage.map_or(0, |u| u.prompt_token_count),
            usage.map_or(0, |u| u.candidates_token_count)
        );

        Ok(parsed.text())
    }

    fn model_id(&self) -> &str {
        MODEL
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_request_serializes_inline_document_then_instruction() {
        let schema = serde_json::json!({"type": "OBJECT"});
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "application/pdf",
                            data: "JVBERi0=",
                        }),
                    },
                    Part {
                        text: Some("extract"),
                        inline_data: None,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "application/pdf");
        assert!(parts[0].get("text").is_none());
        assert_eq!(parts[1]["text"], "extract");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": " {\"a\":"}, {"text": "1} "}]}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), "{\"a\":1}");
        assert!(response.block_reason().is_none());
    }

    #[test]
    fn test_response_without_candidates_is_empty_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_block_reason_from_prompt_feedback_and_finish_reason() {
        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert_eq!(blocked.block_reason().as_deref(), Some("SAFETY"));

        let recited: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"finishReason": "RECITATION"}]}"#,
        )
        .unwrap();
        assert_eq!(recited.block_reason().as_deref(), Some("RECITATION"));
    }

    #[test]
    fn test_generate_content_url_trims_trailing_slash() {
        let client = LlmClient::new(
            "k".to_string(),
            "https://example.test/".to_string(),
            Duration::from_secs(1),
        );
        assert_eq!(
            client.generate_content_url(),
            format!("https://example.test/v1beta/models/{MODEL}:generateContent")
        );
    }

    #[tokio::test]
    async fn test_transport_error_does_not_carry_api_key() {
        let client = LlmClient::new(
            "SECRET-KEY-123".to_string(),
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(2),
        );
        let schema = serde_json::json!({"type": "OBJECT"});
        let err = client
            .generate_structured(StructuredRequest {
                mime_type: "text/plain",
                data_base64: "aGk=",
                instruction: "extract",
                schema: &schema,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Http(_)), "expected a transport error, got {err:?}");
        assert!(!err.to_string().contains("SECRET-KEY-123"), "key leaked: {err}");
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"), "key leaked in debug: {err:?}");
    }
}
