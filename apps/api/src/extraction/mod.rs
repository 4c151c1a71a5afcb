// Document extraction: upload validation, the structured AI call, and
// normalization of the answer into `ResumeData`.
// All network traffic goes through llm_client.

pub mod adapter;
pub mod normalize;
pub mod prompts;
pub mod schema;
pub mod upload;

use std::sync::Arc;

use async_trait::async_trait;

use crate::llm_client::GenerativeModel;
use crate::models::{CareerFocus, ResumeData};

pub use adapter::ExtractionError;
pub use upload::{UploadError, UploadedDocument};

/// Turns an uploaded document into a resume record.
///
/// Carried in `AppState` as `Arc<dyn DocumentExtractor>` so handlers and the
/// upload flow never depend on a concrete backend.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(
        &self,
        document: &UploadedDocument,
        focus: CareerFocus,
    ) -> Result<ResumeData, ExtractionError>;
}

/// Default extractor: one structured call to a generative model.
pub struct ModelExtractor {
    model: Arc<dyn GenerativeModel>,
}

impl ModelExtractor {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl DocumentExtractor for ModelExtractor {
    async fn extract(
        &self,
        document: &UploadedDocument,
        focus: CareerFocus,
    ) -> Result<ResumeData, ExtractionError> {
        adapter::extract_resume(self.model.as_ref(), document, focus).await
    }
}


#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::adapter::test_support::StubModel;
    use super::*;

    #[tokio::test]
    async fn test_model_extractor_delegates_to_adapter() {
        let model = Arc::new(StubModel::replying(
            r#"{"experience": [{"company": "Acme"}, {"company": "Globex"}]}"#,
        ));
        let extractor = ModelExtractor::new(model.clone());
        let doc = UploadedDocument::new("cv.pdf", None, Bytes::from_static(b"%PDF-1.4"), 1024)
            .unwrap();

        let data = extractor.extract(&doc, CareerFocus::Developer).await.unwrap();
        assert_eq!(data.experience.len(), 2);
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_service_message_hides_api_key() {
        let client = crate::llm_client::LlmClient::new(
            "SECRET-KEY-123".to_string(),
            "http://127.0.0.1:9".to_string(),
            std::time::Duration::from_secs(2),
        );
        let extractor = ModelExtractor::new(Arc::new(client));
        let doc = UploadedDocument::new("cv.txt", None, Bytes::from_static(b"Kim"), 1024).unwrap();

        let err = extractor.extract(&doc, CareerFocus::General).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Service(_)), "got {err:?}");
        let message = err.to_string();
        assert!(!message.contains("SECRET-KEY-123"), "key reached the user: {message}");
        assert!(!message.contains("127.0.0.1"), "endpoint reached the user: {message}");
    }
}
