//! Upload → extract → replace.
//!
//! Validation runs first; a rejected file never reaches the extractor and
//! never touches the session. Once extraction starts the session is marked
//! processing and a progress ticker runs until the single call returns.
//! No lock is held while the call is in flight. If the request is dropped
//! mid-call, the session is still taken out of the processing state.

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::editor::progress::ProgressTicker;
use crate::editor::session::EditorSession;
use crate::editor::store::SessionStore;
use crate::extraction::{DocumentExtractor, UploadError, UploadedDocument};
use crate::models::CareerFocus;

/// Shown when the request went away before the extraction finished.
pub const INTERRUPTED_MESSAGE: &str = "The upload was interrupted before the document was analyzed.";

/// Marks the session failed if dropped while still armed. Dropping happens
/// when the handler future is cancelled, so the reset runs on a spawned task.
struct InFlight {
    store: SessionStore,
    session_id: Uuid,
    armed: bool,
}

impl InFlight {
    fn new(store: &SessionStore, session_id: Uuid) -> Self {
        Self {
            store: store.clone(),
            session_id,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let store = self.store.clone();
        let session_id = self.session_id;
        warn!("Session {session_id}: upload cancelled mid-extraction");
        runtime.spawn(async move {
            store
                .update(session_id, |s| {
                    if s.is_processing {
                        s.fail_extraction(INTERRUPTED_MESSAGE.to_string());
                    }
                })
                .await;
        });
    }
}

/// A raw upload as received from the client.
#[derive(Debug, Clone)]
pub struct UploadInput {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
    /// Overrides the session's stored focus when present.
    pub career_focus: Option<CareerFocus>,
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Session {0} not found")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The message already stored on the session.
    #[error("{0}")]
    Extraction(String),
}

pub async fn process_upload(
    store: &SessionStore,
    extractor: &dyn DocumentExtractor,
    session_id: Uuid,
    input: UploadInput,
    max_bytes: usize,
) -> Result<EditorSession, FlowError> {
    let document = UploadedDocument::new(
        &input.file_name,
        input.content_type.as_deref(),
        input.bytes,
        max_bytes,
    )?;

    let focus = store
        .update(session_id, |s| {
            if let Some(focus) = input.career_focus {
                s.career_focus = focus;
            }
            s.begin_processing();
            s.career_focus
        })
        .await
        .ok_or(FlowError::SessionNotFound(session_id))?;

    info!(
        "Session {session_id}: processing '{}' [focus={focus}]",
        document.file_name
    );

    let mut in_flight = InFlight::new(store, session_id);
    let ticker = ProgressTicker::start(store.clone(), session_id);
    let result = extractor.extract(&document, focus).await;
    drop(ticker);
    in_flight.disarm();

    let outcome = store
        .update(session_id, |s| match result {
            Ok(data) => {
                s.finish_extraction(data);
                Ok(s.clone())
            }
            Err(e) => {
                let message = e.to_string();
                s.fail_extraction(message.clone());
                Err(message)
            }
        })
        .await
        .ok_or(FlowError::SessionNotFound(session_id))?;

    match outcome {
        Ok(session) => {
            info!(
                "Session {session_id}: loaded {} experience entries",
                session.data.experience.len()
            );
            Ok(session)
        }
        Err(message) => {
            warn!("Session {session_id}: extraction failed: {message}");
            Err(FlowError::Extraction(message))
        }
    }
}
