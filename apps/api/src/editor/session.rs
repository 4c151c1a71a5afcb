use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::defaults::sample_resume;
use crate::models::{CareerFocus, ResumeData, ResumeStyle};

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Upload,
    Editor,
}

/// Everything one user is editing. Records are only ever replaced whole.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSession {
    pub id: Uuid,
    pub view: View,
    pub career_focus: CareerFocus,
    pub data: ResumeData,
    pub style: ResumeStyle,
    pub is_processing: bool,
    /// Cosmetic, 0–100.
    pub progress: f32,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EditorSession {
    pub fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            view: View::Upload,
            career_focus: CareerFocus::default(),
            data: sample_resume(),
            style: ResumeStyle::default(),
            is_processing: false,
            progress: 0.0,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn replace_data(&mut self, data: ResumeData) {
        self.data = data;
        self.touch();
    }

    pub fn replace_style(&mut self, style: ResumeStyle) {
        self.style = style;
        self.touch();
    }

    pub fn set_career_focus(&mut self, focus: CareerFocus) {
        self.career_focus = focus;
        self.touch();
    }

    /// Blank record, straight to the editor.
    pub fn start_manually(&mut self) {
        self.data = ResumeData::empty();
        self.view = View::Editor;
        self.error = None;
        self.touch();
    }

    /// Back to the upload screen with the sample record.
    pub fn start_over(&mut self) {
        self.data = sample_resume();
        self.view = View::Upload;
        self.error = None;
        self.progress = 0.0;
        self.is_processing = false;
        self.touch();
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
        self.touch();
    }

    pub fn begin_processing(&mut self) {
        self.is_processing = true;
        self.error = None;
        self.progress = 0.0;
        self.touch();
    }

    pub fn finish_extraction(&mut self, data: ResumeData) {
        self.data = data;
        self.view = View::Editor;
        self.is_processing = false;
        self.progress = 100.0;
        self.touch();
    }

    /// Stores the single user-facing message. `data` is left as it was.
    pub fn fail_extraction(&mut self, message: String) {
        self.error = Some(message);
        self.is_processing = false;
        self.progress = 0.0;
        self.touch();
    }
}
