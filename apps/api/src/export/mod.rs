// PDF export: compose → paginate → render.
// Runs in-process and once per request; there is no retry.

pub mod blocks;
pub mod encoding;
pub mod font_metrics;
pub mod handlers;
pub mod paginate;
pub mod pdf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::export::encoding::fold_to_ascii;
use crate::export::pdf::{render_pdf, PageSpec};
use crate::models::{ResumeData, ResumeStyle};

pub const SCALE_RANGE: (f32, f32) = (0.5, 2.0);
pub const DEFAULT_MARGIN_PT: f32 = 36.0;
/// The content area must keep at least this much width and height.
const MIN_CONTENT_PT: f32 = 144.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export options: {0}")]
    InvalidOptions(String),

    #[error("PDF rendering failed: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

/// Knobs for one export. Missing fields take their defaults, so this can be
/// read straight from a query string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    pub page_size: PageSize,
    pub margin_pt: f32,
    /// Multiplies every font size and spacing.
    pub scale: f32,
    /// Document title metadata. Defaults to the file name without extension.
    pub title: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_pt: DEFAULT_MARGIN_PT,
            scale: 1.0,
            title: None,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), ExportError> {
        let (min, max) = SCALE_RANGE;
        if !self.scale.is_finite() || self.scale < min || self.scale > max {
            return Err(ExportError::InvalidOptions(format!(
                "scale must be between {min} and {max}, got {}",
                self.scale
            )));
        }
        let (w, h) = self.page_size.dimensions_pt();
        if !self.margin_pt.is_finite()
            || self.margin_pt < 0.0
            || w - 2.0 * self.margin_pt < MIN_CONTENT_PT
            || h - 2.0 * self.margin_pt < MIN_CONTENT_PT
        {
            return Err(ExportError::InvalidOptions(format!(
                "margin of {}pt leaves no room for content",
                self.margin_pt
            )));
        }
        Ok(())
    }
}

/// `Full_Name_Professional_Resume.pdf`; `Resume_Professional_Resume.pdf` when
/// the name is blank. Only ASCII letters, digits, `-`, `.` and `_` survive.
pub fn export_filename(full_name: &str) -> String {
    let folded = fold_to_ascii(full_name);
    let stem = folded
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    let stem = if stem.is_empty() { "Resume".to_string() } else { stem };
    format!("{stem}_Professional_Resume.pdf")
}

/// Renders the record as a PDF with the style's font, sizes, spacing,
/// accent colour and layout.
pub fn export_pdf(
    data: &ResumeData,
    style: &ResumeStyle,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    options.validate()?;

    let (width_pt, height_pt) = options.page_size.dimensions_pt();
    let content_width = width_pt - 2.0 * options.margin_pt;
    let columns = blocks::compose(data, style, content_width, options.scale);

    let default_title = export_filename(&data.personal_info.full_name);
    let title = options
        .title
        .as_deref()
        .map(fold_to_ascii)
        .unwrap_or_else(|| default_title.trim_end_matches(".pdf").to_string());

    let spec = PageSpec {
        title: &title,
        width_pt,
        height_pt,
        margin_pt: options.margin_pt,
        font: style.font,
        accent: &style.accent_color,
    };
    let bytes = render_pdf(&columns, &spec);
    if bytes.is_empty() {
        return Err(ExportError::Render("renderer produced no output".to_string()));
    }

    info!(
        "Exported PDF: {} bytes, {:?}, layout {:?}, scale {}",
        bytes.len(),
        options.page_size,
        style.layout,
        options.scale
    );
    Ok(bytes)
}
