//! Style record → concrete CSS values.
//!
//! Every value here ends up unescaped inside a `<style>` block, so each one
//! is either drawn from a closed set or re-validated.

use crate::models::style::{parse_accent_color, snap_line_spacing, snap_section_spacing};
use crate::models::{ResumeLayout, ResumeStyle};

const FALLBACK_ACCENT: &str = "#1a1a1a";

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub font_stack: &'static str,
    pub base_px: f32,
    pub h1_px: f32,
    pub h2_px: f32,
    pub h3_px: f32,
    pub line_height: f32,
    pub section_gap_rem: f32,
    pub accent: String,
    pub layout: &'static str,
}

impl Theme {
    pub fn from_style(style: &ResumeStyle) -> Self {
        let scale = style.font_size.scale();
        Self {
            font_stack: style.font.css_stack(),
            base_px: scale.base,
            h1_px: scale.h1,
            h2_px: scale.h2,
            h3_px: scale.h3,
            line_height: snap_line_spacing(style.line_spacing),
            section_gap_rem: snap_section_spacing(style.section_spacing),
            accent: parse_accent_color(&style.accent_color)
                .unwrap_or_else(|| FALLBACK_ACCENT.to_string()),
            layout: layout_class(style.layout),
        }
    }
}

pub fn layout_class(layout: ResumeLayout) -> &'static str {
    match layout {
        ResumeLayout::Standard => "standard",
        ResumeLayout::Sidebar => "sidebar",
        ResumeLayout::Minimal => "minimal",
    }
}
