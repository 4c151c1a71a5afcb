use serde::{Deserialize, Serialize};

/// Typeface choice. Serialized under the display family name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResumeFont {
    #[serde(rename = "Inter", alias = "sans")]
    Sans,
    #[serde(rename = "Libre Baskerville", alias = "serif")]
    Serif,
    #[serde(rename = "Roboto Mono", alias = "mono")]
    Mono,
}

impl ResumeFont {
    pub const ALL: [ResumeFont; 3] = [ResumeFont::Sans, ResumeFont::Serif, ResumeFont::Mono];

    /// CSS `font-family` stack with a generic fallback.
    pub fn css_stack(&self) -> &'static str {
        match self {
            ResumeFont::Sans => "'Inter', 'Helvetica Neue', Arial, sans-serif",
            ResumeFont::Serif => "'Libre Baskerville', Georgia, 'Times New Roman', serif",
            ResumeFont::Mono => "'Roboto Mono', 'Courier New', monospace",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResumeFont::Sans => "Sans-Serif",
            ResumeFont::Serif => "Elegant Serif",
            ResumeFont::Mono => "Technical Mono",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

/// Pixel sizes for one size tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontScale {
    pub base: f32,
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn scale(&self) -> FontScale {
        match self {
            FontSize::Small => FontScale { base: 10.0, h1: 20.0, h2: 13.0, h3: 12.0 },
            FontSize::Medium => FontScale { base: 12.0, h1: 24.0, h2: 16.0, h3: 14.0 },
            FontSize::Large => FontScale { base: 14.0, h1: 30.0, h2: 18.0, h3: 16.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeLayout {
    Standard,
    Sidebar,
    Minimal,
}

impl ResumeLayout {
    pub const ALL: [ResumeLayout; 3] = [
        ResumeLayout::Standard,
        ResumeLayout::Sidebar,
        ResumeLayout::Minimal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResumeLayout::Standard => "Classic Corporate",
            ResumeLayout::Sidebar => "Modern Executive",
            ResumeLayout::Minimal => "Tech Minimalist",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ResumeLayout::Standard => "Single column, clean hierarchy.",
            ResumeLayout::Sidebar => "Information sidebar for skills & awards.",
            ResumeLayout::Minimal => "Focus on pure content and spacing.",
        }
    }
}

pub const LINE_SPACING_RANGE: (f32, f32) = (1.0, 2.0);
pub const SECTION_SPACING_RANGE: (f32, f32) = (0.5, 3.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeStyle {
    pub font: ResumeFont,
    pub font_size: FontSize,
    /// Unitless CSS line-height.
    pub line_spacing: f32,
    /// Gap after each section, in rem.
    pub section_spacing: f32,
    pub layout: ResumeLayout,
    /// `#rgb` or `#rrggbb`.
    pub accent_color: String,
}

impl Default for ResumeStyle {
    fn default() -> Self {
        Self {
            font: ResumeFont::Sans,
            font_size: FontSize::Medium,
            line_spacing: 1.4,
            section_spacing: 1.2,
            layout: ResumeLayout::Sidebar,
            accent_color: "#1a1a1a".to_string(),
        }
    }
}

/// Snaps a line-spacing value onto the 1.0–2.0 slider (0.1 steps).
pub fn snap_line_spacing(value: f32) -> f32 {
    snap(value, LINE_SPACING_RANGE, 0.1)
}

/// Snaps a section-spacing value onto the 0.5–3.0 slider (0.5 steps).
pub fn snap_section_spacing(value: f32) -> f32 {
    snap(value, SECTION_SPACING_RANGE, 0.5)
}

fn snap(value: f32, (min, max): (f32, f32), step: f32) -> f32 {
    if !value.is_finite() {
        return min;
    }
    let clamped = value.clamp(min, max);
    let steps = ((clamped - min) / step).round();
    // Round away float noise so 1.4 stays 1.4 on the wire.
    (((min + steps * step) * 100.0).round() / 100.0).clamp(min, max)
}

/// Accepts `#rgb` / `#rrggbb` (case-insensitive) and returns it lowercased.
pub fn parse_accent_color(input: &str) -> Option<String> {
    let hex = input.trim().strip_prefix('#')?;
    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{}", hex.to_ascii_lowercase()))
}

/// Converts a validated accent colour into 0.0–1.0 RGB components.
/// Falls back to near-black for anything unparseable.
pub fn accent_rgb(color: &str) -> [f32; 3] {
    let Some(normalized) = parse_accent_color(color) else {
        return [0.1, 0.1, 0.1];
    };
    let hex = &normalized[1..];
    let expanded: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16).map_or(0.0, |v| v as f32 / 255.0)
    };
    [channel(0), channel(2), channel(4)]
}
