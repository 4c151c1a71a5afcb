//! Lays a resume out into measured lines grouped in blocks.
//!
//! A block is the unit of pagination: an experience entry, a heading plus the
//! first entry under it, a whole short section. Geometry is in points with
//! the origin at the top-left of the column.

use crate::export::encoding::fold_to_ascii;
use crate::export::font_metrics::{table_for, FontMetricTable};
use crate::models::{ResumeData, ResumeLayout, ResumeStyle};
use crate::preview::view::ResumeView;

/// CSS px → PDF pt.
const PX_TO_PT: f32 = 0.75;
/// 1rem at the browser default root size, in points.
const REM_PT: f32 = 12.0;
/// Share of the content width given to the sidebar column.
const SIDEBAR_SHARE: f32 = 0.34;
const GUTTER_PT: f32 = 20.0;
const ENTRY_GAP_PT: f32 = 8.0;
const BULLET_INDENT_PT: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Heading,
    Body,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub face: Face,
    pub size_pt: f32,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Text {
        left: Run,
        /// Right-aligned on the same baseline (dates, locations).
        right: Option<Run>,
        indent_pt: f32,
        bullet: bool,
    },
    Rule {
        thickness_pt: f32,
        tone: Tone,
    },
    Space,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub kind: LineKind,
    pub height_pt: f32,
}

impl Line {
    pub fn space(height_pt: f32) -> Self {
        Self {
            kind: LineKind::Space,
            height_pt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub lines: Vec<Line>,
    /// Move the whole block to a fresh page instead of splitting it,
    /// as long as it fits on one page.
    pub keep_together: bool,
}

impl Block {
    pub fn height(&self) -> f32 {
        self.lines.iter().map(|l| l.height_pt).sum()
    }
}

/// One vertical flow of blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Offset from the left content edge.
    pub x_pt: f32,
    pub width_pt: f32,
    pub blocks: Vec<Block>,
    /// Paint the column background on every page (the sidebar panel).
    pub shaded: bool,
}

/// Point sizes derived from the style at a given export scale.
#[derive(Debug, Clone, Copy)]
struct Sizes {
    base: f32,
    h1: f32,
    h2: f32,
    h3: f32,
    small: f32,
}

#[derive(Clone, Copy)]
struct Composer {
    metrics: &'static FontMetricTable,
    sizes: Sizes,
    line_spacing: f32,
    width_pt: f32,
    section_gap_pt: f32,
    scale: f32,
    layout: ResumeLayout,
}

impl Composer {
    fn new(style: &ResumeStyle, width_pt: f32, scale: f32) -> Self {
        let px = style.font_size.scale();
        let pt = |v: f32| v * PX_TO_PT * scale;
        Self {
            metrics: table_for(style.font),
            sizes: Sizes {
                base: pt(px.base),
                h1: pt(px.h1),
                h2: pt(px.h2),
                h3: pt(px.h3),
                small: pt(px.base) * 0.85,
            },
            line_spacing: style.line_spacing.clamp(1.0, 2.0),
            width_pt,
            section_gap_pt: style.section_spacing.clamp(0.5, 3.0) * REM_PT * scale,
            scale,
            layout: style.layout,
        }
    }

    fn with_width(&self, width_pt: f32) -> Composer {
        Composer {
            width_pt,
            ..*self
        }
    }

    fn run(&self, text: &str, face: Face, size_pt: f32, tone: Tone) -> Run {
        Run {
            text: fold_to_ascii(text.trim()),
            face,
            size_pt,
            tone,
        }
    }

    fn line_height(&self, size_pt: f32) -> f32 {
        size_pt * self.line_spacing
    }

    /// Wrapped paragraph, one line per output line.
    fn paragraph(&self, text: &str, face: Face, size_pt: f32, tone: Tone, indent_pt: f32) -> Vec<Line> {
        self.wrapped(text, face, size_pt, tone, indent_pt, false)
    }

    fn bullet(&self, text: &str, size_pt: f32) -> Vec<Line> {
        self.wrapped(text, Face::Regular, size_pt, Tone::Body, BULLET_INDENT_PT * self.scale, true)
    }

    fn wrapped(
        &self,
        text: &str,
        face: Face,
        size_pt: f32,
        tone: Tone,
        indent_pt: f32,
        bullet: bool,
    ) -> Vec<Line> {
        let folded = fold_to_ascii(text);
        let bold = face == Face::Bold;
        self.metrics
            .wrap(&folded, size_pt, bold, (self.width_pt - indent_pt).max(size_pt))
            .into_iter()
            .enumerate()
            .map(|(i, text)| Line {
                kind: LineKind::Text {
                    left: Run {
                        text,
                        face,
                        size_pt,
                        tone,
                    },
                    right: None,
                    indent_pt,
                    bullet: bullet && i == 0,
                },
                height_pt: self.line_height(size_pt),
            })
            .collect()
    }

    /// Left text with a right-aligned companion. The left side wraps in the
    /// space the right side leaves; the right side sits on the first line.
    fn row(&self, left: Run, right: Option<Run>) -> Vec<Line> {
        let right = right.filter(|r| !r.text.is_empty());
        let reserved = right
            .as_ref()
            .map(|r| self.metrics.width_pt(&r.text, r.size_pt, r.face == Face::Bold) + 8.0)
            .unwrap_or(0.0);
        let height = self.line_height(left.size_pt.max(right.as_ref().map_or(0.0, |r| r.size_pt)));
        let bold = left.face == Face::Bold;
        let mut pieces = self
            .metrics
            .wrap(&left.text, left.size_pt, bold, (self.width_pt - reserved).max(left.size_pt));
        if pieces.is_empty() {
            if right.is_none() {
                return Vec::new();
            }
            pieces.push(String::new());
        }
        let mut right = right;
        pieces
            .into_iter()
            .map(|text| Line {
                kind: LineKind::Text {
                    left: Run {
                        text,
                        ..left.clone()
                    },
                    right: right.take(),
                    indent_pt: 0.0,
                    bullet: false,
                },
                height_pt: height,
            })
            .collect()
    }

    fn heading(&self, title: &str) -> Vec<Line> {
        let mut lines = Vec::new();
        match self.layout {
            ResumeLayout::Minimal => {
                lines.extend(self.paragraph(&title.to_uppercase(), Face::Bold, self.sizes.h3, Tone::Heading, 0.0));
                lines.push(Line::space(4.0 * self.scale));
            }
            _ => {
                lines.extend(self.paragraph(&title.to_uppercase(), Face::Bold, self.sizes.h2, Tone::Accent, 0.0));
                lines.push(Line {
                    kind: LineKind::Rule {
                        thickness_pt: 1.2 * self.scale,
                        tone: Tone::Accent,
                    },
                    height_pt: 8.0 * self.scale,
                });
            }
        }
        lines
    }

    fn side_heading(&self, title: &str) -> Vec<Line> {
        let mut lines =
            self.paragraph(&title.to_uppercase(), Face::Bold, self.sizes.small, Tone::Accent, 0.0);
        lines.push(Line {
            kind: LineKind::Rule {
                thickness_pt: 0.6 * self.scale,
                tone: Tone::Accent,
            },
            height_pt: 8.0 * self.scale,
        });
        lines
    }

    /// Heading glued to the first entry so it never ends a page alone.
    fn section(&self, heading: Vec<Line>, entries: Vec<Vec<Line>>, whole: bool) -> Vec<Block> {
        let mut blocks = Vec::new();
        if whole {
            let mut lines = heading;
            for entry in entries {
                lines.extend(entry);
            }
            blocks.push(Block {
                lines,
                keep_together: true,
            });
        } else {
            let mut pending = Some(heading);
            for entry in entries {
                let mut lines = pending.take().unwrap_or_default();
                lines.extend(entry);
                blocks.push(Block {
                    lines,
                    keep_together: true,
                });
            }
            if let Some(heading) = pending {
                blocks.push(Block {
                    lines: heading,
                    keep_together: true,
                });
            }
        }
        if let Some(last) = blocks.last_mut() {
            last.lines.push(Line::space(self.section_gap_pt));
        }
        blocks
    }

    fn entry_gap(&self) -> Line {
        Line::space(ENTRY_GAP_PT * self.scale)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section builders
// ────────────────────────────────────────────────────────────────────────────

fn header(c: &Composer, view: &ResumeView, accent_name: bool) -> Block {
    let name_tone = if accent_name { Tone::Accent } else { Tone::Heading };
    let mut lines = c.paragraph(&view.full_name, Face::Bold, c.sizes.h1, name_tone, 0.0);
    let contacts: Vec<&str> = view.contacts.iter().map(|ct| ct.value.as_str()).collect();
    if !contacts.is_empty() {
        lines.extend(c.paragraph(&contacts.join("  |  "), Face::Regular, c.sizes.small, Tone::Muted, 0.0));
    }
    if c.layout == ResumeLayout::Standard {
        lines.push(Line::space(6.0 * c.scale));
        lines.push(Line {
            kind: LineKind::Rule {
                thickness_pt: 0.5 * c.scale,
                tone: Tone::Muted,
            },
            height_pt: 6.0 * c.scale,
        });
    }
    lines.push(Line::space(c.section_gap_pt));
    Block {
        lines,
        keep_together: true,
    }
}

fn summary(c: &Composer, view: &ResumeView, title: &str) -> Vec<Block> {
    if view.summary.is_empty() {
        return Vec::new();
    }
    let body = c.paragraph(&view.summary, Face::Regular, c.sizes.base, Tone::Body, 0.0);
    c.section(c.heading(title), vec![body], true)
}

fn experience(c: &Composer, view: &ResumeView, title: &str, with_location: bool) -> Vec<Block> {
    if view.experience.is_empty() {
        return Vec::new();
    }
    let entries = view
        .experience
        .iter()
        .map(|x| {
            let mut lines = c.row(
                c.run(&x.position, Face::Bold, c.sizes.h3, Tone::Accent),
                Some(c.run(&x.dates, Face::Regular, c.sizes.small, Tone::Muted)),
            );
            let location = if with_location {
                Some(c.run(&x.location, Face::Regular, c.sizes.small, Tone::Muted))
            } else {
                None
            };
            lines.extend(c.row(c.run(&x.company, Face::Bold, c.sizes.base, Tone::Body), location));
            for bullet in &x.bullets {
                lines.extend(c.bullet(bullet, c.sizes.base));
            }
            lines.push(c.entry_gap());
            lines
        })
        .collect();
    c.section(c.heading(title), entries, false)
}

fn education(c: &Composer, view: &ResumeView) -> Vec<Block> {
    if view.education.is_empty() {
        return Vec::new();
    }
    let entries = view
        .education
        .iter()
        .map(|e| {
            let mut lines = c.row(
                c.run(&e.institution, Face::Bold, c.sizes.h3, Tone::Heading),
                Some(c.run(&e.dates, Face::Regular, c.sizes.small, Tone::Muted)),
            );
            lines.extend(c.row(
                c.run(&e.degree, Face::Italic, c.sizes.base, Tone::Body),
                Some(c.run(&e.location, Face::Regular, c.sizes.small, Tone::Muted)),
            ));
            if !e.description.is_empty() {
                lines.extend(c.paragraph(&e.description, Face::Regular, c.sizes.base, Tone::Body, 0.0));
            }
            lines.push(c.entry_gap());
            lines
        })
        .collect();
    c.section(c.heading("Education"), entries, false)
}

fn skills(c: &Composer, view: &ResumeView) -> Vec<Block> {
    if view.skills.is_empty() {
        return Vec::new();
    }
    let entries = view
        .skills
        .iter()
        .map(|s| {
            let text = format!("{}: {}", s.category.trim(), s.items);
            c.paragraph(&text, Face::Regular, c.sizes.base, Tone::Body, 0.0)
        })
        .collect();
    c.section(c.heading("Skills"), entries, true)
}

fn projects(c: &Composer, view: &ResumeView) -> Vec<Block> {
    if view.projects.is_empty() {
        return Vec::new();
    }
    let entries = view
        .projects
        .iter()
        .map(|p| {
            let mut lines = c.row(
                c.run(&p.name, Face::Bold, c.sizes.h3, Tone::Heading),
                Some(c.run(&p.link, Face::Regular, c.sizes.small, Tone::Accent)),
            );
            lines.extend(c.paragraph(&p.description, Face::Regular, c.sizes.base, Tone::Body, 0.0));
            lines.push(c.entry_gap());
            lines
        })
        .collect();
    c.section(c.heading("Projects"), entries, false)
}

fn bullet_list(c: &Composer, heading: Vec<Line>, items: &[String], size_pt: f32) -> Vec<Block> {
    if items.is_empty() {
        return Vec::new();
    }
    let body = items.iter().flat_map(|i| c.bullet(i, size_pt)).collect();
    c.section(heading, vec![body], true)
}

// ────────────────────────────────────────────────────────────────────────────
// Layouts
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the record for a content area `content_width_pt` wide.
/// Returns one column for single-column layouts, two for the sidebar.
pub fn compose(
    data: &ResumeData,
    style: &ResumeStyle,
    content_width_pt: f32,
    scale: f32,
) -> Vec<Column> {
    let view = ResumeView::from_data(data);
    match style.layout {
        ResumeLayout::Sidebar => compose_sidebar(&view, style, content_width_pt, scale),
        ResumeLayout::Standard | ResumeLayout::Minimal => {
            let c = Composer::new(style, content_width_pt, scale);
            let minimal = style.layout == ResumeLayout::Minimal;
            let mut blocks = vec![header(&c, &view, !minimal)];
            blocks.extend(summary(&c, &view, if minimal { "Summary" } else { "Professional Summary" }));
            blocks.extend(experience(&c, &view, "Experience", true));
            blocks.extend(education(&c, &view));
            blocks.extend(skills(&c, &view));
            blocks.extend(projects(&c, &view));
            blocks.extend(bullet_list(&c, c.heading("Certifications"), &view.certifications, c.sizes.base));
            blocks.extend(bullet_list(&c, c.heading("Awards"), &view.awards, c.sizes.base));
            vec![Column {
                x_pt: 0.0,
                width_pt: content_width_pt,
                blocks,
                shaded: false,
            }]
        }
    }
}

fn compose_sidebar(view: &ResumeView, style: &ResumeStyle, content_width_pt: f32, scale: f32) -> Vec<Column> {
    let side_width = content_width_pt * SIDEBAR_SHARE;
    let main_width = content_width_pt - side_width - GUTTER_PT * scale;
    let base = Composer::new(style, side_width, scale);
    let side = base.with_width(side_width);
    let main = base.with_width(main_width);

    // Side column: identity, skills, certifications, education.
    let mut side_blocks = Vec::new();
    let mut identity = side.paragraph(&view.full_name, Face::Bold, side.sizes.h2 * 1.2, Tone::Accent, 0.0);
    identity.push(Line::space(6.0 * scale));
    for contact in &view.contacts {
        identity.extend(side.paragraph(&contact.label.to_uppercase(), Face::Bold, side.sizes.small * 0.9, Tone::Heading, 0.0));
        identity.extend(side.paragraph(&contact.value, Face::Regular, side.sizes.small, Tone::Muted, 0.0));
        identity.push(Line::space(3.0 * scale));
    }
    identity.push(Line::space(side.section_gap_pt));
    side_blocks.push(Block {
        lines: identity,
        keep_together: true,
    });

    if !view.skills.is_empty() {
        let entries = view
            .skills
            .iter()
            .map(|s| {
                let mut lines = side.paragraph(&s.category, Face::Bold, side.sizes.small, Tone::Heading, 0.0);
                lines.extend(side.paragraph(&s.items, Face::Regular, side.sizes.small, Tone::Muted, 0.0));
                lines.push(Line::space(4.0 * scale));
                lines
            })
            .collect();
        side_blocks.extend(side.section(side.side_heading("Skills"), entries, true));
    }
    side_blocks.extend(bullet_list(
        &side,
        side.side_heading("Certifications"),
        &view.certifications,
        side.sizes.small,
    ));
    if !view.education.is_empty() {
        let entries = view
            .education
            .iter()
            .map(|e| {
                let mut lines = side.paragraph(&e.institution, Face::Bold, side.sizes.small, Tone::Heading, 0.0);
                lines.extend(side.paragraph(&e.degree, Face::Italic, side.sizes.small, Tone::Body, 0.0));
                lines.extend(side.paragraph(&e.dates, Face::Regular, side.sizes.small * 0.9, Tone::Muted, 0.0));
                lines.push(Line::space(4.0 * scale));
                lines
            })
            .collect();
        side_blocks.extend(side.section(side.side_heading("Education"), entries, true));
    }

    // Main column: profile, experience, projects, awards.
    let mut main_blocks = Vec::new();
    main_blocks.extend(summary(&main, view, "Profile"));
    main_blocks.extend(experience(&main, view, "Professional Experience", false));
    main_blocks.extend(projects(&main, view));
    main_blocks.extend(bullet_list(&main, main.heading("Honors & Awards"), &view.awards, main.sizes.base));

    vec![
        Column {
            x_pt: 0.0,
            width_pt: side_width,
            blocks: side_blocks,
            shaded: true,
        },
        Column {
            x_pt: side_width + GUTTER_PT * scale,
            width_pt: main_width,
            blocks: main_blocks,
            shaded: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::defaults::sample_resume;

    fn all_text(columns: &[Column]) -> String {
        let mut out = String::new();
        for col in columns {
            for block in &col.blocks {
                for line in &block.lines {
                    if let LineKind::Text { left, right, .. } = &line.kind {
                        out.push_str(&left.text);
                        out.push('\n');
                        if let Some(r) = right {
                            out.push_str(&r.text);
                            out.push('\n');
                        }
                    }
                }
            }
        }
        out
    }

    fn style(layout: ResumeLayout) -> ResumeStyle {
        ResumeStyle {
            layout,
            ..ResumeStyle::default()
        }
    }

    #[test]
    fn test_single_column_layouts_have_one_column() {
        for layout in [ResumeLayout::Standard, ResumeLayout::Minimal] {
            let cols = compose(&sample_resume(), &style(layout), 500.0, 1.0);
            assert_eq!(cols.len(), 1, "{layout:?}");
            assert_eq!(cols[0].width_pt, 500.0);
        }
    }

    #[test]
    fn test_sidebar_splits_content() {
        let cols = compose(&sample_resume(), &style(ResumeLayout::Sidebar), 500.0, 1.0);
        assert_eq!(cols.len(), 2);
        assert!(cols[0].shaded);
        assert!(cols[1].x_pt > cols[0].width_pt);
        let side = all_text(&cols[..1]);
        let main = all_text(&cols[1..]);
        assert!(side.contains("Frontend Stack"), "skills belong in the sidebar");
        assert!(main.contains("TechNova Solutions"), "experience belongs in main");
        assert!(!side.contains("TechNova Solutions"));
    }

    #[test]
    fn test_lines_fit_their_column() {
        let data = sample_resume();
        for layout in ResumeLayout::ALL {
            let st = style(layout);
            let metrics = table_for(st.font);
            for col in compose(&data, &st, 480.0, 1.0) {
                for block in &col.blocks {
                    for line in &block.lines {
                        if let LineKind::Text { left, indent_pt, .. } = &line.kind {
                            let w = metrics.width_pt(&left.text, left.size_pt, left.face == Face::Bold);
                            assert!(w + indent_pt <= col.width_pt + 0.01, "{layout:?}: '{}' overflows", left.text);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_each_experience_is_its_own_keep_together_block() {
        let cols = compose(&sample_resume(), &style(ResumeLayout::Standard), 500.0, 1.0);
        let block_text = |b: &Block| {
            all_text(&[Column {
                x_pt: 0.0,
                width_pt: 0.0,
                blocks: vec![b.clone()],
                shaded: false,
            }])
        };
        let exp_blocks: Vec<&Block> = cols[0]
            .blocks
            .iter()
            .filter(|b| {
                let text = block_text(b);
                text.contains("Senior Frontend Engineer") || text.contains("Full Stack Developer")
            })
            .collect();
        assert_eq!(exp_blocks.len(), 2);
        assert!(exp_blocks.iter().all(|b| b.keep_together));
        assert!(block_text(exp_blocks[0]).contains("EXPERIENCE"), "heading glued to first entry");
    }

    #[test]
    fn test_blank_bullets_and_empty_sections_are_skipped() {
        let mut data = ResumeData::empty();
        data.personal_info.full_name = "Solo".to_string();
        data.awards = vec!["  ".to_string()];
        let cols = compose(&data, &style(ResumeLayout::Standard), 500.0, 1.0);
        let text = all_text(&cols);
        assert!(text.contains("Solo"));
        assert!(!text.contains("AWARDS"));
        assert!(!text.contains("EXPERIENCE"));
    }

    #[test]
    fn test_scale_grows_text() {
        let small = compose(&sample_resume(), &style(ResumeLayout::Standard), 500.0, 1.0);
        let large = compose(&sample_resume(), &style(ResumeLayout::Standard), 500.0, 1.5);
        let height = |cols: &[Column]| cols[0].blocks.iter().map(Block::height).sum::<f32>();
        assert!(height(&large) > height(&small));
    }

    #[test]
    fn test_dates_are_folded_to_ascii() {
        let cols = compose(&sample_resume(), &style(ResumeLayout::Standard), 500.0, 1.0);
        let text = all_text(&cols);
        assert!(text.contains("2021-01 - Present"));
        assert!(text.is_ascii());
    }
}
