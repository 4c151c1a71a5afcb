// Live preview: (resume, style) → standalone HTML document.
// Rendering is pure; the same inputs always give the same bytes.

pub mod handlers;
pub mod templates;
pub mod theme;
pub mod view;

use askama::Template;

use crate::models::{ResumeData, ResumeStyle};
use crate::preview::templates::PreviewPage;
use crate::preview::theme::Theme;
use crate::preview::view::ResumeView;

/// Renders the on-screen preview.
pub fn render_preview(data: &ResumeData, style: &ResumeStyle) -> Result<String, askama::Error> {
    render(data, style, false)
}

/// Same document, plus a script that opens the browser's print dialog.
pub fn render_print(data: &ResumeData, style: &ResumeStyle) -> Result<String, askama::Error> {
    render(data, style, true)
}

fn render(data: &ResumeData, style: &ResumeStyle, auto_print: bool) -> Result<String, askama::Error> {
    let theme = Theme::from_style(style);
    let resume = ResumeView::from_data(data);
    let title = if resume.full_name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{} - Resume", resume.full_name)
    };
    PreviewPage {
        title: &title,
        theme: &theme,
        resume: &resume,
        auto_print,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::defaults::sample_resume;
    use crate::models::ResumeLayout;

    fn with_layout(layout: ResumeLayout) -> ResumeStyle {
        ResumeStyle {
            layout,
            ..ResumeStyle::default()
        }
    }

    #[test]
    fn test_every_layout_renders_root_and_content() {
        let data = sample_resume();
        for layout in ResumeLayout::ALL {
            let html = render_preview(&data, &with_layout(layout)).unwrap();
            assert!(html.contains(r#"id="resume-document""#), "{layout:?} root");
            assert!(html.contains("Alex Rivera"), "{layout:?} name");
            assert!(html.contains("TechNova Solutions"), "{layout:?} experience");
            assert!(html.contains("AWS Certified Solutions Architect"), "{layout:?} certs");
            assert!(!html.contains("window.print"), "{layout:?} preview must not print");
        }
    }

    #[test]
    fn test_switching_layout_does_not_touch_data() {
        let data = sample_resume();
        let snapshot = data.clone();
        let mut style = ResumeStyle::default();
        for layout in ResumeLayout::ALL {
            style.layout = layout;
            render_preview(&data, &style).unwrap();
        }
        assert_eq!(data, snapshot);
    }

    #[test]
    fn test_layouts_differ() {
        let data = sample_resume();
        let sidebar = render_preview(&data, &with_layout(ResumeLayout::Sidebar)).unwrap();
        let standard = render_preview(&data, &with_layout(ResumeLayout::Standard)).unwrap();
        let minimal = render_preview(&data, &with_layout(ResumeLayout::Minimal)).unwrap();
        assert!(sidebar.contains("<aside>"));
        assert!(!standard.contains("<aside>"));
        assert!(standard.contains("Professional Summary"));
        assert!(minimal.contains(r#"class="layout-minimal""#));
    }

    #[test]
    fn test_style_values_reach_css() {
        let style = ResumeStyle {
            accent_color: "#2563eb".to_string(),
            line_spacing: 1.6,
            section_spacing: 2.0,
            ..ResumeStyle::default()
        };
        let html = render_preview(&sample_resume(), &style).unwrap();
        assert!(html.contains("#2563eb"));
        assert!(html.contains("line-height: 1.6;"));
        assert!(html.contains("margin-bottom: 2rem;"));
        assert!(html.contains("font-size: 12px;"));
        assert!(html.contains("@page { size: A4; margin: 0; }"));
        assert!(html.contains("break-inside: avoid"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut data = sample_resume();
        data.personal_info.full_name = "<script>alert(1)</script>".to_string();
        let html = render_preview(&data, &ResumeStyle::default()).unwrap();
        assert!(!html.contains("<script>alert(1)"), "raw markup survived escaping");
        assert!(html.contains("&#60;script&#62;alert(1)"), "escaped name missing");
    }

    #[test]
    fn test_blank_bullets_are_skipped() {
        let mut data = sample_resume();
        data.experience[0].description = vec!["Real work".to_string(), "  ".to_string()];
        let html = render_preview(&data, &with_layout(ResumeLayout::Standard)).unwrap();
        assert!(html.contains("<li>Real work</li>"));
        assert!(!html.contains("<li>  </li>"));
    }

    #[test]
    fn test_print_variant_triggers_dialog() {
        let html = render_print(&sample_resume(), &ResumeStyle::default()).unwrap();
        assert!(html.contains("window.print()"));
    }
}
