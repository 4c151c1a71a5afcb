//! PDF renderer: paginated columns → PDF bytes via `printpdf` (v0.8 ops API).

use printpdf::*;

use crate::export::blocks::{Column, Face, LineKind, Tone};
use crate::export::paginate::{paginate, PlacedLine};
use crate::models::style::accent_rgb;
use crate::models::ResumeFont;

/// Points → millimetres.
const PT_TO_MM: f32 = 0.352778;
/// Baseline sits this far below the top of the glyph box.
const ASCENT: f32 = 0.78;

const HEADING_RGB: [f32; 3] = [0.07, 0.09, 0.15];
const BODY_RGB: [f32; 3] = [0.22, 0.25, 0.32];
const MUTED_RGB: [f32; 3] = [0.42, 0.45, 0.50];
const PANEL_RGB: [f32; 3] = [0.976, 0.980, 0.984];

/// Everything the renderer needs besides the columns.
pub struct PageSpec<'a> {
    pub title: &'a str,
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
    pub font: ResumeFont,
    pub accent: &'a str,
}

fn rgb(c: [f32; 3]) -> Color {
    Color::Rgb(Rgb {
        r: c[0],
        g: c[1],
        b: c[2],
        icc_profile: None,
    })
}

fn builtin(font: ResumeFont, face: Face) -> BuiltinFont {
    match (font, face) {
        (ResumeFont::Sans, Face::Regular) => BuiltinFont::Helvetica,
        (ResumeFont::Sans, Face::Bold) => BuiltinFont::HelveticaBold,
        (ResumeFont::Sans, Face::Italic) => BuiltinFont::HelveticaOblique,
        (ResumeFont::Serif, Face::Regular) => BuiltinFont::TimesRoman,
        (ResumeFont::Serif, Face::Bold) => BuiltinFont::TimesBold,
        (ResumeFont::Serif, Face::Italic) => BuiltinFont::TimesItalic,
        (ResumeFont::Mono, Face::Regular) => BuiltinFont::Courier,
        (ResumeFont::Mono, Face::Bold) => BuiltinFont::CourierBold,
        (ResumeFont::Mono, Face::Italic) => BuiltinFont::CourierOblique,
    }
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn fill_rect(ops: &mut Vec<Op>, x1: f32, y1: f32, x2: f32, y2: f32, color: [f32; 3]) {
    ops.push(Op::SetFillColor { col: rgb(color) });
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![point(x1, y1), point(x2, y1), point(x2, y2), point(x1, y2)],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    });
}

fn write_text(ops: &mut Vec<Op>, text: &str, x: f32, y: f32, size: f32, font: BuiltinFont, color: [f32; 3]) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point { x: Pt(x), y: Pt(y) },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font,
    });
    ops.push(Op::SetLineHeight { lh: Pt(size) });
    ops.push(Op::SetFillColor { col: rgb(color) });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
}

struct Painter<'a> {
    spec: &'a PageSpec<'a>,
    accent: [f32; 3],
}

impl Painter<'_> {
    fn tone(&self, tone: Tone) -> [f32; 3] {
        match tone {
            Tone::Accent => self.accent,
            Tone::Heading => HEADING_RGB,
            Tone::Body => BODY_RGB,
            Tone::Muted => MUTED_RGB,
        }
    }

    fn column(&self, ops: &mut Vec<Op>, column: &Column, lines: &[PlacedLine]) {
        let metrics = crate::export::font_metrics::table_for(self.spec.font);
        let left = self.spec.margin_pt + column.x_pt;
        let top = self.spec.height_pt - self.spec.margin_pt;

        for placed in lines {
            let line_top = top - placed.y_pt;
            match &placed.line.kind {
                LineKind::Space => {}
                LineKind::Rule { thickness_pt, tone } => {
                    let y = line_top - placed.line.height_pt / 2.0;
                    ops.push(Op::SetOutlineThickness { pt: Pt(*thickness_pt) });
                    ops.push(Op::SetOutlineColor { col: rgb(self.tone(*tone)) });
                    ops.push(Op::DrawLine {
                        line: Line {
                            points: vec![point(left, y), point(left + column.width_pt, y)],
                            is_closed: false,
                        },
                    });
                }
                LineKind::Text {
                    left: run,
                    right,
                    indent_pt,
                    bullet,
                } => {
                    let leading = (placed.line.height_pt - run.size_pt).max(0.0) / 2.0;
                    let baseline = line_top - leading - run.size_pt * ASCENT;
                    let x = left + indent_pt;

                    if *bullet {
                        let side = run.size_pt * 0.22;
                        let cx = x - run.size_pt * 0.7;
                        let cy = baseline + run.size_pt * 0.3;
                        fill_rect(ops, cx - side / 2.0, cy - side / 2.0, cx + side / 2.0, cy + side / 2.0, self.tone(Tone::Body));
                    }
                    if !run.text.is_empty() {
                        write_text(ops, &run.text, x, baseline, run.size_pt, builtin(self.spec.font, run.face), self.tone(run.tone));
                    }
                    if let Some(r) = right {
                        let width = metrics.width_pt(&r.text, r.size_pt, r.face == Face::Bold);
                        let rx = left + column.width_pt - width;
                        write_text(ops, &r.text, rx, baseline, r.size_pt, builtin(self.spec.font, r.face), self.tone(r.tone));
                    }
                }
            }
        }
    }
}

/// Paginates every column and renders the pages. Columns share page breaks:
/// page N shows page N of each column.
pub fn render_pdf(columns: &[Column], spec: &PageSpec) -> Vec<u8> {
    let page_w = Mm(spec.width_pt * PT_TO_MM);
    let page_h = Mm(spec.height_pt * PT_TO_MM);
    let content_height = spec.height_pt - 2.0 * spec.margin_pt;

    let flowed: Vec<Vec<Vec<PlacedLine>>> = columns
        .iter()
        .map(|c| paginate(&c.blocks, content_height))
        .collect();
    let page_count = flowed.iter().map(Vec::len).max().unwrap_or(1).max(1);

    let painter = Painter {
        spec,
        accent: accent_rgb(spec.accent),
    };

    let mut doc = PdfDocument::new(spec.title);
    let mut pages = Vec::with_capacity(page_count);

    for index in 0..page_count {
        let mut ops = Vec::new();
        for (column, column_pages) in columns.iter().zip(&flowed) {
            if column.shaded {
                // Panel bleeds to the page edge on the left and top/bottom.
                let x2 = spec.margin_pt + column.x_pt + column.width_pt + spec.margin_pt / 2.0;
                fill_rect(&mut ops, 0.0, 0.0, x2, spec.height_pt, PANEL_RGB);
            }
            if let Some(lines) = column_pages.get(index) {
                painter.column(&mut ops, column, lines);
            }
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    doc.with_pages(pages);
    doc.save(&PdfSaveOptions::default(), &mut Vec::new())
}
