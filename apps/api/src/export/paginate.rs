//! Flows blocks down a column and across pages.
//!
//! Keep-together blocks that would straddle a page break move to the next
//! page whole, unless they are taller than a page, in which case they split
//! line by line like everything else. Spacer lines never open a page.

use crate::export::blocks::{Block, Line, LineKind};

/// A line positioned on a page. `y_pt` is measured down from the top of the
/// content area.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: Line,
    pub y_pt: f32,
}

/// Lines per page for one column.
pub fn paginate(blocks: &[Block], page_height_pt: f32) -> Vec<Vec<PlacedLine>> {
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = 0.0_f32;

    for block in blocks {
        let height = block.height();
        if block.keep_together && y > 0.0 && y + height > page_height_pt && height <= page_height_pt {
            pages.push(Vec::new());
            y = 0.0;
        }

        for line in &block.lines {
            let is_space = matches!(line.kind, LineKind::Space);
            if y > 0.0 && y + line.height_pt > page_height_pt {
                pages.push(Vec::new());
                y = 0.0;
            }
            if is_space && y == 0.0 {
                continue;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    line: line.clone(),
                    y_pt: y,
                });
            }
            y += line.height_pt;
        }
    }

    // A trailing page holding nothing but a page break is noise.
    while pages.len() > 1 && pages.last().is_some_and(|p| p.is_empty()) {
        pages.pop();
    }
    pages
}
