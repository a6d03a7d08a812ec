//! Pagination — flows the title and titled sections across export pages.
//!
//! Single pass, no backtracking. A cursor `y` walks down the page from the top margin;
//! a block that would cross the bottom threshold starts a new page first. The output is a
//! `PageLayoutPlan`: every wrapped line with its page, position and font tier. The plan is
//! derived data; the report it came from is only read.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::geometry::{FontTier, LayoutError, PageGeometry, TierStyle, Typography};
use crate::layout::wrap::wrap_text;
use crate::report::Report;

// ────────────────────────────────────────────────────────────────────────────
// Plan types
// ────────────────────────────────────────────────────────────────────────────

/// One line of text placed on a page. `y` is the baseline, measured from the page top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub tier: FontTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagePlan {
    pub index: usize,
    pub placements: Vec<Placement>,
}

/// Page-grouped draw instructions, pages in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayoutPlan {
    pub geometry: PageGeometry,
    pub pages: Vec<PagePlan>,
}

impl PageLayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Flattened `(page, placement)` view in draw order.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &Placement)> + '_ {
        self.pages
            .iter()
            .flat_map(|p| p.placements.iter().map(move |pl| (p.index, pl)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

struct PageFlow<'a> {
    geometry: &'a PageGeometry,
    pages: Vec<PagePlan>,
    y: f32,
}

impl<'a> PageFlow<'a> {
    fn new(geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            y: geometry.margin,
        }
    }

    fn current_page_has_content(&self) -> bool {
        self.pages.last().is_some_and(|p| !p.placements.is_empty())
    }

    /// Breaks to a new page if `needed` does not fit below the cursor.
    /// A fresh page never breaks again, so an oversized block cannot produce blank pages.
    fn ensure_space(&mut self, needed: f32) {
        if self.current_page_has_content() && self.y + needed > self.geometry.bottom_threshold() {
            let index = self.pages.len();
            self.pages.push(PagePlan {
                index,
                placements: Vec::new(),
            });
            self.y = self.geometry.margin;
        }
    }

    fn place(&mut self, text: String, tier: FontTier) {
        if self.pages.is_empty() {
            self.pages.push(PagePlan {
                index: 0,
                placements: Vec::new(),
            });
        }
        let placement = Placement {
            x: self.geometry.margin,
            y: self.y,
            text,
            tier,
        };
        if let Some(page) = self.pages.last_mut() {
            page.placements.push(placement);
        }
    }

    fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Places lines as one block: the space check covers the whole block.
    fn place_block(&mut self, lines: Vec<String>, tier: FontTier, style: &TierStyle) {
        for line in lines {
            self.place(line, tier);
            self.advance(style.line_height);
        }
    }

    /// Places lines one at a time, breaking between any two of them.
    fn place_flowing(&mut self, lines: Vec<String>, tier: FontTier, style: &TierStyle) {
        for line in lines {
            self.ensure_space(style.line_height);
            self.place(line, tier);
            self.advance(style.line_height);
        }
    }

    fn finish(self) -> Vec<PagePlan> {
        self.pages
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a title and an ordered list of `(heading, body)` blocks.
pub fn layout(
    title: &str,
    sections: &[(&str, &str)],
    geometry: &PageGeometry,
    typography: &Typography,
) -> Result<PageLayoutPlan, LayoutError> {
    geometry.validate()?;
    let width = geometry.usable_width();
    let mut flow = PageFlow::new(geometry);

    let title_lines = wrap_text(title, &typography.title, width);
    if !title_lines.is_empty() {
        flow.ensure_space(title_lines.len() as f32 * typography.title.line_height);
        flow.place_block(title_lines, FontTier::Title, &typography.title);
        flow.advance(typography.title_gap);
    }

    for (heading, body) in sections {
        // Heading plus first body line must fit, or the heading moves to the next page.
        flow.ensure_space(typography.section_lookahead);

        let heading_lines = wrap_text(heading, &typography.heading, width);
        flow.place_block(heading_lines, FontTier::SectionHeading, &typography.heading);
        flow.advance(typography.heading_gap);

        let body_lines = wrap_text(body, &typography.body, width);
        flow.place_flowing(body_lines, FontTier::Body, &typography.body);
        flow.advance(typography.section_gap);
    }

    let pages = flow.finish();
    debug!(
        "Laid out {:?} across {} page(s)",
        title.chars().take(40).collect::<String>(),
        pages.len()
    );

    Ok(PageLayoutPlan {
        geometry: *geometry,
        pages,
    })
}

/// Lays out a report under its topic title, sections in canonical order.
pub fn layout_report(
    title: &str,
    report: &Report,
    geometry: &PageGeometry,
    typography: &Typography,
) -> Result<PageLayoutPlan, LayoutError> {
    let sections: Vec<(&str, &str)> = report.titled_sections().collect();
    layout(title, &sections, geometry, typography)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
