//! Document writer seam and plan replay.
//!
//! A `PageLayoutPlan` is replayed onto any `DocumentWriter`: one `new_page` per plan page,
//! then one `draw_text` per placement, then `save`. The first writer error aborts the
//! export; nothing produced before it counts as output.

use thiserror::Error;
use tracing::{info, warn};

use crate::layout::{FontTier, PageLayoutPlan};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Export failed: {0}")]
    ExportFailed(String),
}

/// Drawing primitives of an output document. Coordinates are millimetres from the
/// top-left corner of the current page; `y` is the text baseline.
pub trait DocumentWriter {
    fn new_page(&mut self) -> Result<(), ExportError>;
    fn draw_text(&mut self, x: f32, y: f32, text: &str, tier: FontTier)
        -> Result<(), ExportError>;
    fn save(&mut self, filename: &str) -> Result<(), ExportError>;
}

/// Replays every page and placement of `plan` onto `writer`. Does not save.
pub fn render_plan(plan: &PageLayoutPlan, writer: &mut dyn DocumentWriter) -> Result<(), ExportError> {
    for page in &plan.pages {
        writer.new_page()?;
        for p in &page.placements {
            writer.draw_text(p.x, p.y, &p.text, p.tier)?;
        }
    }
    Ok(())
}

/// Replays `plan` and saves it under `filename`.
pub fn write_document(
    plan: &PageLayoutPlan,
    writer: &mut dyn DocumentWriter,
    filename: &str,
) -> Result<(), ExportError> {
    let result = render_plan(plan, writer).and_then(|()| writer.save(filename));
    match &result {
        Ok(()) => info!("Exported {} page(s) to {}", plan.page_count(), filename),
        Err(e) => warn!("Export of {} failed: {}", filename, e),
    }
    result
}

/// `<product>_Report_<topic with spaces as underscores>.pdf`, topic defaulting to `Untitled`.
pub fn export_filename(product: &str, topic: &str) -> String {
    let topic = topic.replace(' ', "_");
    let topic = if topic.is_empty() { "Untitled" } else { topic.as_str() };
    format!("{product}_Report_{topic}.pdf")
}
