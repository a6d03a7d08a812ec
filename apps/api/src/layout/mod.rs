// Export layout: font metrics, page geometry, line wrapping and pagination.
// Everything here is pure and synchronous; nothing touches the report it lays out.

pub mod font_metrics;
pub mod geometry;
pub mod paginator;
pub mod wrap;

// Re-export the public API consumed by the export and HTTP layers.
pub use geometry::{default_typography, FontTier, LayoutError, PageGeometry, Typography};
pub use paginator::{layout, layout_report, PageLayoutPlan};
