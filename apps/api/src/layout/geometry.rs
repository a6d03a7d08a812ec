//! Page geometry and typography for the export layout.
//!
//! All lengths are millimetres except font sizes, which are points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::font_metrics::{get_metrics, FontFace, FontMetricTable};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Invalid page geometry: usable width {usable_width}mm, usable height {usable_height}mm")]
    InvalidGeometry {
        usable_width: f32,
        usable_height: f32,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Physical page size and the single margin used on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// A4 portrait with 15mm margins.
    pub fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 15.0,
        }
    }

    /// US letter portrait with 15mm margins.
    pub fn letter() -> Self {
        Self {
            width: 215.9,
            height: 279.4,
            margin: 15.0,
        }
    }

    /// Parses a named page format (`a4` or `letter`, case-insensitive).
    pub fn from_format(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a4" => Some(Self::a4()),
            "letter" => Some(Self::letter()),
            _ => None,
        }
    }

    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Vertical space between the top margin and the bottom threshold.
    pub fn usable_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// The cursor may not pass this y coordinate; the bottom margin doubles as the break line.
    pub fn bottom_threshold(&self) -> f32 {
        self.height - self.margin
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let usable_width = self.usable_width();
        let usable_height = self.usable_height();
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(usable_width) || !positive(usable_height) || self.margin < 0.0 {
            return Err(LayoutError::InvalidGeometry {
                usable_width,
                usable_height,
            });
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Typography
// ────────────────────────────────────────────────────────────────────────────

/// Font weight/size tier of a placed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontTier {
    Title,
    SectionHeading,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierStyle {
    pub face: FontFace,
    pub size_pt: f32,
    /// Vertical advance per wrapped line.
    pub line_height: f32,
}

impl TierStyle {
    pub fn metrics(&self) -> &'static FontMetricTable {
        get_metrics(self.face)
    }
}

/// Tier styles plus the fixed gaps between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub title: TierStyle,
    pub heading: TierStyle,
    pub body: TierStyle,
    /// Space after the title block.
    pub title_gap: f32,
    /// Space between a heading and its first body line.
    pub heading_gap: f32,
    /// Space after a section's last body line.
    pub section_gap: f32,
    /// Space that must remain before a heading is placed, so it is never stranded.
    pub section_lookahead: f32,
}

impl Typography {
    pub fn style(&self, tier: FontTier) -> &TierStyle {
        match tier {
            FontTier::Title => &self.title,
            FontTier::SectionHeading => &self.heading,
            FontTier::Body => &self.body,
        }
    }
}

/// Returns the default export typography: bold 22pt title, bold 16pt headings, 12pt body.
pub fn default_typography() -> Typography {
    Typography {
        title: TierStyle {
            face: FontFace::HelveticaBold,
            size_pt: 22.0,
            line_height: 8.0,
        },
        heading: TierStyle {
            face: FontFace::HelveticaBold,
            size_pt: 16.0,
            line_height: 7.0,
        },
        body: TierStyle {
            face: FontFace::Helvetica,
            size_pt: 12.0,
            line_height: 5.0,
        },
        title_gap: 10.0,
        heading_gap: 5.0,
        section_gap: 10.0,
        section_lookahead: 20.0,
    }
}

impl Default for Typography {
    fn default() -> Self {
        default_typography()
    }
}
