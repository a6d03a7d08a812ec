//! PDF output for layout plans, using the base-14 Helvetica faces (nothing embedded).
//!
//! Text runs are buffered per page and the file is assembled on `save`. PDF space has its
//! origin at the bottom-left in points, so plan coordinates are flipped and converted.

use std::path::PathBuf;

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use tracing::debug;

use crate::export::writer::{DocumentWriter, ExportError};
use crate::layout::font_metrics::{FontFace, MM_PER_PT};
use crate::layout::{FontTier, PageGeometry, Typography};

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

struct TextRun {
    x: f32,
    y: f32,
    text: String,
    tier: FontTier,
}

/// Where `save` puts the finished file.
enum Destination {
    Memory,
    #[allow(dead_code)] // file exports are not routed over HTTP yet
    Directory(PathBuf),
}

pub struct PdfDocumentWriter {
    geometry: PageGeometry,
    typography: Typography,
    destination: Destination,
    pages: Vec<Vec<TextRun>>,
    saved: Option<(String, Vec<u8>)>,
}

impl PdfDocumentWriter {
    /// Writer whose `save` keeps the bytes for `take_saved`.
    pub fn in_memory(geometry: PageGeometry, typography: Typography) -> Self {
        Self::with_destination(geometry, typography, Destination::Memory)
    }

    /// Writer whose `save` writes `<dir>/<filename>`.
    #[allow(dead_code)]
    pub fn to_directory(geometry: PageGeometry, typography: Typography, dir: PathBuf) -> Self {
        Self::with_destination(geometry, typography, Destination::Directory(dir))
    }

    fn with_destination(
        geometry: PageGeometry,
        typography: Typography,
        destination: Destination,
    ) -> Self {
        Self {
            geometry,
            typography,
            destination,
            pages: Vec::new(),
            saved: None,
        }
    }

    /// Filename and bytes of the last successful `save`.
    pub fn take_saved(&mut self) -> Option<(String, Vec<u8>)> {
        self.saved.take()
    }

    fn font_for(&self, tier: FontTier) -> (Name<'static>, f32) {
        let style = self.typography.style(tier);
        let name = match style.face {
            FontFace::Helvetica => REGULAR_FONT,
            FontFace::HelveticaBold => BOLD_FONT,
        };
        (name, style.size_pt)
    }

    /// Assembles the document from the buffered pages.
    fn to_bytes(&self) -> Vec<u8> {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let regular_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let page_ids: Vec<Ref> = (0..self.pages.len())
            .map(|i| Ref::new(5 + 2 * i as i32))
            .collect();

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);
        pdf.type1_font(regular_id)
            .base_font(Name(FontFace::Helvetica.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(FontFace::HelveticaBold.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let width_pt = mm_to_pt(self.geometry.width);
        let height_pt = mm_to_pt(self.geometry.height);

        for (runs, page_id) in self.pages.iter().zip(&page_ids) {
            let content_id = Ref::new(page_id.get() + 1);
            {
                let mut page = pdf.page(*page_id);
                page.media_box(Rect::new(0.0, 0.0, width_pt, height_pt))
                    .parent(pages_id)
                    .contents(content_id);
                page.resources()
                    .fonts()
                    .pair(REGULAR_FONT, regular_id)
                    .pair(BOLD_FONT, bold_id);
            }

            let mut content = Content::new();
            for run in runs {
                let (font, size) = self.font_for(run.tier);
                let encoded = encode_win_ansi(&run.text);
                content
                    .begin_text()
                    .set_font(font, size)
                    .next_line(mm_to_pt(run.x), height_pt - mm_to_pt(run.y))
                    .show(Str(&encoded))
                    .end_text();
            }
            pdf.stream(content_id, &content.finish());
        }

        pdf.finish()
    }
}

impl DocumentWriter for PdfDocumentWriter {
    fn new_page(&mut self) -> Result<(), ExportError> {
        self.pages.push(Vec::new());
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, tier: FontTier) -> Result<(), ExportError> {
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| ExportError::ExportFailed("text drawn before any page".to_string()))?;
        page.push(TextRun {
            x,
            y,
            text: text.to_string(),
            tier,
        });
        Ok(())
    }

    fn save(&mut self, filename: &str) -> Result<(), ExportError> {
        if self.pages.is_empty() {
            return Err(ExportError::ExportFailed("document has no pages".to_string()));
        }
        let bytes = self.to_bytes();
        if let Destination::Directory(dir) = &self.destination {
            let path = dir.join(filename);
            std::fs::write(&path, &bytes).map_err(|e| {
                ExportError::ExportFailed(format!("could not write {}: {e}", path.display()))
            })?;
        }
        debug!("Assembled {} ({} bytes)", filename, bytes.len());
        self.saved = Some((filename.to_string(), bytes));
        Ok(())
    }
}

fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Maps text onto the WinAnsi code page used by the base-14 fonts.
/// Characters with no WinAnsi slot become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\t' => b' ',
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '•' => 0x95,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::writer::write_document;
    use crate::layout::{default_typography, layout};

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn writer() -> PdfDocumentWriter {
        PdfDocumentWriter::in_memory(PageGeometry::a4(), default_typography())
    }

    #[test]
    fn test_in_memory_save_produces_pdf_bytes() {
        let plan = layout(
            "Quantum Computing",
            &[("Introduction", "Qubits exploit superposition.")],
            &PageGeometry::a4(),
            &default_typography(),
        )
        .unwrap();
        let mut w = writer();
        write_document(&plan, &mut w, "report.pdf").unwrap();

        let (name, bytes) = w.take_saved().unwrap();
        assert_eq!(name, "report.pdf");
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"Helvetica-Bold"));
        assert!(contains(&bytes, b"Quantum Computing"));
    }

    #[test]
    fn test_directory_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = PdfDocumentWriter::to_directory(
            PageGeometry::a4(),
            default_typography(),
            dir.path().to_path_buf(),
        );
        w.new_page().unwrap();
        w.draw_text(15.0, 15.0, "Hello", FontTier::Body).unwrap();
        w.save("hello.pdf").unwrap();

        let written = std::fs::read(dir.path().join("hello.pdf")).unwrap();
        assert!(written.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = PdfDocumentWriter::to_directory(
            PageGeometry::a4(),
            default_typography(),
            dir.path().join("does-not-exist"),
        );
        w.new_page().unwrap();
        let err = w.save("x.pdf").unwrap_err();
        assert!(matches!(err, ExportError::ExportFailed(msg) if msg.contains("could not write")));
        assert!(w.take_saved().is_none());
    }

    #[test]
    fn test_draw_before_page_fails() {
        let mut w = writer();
        assert!(w.draw_text(0.0, 0.0, "x", FontTier::Body).is_err());
    }

    #[test]
    fn test_save_without_pages_fails() {
        assert!(writer().save("empty.pdf").is_err());
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Az~"), b"Az~".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{2014}"), vec![0x97]);
        assert_eq!(encode_win_ansi("量子"), b"??".to_vec());
    }

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-3);
    }
}
