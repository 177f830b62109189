use std::{io::Cursor, path::Path};

use anyhow::anyhow;
use chrono::{DateTime, TimeZone};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, Pt};

use crate::AggregatedLine;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Turns a shopping list into a downloadable document.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, lines: &[AggregatedLine]) -> recipebox_shared::Result<Vec<u8>>;
}

/// `"<name> (<unit>) - <amount>"`
pub fn format_line(line: &AggregatedLine) -> String {
    format!("{} ({}) - {}", line.name, line.unit, line.amount)
}

/// Download name of a shopping list generated at `now`.
pub fn buying_list_filename<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("buying_list_{}.pdf", now.format("%m/%d/%Y, %H:%M:%S"))
}

/// Page geometry in points, origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub top: f32,
    pub step: f32,
    pub bottom: f32,
}

impl Default for PageLayout {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            x: 50.0,
            top: 800.0,
            step: 25.0,
            bottom: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Places one text line per entry, top to bottom, starting a new page when
/// the next line would go under the bottom margin. Always yields at least
/// one page.
pub fn layout(lines: &[AggregatedLine], page: &PageLayout) -> Vec<Vec<PlacedText>> {
    let mut pages = vec![Vec::new()];
    let mut y = page.top;

    for line in lines {
        if y < page.bottom {
            pages.push(Vec::new());
            y = page.top;
        }

        if let Some(current) = pages.last_mut() {
            current.push(PlacedText {
                x: page.x,
                y,
                text: format_line(line),
            });
        }

        y -= page.step;
    }

    pages
}

pub struct PdfRenderer {
    font: Option<Vec<u8>>,
    font_size: f32,
    page: PageLayout,
}

impl PdfRenderer {
    pub fn new(font_size: f32) -> Self {
        Self {
            font: None,
            font_size,
            page: PageLayout::default(),
        }
    }

    /// Uses a TrueType font for glyphs outside of the built-in Helvetica.
    pub fn with_font_file(mut self, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow!("unable to read font {}: {e}", path.display()))?;
        self.font = Some(bytes);

        Ok(self)
    }

    pub fn with_layout(mut self, page: PageLayout) -> Self {
        self.page = page;
        self
    }

    fn load_font(&self, doc: &PdfDocumentReference) -> anyhow::Result<IndirectFontRef> {
        let font = match &self.font {
            Some(bytes) => doc.add_external_font(Cursor::new(bytes.as_slice())),
            None => doc.add_builtin_font(BuiltinFont::Helvetica),
        };

        font.map_err(|e| anyhow!("unable to load font: {e}"))
    }

    fn render_pdf(&self, lines: &[AggregatedLine]) -> anyhow::Result<Vec<u8>> {
        let width = Mm::from(Pt(self.page.width));
        let height = Mm::from(Pt(self.page.height));
        let (doc, first_page, first_layer) =
            PdfDocument::new("Shopping list", width, height, "Layer 1");
        let font = self.load_font(&doc)?;

        for (number, placed) in layout(lines, &self.page).into_iter().enumerate() {
            let (page, layer) = if number == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, "Layer 1")
            };
            let layer = doc.get_page(page).get_layer(layer);

            for text in placed {
                layer.use_text(
                    text.text,
                    self.font_size,
                    Mm::from(Pt(text.x)),
                    Mm::from(Pt(text.y)),
                    &font,
                );
            }
        }

        doc.save_to_bytes()
            .map_err(|e| anyhow!("unable to write pdf: {e}"))
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, lines: &[AggregatedLine]) -> recipebox_shared::Result<Vec<u8>> {
        Ok(self.render_pdf(lines)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use recipebox_recipe::Unit;

    use super::*;

    fn lines(count: usize) -> Vec<AggregatedLine> {
        (0..count)
            .map(|i| AggregatedLine {
                name: format!("Item {i}"),
                unit: Unit::Gram,
                amount: i as u64,
            })
            .collect()
    }

    #[test]
    fn line_format() {
        let line = AggregatedLine {
            name: "Sugar".to_owned(),
            unit: Unit::Kilogram,
            amount: 150,
        };
        assert_eq!(format_line(&line), "Sugar (kilogram) - 150");
    }

    #[test]
    fn empty_list_is_one_blank_page() {
        let pages = layout(&[], &PageLayout::default());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn lines_step_down_the_page() {
        let pages = layout(&lines(3), &PageLayout::default());
        assert_eq!(pages.len(), 1);
        let ys = pages[0].iter().map(|t| t.y).collect::<Vec<_>>();
        assert_eq!(ys, vec![800.0, 775.0, 750.0]);
        assert!(pages[0].iter().all(|t| t.x == 50.0));
        assert_eq!(pages[0][1].text, "Item 1 (gram) - 1");
    }

    #[test]
    fn long_list_spills_to_next_page() {
        // 800, 775, ..., 50 fit above the 40pt margin: 31 lines per page.
        let pages = layout(&lines(40), &PageLayout::default());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 31);
        assert_eq!(pages[1].len(), 9);
        assert_eq!(pages[1][0].y, 800.0);
        assert_eq!(pages[1][0].text, "Item 31 (gram) - 31");
    }

    #[test]
    fn pdf_bytes_have_pdf_header() -> anyhow::Result<()> {
        let renderer = PdfRenderer::new(15.0);

        let empty = renderer.render(&[])?;
        assert!(empty.starts_with(b"%PDF"));

        let full = renderer.render(&lines(40))?;
        assert!(full.starts_with(b"%PDF"));

        Ok(())
    }

    #[test]
    fn missing_font_file_is_an_error() {
        assert!(PdfRenderer::new(15.0)
            .with_font_file("/nonexistent/font.ttf")
            .is_err());
    }

    #[test]
    fn filename_uses_local_timestamp() {
        let now = FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 7, 9, 5, 2)
            .unwrap();
        assert_eq!(
            buying_list_filename(&now),
            "buying_list_03/07/2024, 09:05:02.pdf"
        );
    }
}
