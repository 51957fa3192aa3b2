//! Drawing surface used by the document formatter.
//!
//! Coordinates are millimetres from the top-left corner of the page; text is
//! positioned by its baseline. The formatter only ever draws on the last page.

use crate::{
    ExportError, ResultExport,
    metrics::{self, Font},
};

/// A4 portrait, in millimetres.
pub const A4: (f64, f64) = (210.0, 297.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const INK: Rgb = Rgb(40, 40, 40);
    pub const BODY: Rgb = Rgb(60, 60, 60);
    pub const MUTED: Rgb = Rgb(100, 100, 100);
    pub const FAINT: Rgb = Rgb(150, 150, 150);
    pub const RULE: Rgb = Rgb(200, 200, 200);
    pub const SHADE: Rgb = Rgb(248, 249, 250);
}

pub trait Canvas {
    /// Page width and height.
    fn page_size(&self) -> (f64, f64);

    fn page_count(&self) -> usize;

    /// Starts a new page; later drawing goes there.
    fn add_page(&mut self);

    fn set_font(&mut self, font: Font, size: f64);

    /// Current font and size in points.
    fn font(&self) -> (Font, f64);

    fn set_text_color(&mut self, color: Rgb);

    fn text(&mut self, text: &str, x: f64, y: f64);

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, width: f64);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);

    /// Width of `text` in the current font.
    fn text_width(&self, text: &str) -> f64 {
        let (font, size) = self.font();
        metrics::text_width(text, font, size)
    }
}

pub(crate) fn check_page_size(width: f64, height: f64) -> ResultExport<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ExportError::InvalidPage(format!("{width} x {height}")))
    }
}

/// Something drawn on a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        color: Rgb,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
        width: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
}

/// Canvas that keeps the drawing operations instead of rendering them.
///
/// Used for text previews of a document, to inspect layouts, and as the page
/// buffer of [`PdfCanvas`](crate::PdfCanvas).
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    size: (f64, f64),
    pages: Vec<Vec<DrawOp>>,
    font: (Font, f64),
    color: Rgb,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> ResultExport<Self> {
        check_page_size(width, height)?;
        Ok(Self::with_size((width, height)))
    }

    pub fn a4() -> Self {
        Self::with_size(A4)
    }

    fn with_size(size: (f64, f64)) -> Self {
        Self {
            size,
            pages: vec![Vec::new()],
            font: (Font::Regular, 12.0),
            color: Rgb(0, 0, 0),
        }
    }

    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    /// Text drawn on a page, in drawing order.
    pub fn page_text(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|ops| {
                ops.iter()
                    .filter_map(|op| match op {
                        DrawOp::Text { text, .. } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All text of the document, one entry per drawn string.
    pub fn all_text(&self) -> Vec<&str> {
        (0..self.pages.len()).flat_map(|p| self.page_text(p)).collect()
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> (f64, f64) {
        self.size
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn set_font(&mut self, font: Font, size: f64) {
        self.font = (font, size);
    }

    fn font(&self) -> (Font, f64) {
        self.font
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn text(&mut self, text: &str, x: f64, y: f64) {
        let (font, size) = self.font;
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font,
            size,
            color: self.color,
        });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, width: f64) {
        self.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_pages() {
        assert!(matches!(
            RecordingCanvas::new(0.0, 297.0),
            Err(ExportError::InvalidPage(_))
        ));
        assert!(RecordingCanvas::new(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn records_text_per_page() {
        let mut canvas = RecordingCanvas::a4();
        canvas.text("first", 20.0, 20.0);
        canvas.add_page();
        canvas.set_font(Font::Bold, 16.0);
        canvas.set_text_color(Rgb::MUTED);
        canvas.text("second", 20.0, 20.0);

        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.page_text(1), ["second"]);
        assert_eq!(canvas.all_text(), ["first", "second"]);
        assert!(matches!(
            canvas.pages()[1][0],
            DrawOp::Text {
                font: Font::Bold,
                color: Rgb::MUTED,
                ..
            }
        ));
    }
}
