//! PDF backend.
//!
//! Drawing is buffered page by page in a [`RecordingCanvas`] and handed to
//! `pdf_canvas` when the document is finished, since the writer renders one
//! page at a time. Text is set in the base-14 Helvetica faces.

use std::{fs::File, io};

use pdf_canvas::{Canvas as PdfPage, Pdf, graphicsstate::Color};

use crate::{
    ResultExport,
    canvas::{Canvas, DrawOp, RecordingCanvas, Rgb},
    metrics::{Font, MM_PER_PT},
};

#[derive(Clone, Debug)]
pub struct PdfCanvas {
    pages: RecordingCanvas,
}

impl PdfCanvas {
    pub fn new(width: f64, height: f64) -> ResultExport<Self> {
        Ok(Self {
            pages: RecordingCanvas::new(width, height)?,
        })
    }

    pub fn a4() -> Self {
        Self {
            pages: RecordingCanvas::a4(),
        }
    }

    /// Writes every page to `output`.
    pub fn finish(self, output: File) -> io::Result<()> {
        let (width, height) = self.pages.page_size();
        let (width, height) = (pt(width), pt(height));

        let mut pdf = Pdf::new(output)?;
        for ops in self.pages.pages() {
            pdf.render_page(width, height, |page| {
                for op in ops {
                    draw(page, op, height)?;
                }
                Ok(())
            })?;
        }
        pdf.finish()
    }
}

impl Canvas for PdfCanvas {
    fn page_size(&self) -> (f64, f64) {
        self.pages.page_size()
    }

    fn page_count(&self) -> usize {
        self.pages.page_count()
    }

    fn add_page(&mut self) {
        self.pages.add_page();
    }

    fn set_font(&mut self, font: Font, size: f64) {
        self.pages.set_font(font, size);
    }

    fn font(&self) -> (Font, f64) {
        self.pages.font()
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.pages.set_text_color(color);
    }

    fn text(&mut self, text: &str, x: f64, y: f64) {
        self.pages.text(text, x, y);
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, width: f64) {
        self.pages.line(from, to, color, width);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.pages.fill_rect(x, y, width, height, color);
    }
}

/// Replays one operation; PDF space has its origin at the bottom left.
fn draw(page: &mut PdfPage<'_>, op: &DrawOp, page_height: f32) -> io::Result<()> {
    match op {
        DrawOp::Text {
            text,
            x,
            y,
            font,
            size,
            color,
        } => {
            page.set_fill_color(color_of(*color))?;
            page.left_text(pt(*x), page_height - pt(*y), font.builtin(), *size as f32, text)
        }
        DrawOp::Line {
            from,
            to,
            color,
            width,
        } => {
            page.set_stroke_color(color_of(*color))?;
            page.set_line_width(pt(*width))?;
            page.line(
                pt(from.0),
                page_height - pt(from.1),
                pt(to.0),
                page_height - pt(to.1),
            )?;
            page.stroke()
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            page.set_fill_color(color_of(*color))?;
            page.rectangle(pt(*x), page_height - pt(y + height), pt(*width), pt(*height))?;
            page.fill()
        }
    }
}

fn pt(mm: f64) -> f32 {
    (mm / MM_PER_PT) as f32
}

fn color_of(Rgb(r, g, b): Rgb) -> Color {
    Color::rgb(r, g, b)
}
