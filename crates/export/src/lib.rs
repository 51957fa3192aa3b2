//! Printable menus.
//!
//! A [`MenuDocument`] is laid out by [`DocumentFormatter`] on any [`Canvas`]:
//! [`PdfCanvas`] produces the file handed to customers, [`RecordingCanvas`]
//! keeps the drawn text for previews.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub use canvas::{A4, Canvas, DrawOp, RecordingCanvas, Rgb};
pub use document::{
    BusinessInfo, CategorySection, DocumentLine, MenuDocument, PackageTotals, default_terms,
    filename,
};
pub use formatter::DocumentFormatter;
pub use metrics::{Font, text_width, wrap_text};
pub use pdf::PdfCanvas;

mod canvas;
mod document;
mod formatter;
mod metrics;
mod pdf;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid page geometry: {0}")]
    InvalidPage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ResultExport<T> = Result<T, ExportError>;

/// Renders the document on A4 pages into `output`.
pub fn render_pdf(doc: &MenuDocument, output: File) -> ResultExport<()> {
    let mut canvas = PdfCanvas::a4();
    let pages = DocumentFormatter::new(&mut canvas).render(doc);
    tracing::debug!(pages, sections = doc.sections.len(), "menu rendered");
    canvas.finish(output)?;
    Ok(())
}

/// Writes the PDF into `dir` under [`MenuDocument::filename`].
pub fn write_pdf(doc: &MenuDocument, dir: &Path) -> ResultExport<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(doc.filename());
    render_pdf(doc, File::create(&path)?)?;
    tracing::info!(path = %path.display(), total = %doc.grand_total(), "menu exported");
    Ok(path)
}

/// Text of every page, in drawing order.
pub fn preview(doc: &MenuDocument) -> Vec<Vec<String>> {
    let mut canvas = RecordingCanvas::a4();
    DocumentFormatter::new(&mut canvas).render(doc);
    (0..canvas.page_count())
        .map(|page| canvas.page_text(page).into_iter().map(String::from).collect())
        .collect()
}
