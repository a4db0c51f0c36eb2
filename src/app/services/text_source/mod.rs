//! Line sources for the PDF-derived ingestion paths
//!
//! Each source turns one input artifact into the ordered [`RawLine`]s the
//! tabular line parser consumes:
//! - [`PdfTextSource`] - positioned words from `pdftotext -bbox`, regrouped into lines
//! - [`OcrSource`] - page images from `pdftoppm`, recognized by `tesseract`
//! - [`TextFileSource`] - text already extracted, pages separated by form feeds
//!
//! The external tools are collaborators, reached through [`command`].

pub mod bbox;
pub mod command;
pub mod ocr;
pub mod pdf_text;
pub mod text_file;

#[cfg(test)]
mod tests;

use crate::Result;
use crate::app::models::RawLine;
use std::path::Path;

pub use ocr::OcrSource;
pub use pdf_text::PdfTextSource;
pub use text_file::TextFileSource;

/// Something that yields table lines from an input artifact
pub trait LineSource {
    /// Name used in drift messages ("Parsing", "OCR")
    fn label(&self) -> &str;

    /// Read all lines in page order, top to bottom
    fn read_lines(&self, path: &Path) -> Result<Vec<RawLine>>;
}
