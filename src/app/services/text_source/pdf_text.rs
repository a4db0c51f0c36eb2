//! Direct text extraction from a text-layer PDF

use super::LineSource;
use super::bbox::{group_words_into_lines, parse_bbox_document};
use super::command::run_tool;
use crate::Result;
use crate::app::models::RawLine;
use crate::config::{ParserConfig, PdfTextConfig};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Reads positioned words with `pdftotext -bbox` and regroups them into lines
#[derive(Debug, Clone)]
pub struct PdfTextSource {
    pdftotext_cmd: String,
    column_gap: f64,
}

impl PdfTextSource {
    pub fn new(pdf_text: &PdfTextConfig, parser: &ParserConfig) -> Self {
        Self {
            pdftotext_cmd: pdf_text.pdftotext_cmd.clone(),
            column_gap: parser.column_gap,
        }
    }

    /// Convert a bbox document into ordered lines, skipping wordless pages
    pub fn lines_from_bbox(&self, document: &str) -> Result<Vec<RawLine>> {
        let mut lines = Vec::new();

        for (index, words) in parse_bbox_document(document)?.iter().enumerate() {
            let page = index as u32 + 1;
            if words.is_empty() {
                debug!("Page {} has no words", page);
                continue;
            }
            lines.extend(group_words_into_lines(words, page, self.column_gap));
        }

        Ok(lines)
    }
}

impl LineSource for PdfTextSource {
    fn label(&self) -> &str {
        "Parsing"
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<RawLine>> {
        info!("Extracting positioned text from {}", path.display());

        let document = run_tool(
            Command::new(&self.pdftotext_cmd).arg("-bbox").arg(path).arg("-"),
            &self.pdftotext_cmd,
        )?;

        let lines = self.lines_from_bbox(&document)?;
        info!("Recovered {} lines", lines.len());
        Ok(lines)
    }
}
