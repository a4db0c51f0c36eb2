//! Pre-extracted text with form-feed page breaks

use super::LineSource;
use crate::app::models::RawLine;
use crate::{Error, Result};
use std::path::Path;
use tracing::info;

/// Reads a text file the way `pdftotext` writes one: pages end with `\x0c`
#[derive(Debug, Clone)]
pub struct TextFileSource {
    label: String,
}

impl TextFileSource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl LineSource for TextFileSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<RawLine>> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
        let text = String::from_utf8_lossy(&bytes);

        let lines = paged_lines(&text);
        info!("Read {} lines from {}", lines.len(), path.display());
        Ok(lines)
    }
}

/// Split text into pages on form feeds and number lines within each page
pub fn paged_lines(text: &str) -> Vec<RawLine> {
    let mut pages: Vec<&str> = text.split('\x0c').collect();
    // A trailing form feed closes the last page rather than opening a new one
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }

    pages
        .into_iter()
        .enumerate()
        .flat_map(|(page_index, page)| {
            page.lines().enumerate().map(move |(index, line)| {
                RawLine::new(page_index as u32 + 1, index as u32 + 1, line)
            })
        })
        .collect()
}
