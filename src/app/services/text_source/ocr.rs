//! OCR fallback for image-only PDFs
//!
//! Pages are rendered one at a time with `pdftoppm` and recognized with
//! `tesseract`. Tesseract's output lines go to the parser as-is, so the OCR
//! path shares the text path's skip and mapping rules.

use super::LineSource;
use super::command::run_tool;
use crate::app::models::RawLine;
use crate::config::OcrConfig;
use crate::{Error, Result};
use indicatif::ProgressBar;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info};

/// Renders and recognizes every page of a scanned PDF
#[derive(Clone)]
pub struct OcrSource {
    config: OcrConfig,
    progress: ProgressBar,
}

impl OcrSource {
    pub fn new(config: OcrConfig) -> Self {
        Self {
            config,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report page progress on the given bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Number of pages, from `pdfinfo`
    pub fn page_count(&self, path: &Path) -> Result<u32> {
        let info = run_tool(
            Command::new(&self.config.pdfinfo_cmd).arg(path),
            &self.config.pdfinfo_cmd,
        )?;

        parse_page_count(&info).ok_or_else(|| {
            Error::extraction_failed(format!(
                "{} reported no page count for {}",
                self.config.pdfinfo_cmd,
                path.display()
            ))
        })
    }

    /// Render one page to a PNG inside `dir`
    fn render_page(&self, path: &Path, page: u32, dir: &Path) -> Result<PathBuf> {
        let prefix = dir.join(format!("page-{}", page));
        let page_arg = page.to_string();
        let dpi_arg = self.config.dpi.to_string();

        run_tool(
            Command::new(&self.config.pdftoppm_cmd)
                .args(["-png", "-singlefile", "-r", dpi_arg.as_str()])
                .args(["-f", page_arg.as_str(), "-l", page_arg.as_str()])
                .arg(path)
                .arg(&prefix),
            &self.config.pdftoppm_cmd,
        )?;

        let image = prefix.with_extension("png");
        if image.exists() {
            Ok(image)
        } else {
            Err(Error::extraction_failed(format!(
                "{} produced no image for page {}",
                self.config.pdftoppm_cmd, page
            )))
        }
    }

    /// Arguments for recognizing one page image to stdout
    pub fn tesseract_args(&self, image: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            image.as_os_str().to_owned(),
            "stdout".into(),
            "-l".into(),
            self.config.language.as_str().into(),
        ];
        if self.config.preserve_interword_spaces {
            args.push("-c".into());
            args.push("preserve_interword_spaces=1".into());
        }
        args
    }

    /// Recognize the text of one page image
    fn recognize(&self, image: &Path) -> Result<String> {
        run_tool(
            Command::new(&self.config.tesseract_cmd).args(self.tesseract_args(image)),
            &self.config.tesseract_cmd,
        )
    }
}

impl LineSource for OcrSource {
    fn label(&self) -> &str {
        "OCR"
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<RawLine>> {
        let pages = self.page_count(path)?;
        info!(
            "Running OCR on {} pages of {} at {} dpi",
            pages,
            path.display(),
            self.config.dpi
        );

        let temp_dir = TempDir::new().map_err(|e| Error::io("Failed to create temp dir", e))?;
        self.progress.set_length(u64::from(pages));

        let mut lines = Vec::new();
        for page in 1..=pages {
            let image = self.render_page(path, page, temp_dir.path())?;
            let text = self.recognize(&image)?;
            let page_lines = ocr_lines(page, &text);
            debug!("Page {}: {} lines", page, page_lines.len());
            lines.extend(page_lines);

            discard_page_image(&image);
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        Ok(lines)
    }
}

/// Delete a recognized page image; a failure is only logged
pub fn discard_page_image(image: &Path) -> bool {
    match std::fs::remove_file(image) {
        Ok(()) => true,
        Err(e) => {
            debug!("Could not remove {}: {}", image.display(), e);
            false
        }
    }
}

/// Extract `Pages:` from `pdfinfo` output
pub fn parse_page_count(info: &str) -> Option<u32> {
    info.lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|count| count.parse().ok())
}

/// Number every line of one page's OCR output, blanks included
pub fn ocr_lines(page: u32, text: &str) -> Vec<RawLine> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| RawLine::new(page, index as u32 + 1, line.trim_end_matches('\r')))
        .collect()
}
