//! Positioned-word documents from `pdftotext -bbox`
//!
//! The bbox output is an XHTML document with one `<page>` element per page
//! and one `<word xMin yMin xMax yMax>` element per word. Words are
//! regrouped into visual lines by their top coordinate, then joined so the
//! visual gap between columns becomes a two-space run.

use crate::app::models::RawLine;
use crate::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;

/// A word with its bounding box in PDF points, origin at the top-left
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedWord {
    pub text: String,
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PositionedWord {
    pub fn new(text: impl Into<String>, x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            text: text.into(),
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

/// `[xMin, yMin, xMax, yMax]` of a word element, `None` if any is unreadable
fn word_box(element: &BytesStart<'_>) -> Result<Option<[f64; 4]>> {
    let mut coords: [Option<f64>; 4] = [None; 4];

    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::extraction_failed(format!("Malformed bbox attribute: {}", e)))?;
        let slot = match attr.key.as_ref() {
            b"xMin" => 0,
            b"yMin" => 1,
            b"xMax" => 2,
            b"yMax" => 3,
            _ => continue,
        };
        let value = attr
            .unescape_value()
            .map_err(|e| Error::extraction_failed(format!("Malformed bbox attribute: {}", e)))?;
        coords[slot] = value.trim().parse::<f64>().ok();
    }

    Ok(match coords {
        [Some(x_min), Some(y_min), Some(x_max), Some(y_max)] => Some([x_min, y_min, x_max, y_max]),
        _ => None,
    })
}

/// Split a bbox document into the words of each page
///
/// Every `<page>` element yields an entry, empty or not, so page numbers
/// stay aligned with the PDF. Words with unreadable coordinates are dropped.
pub fn parse_bbox_document(document: &str) -> Result<Vec<Vec<PositionedWord>>> {
    let mut reader = Reader::from_str(document);
    let mut pages: Vec<Vec<PositionedWord>> = Vec::new();
    let mut word: Option<([f64; 4], String)> = None;
    let mut in_word = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::extraction_failed(format!(
                "Malformed bbox document at byte {}: {}",
                reader.error_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"page" => {
                pages.push(Vec::new());
            }
            Event::Start(e) if e.name().as_ref() == b"word" => {
                in_word = true;
                word = word_box(&e)?.map(|coords| (coords, String::new()));
            }
            Event::Text(e) if in_word => {
                if let Some((_, text)) = word.as_mut() {
                    let unescaped = e
                        .unescape()
                        .map_err(|e| Error::extraction_failed(format!("Malformed word text: {}", e)))?;
                    text.push_str(&unescaped);
                }
            }
            Event::End(e) if e.name().as_ref() == b"word" => {
                in_word = false;
                if let (Some(([x_min, y_min, x_max, y_max], text)), Some(page)) =
                    (word.take(), pages.last_mut())
                {
                    page.push(PositionedWord::new(text, x_min, y_min, x_max, y_max));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

/// Group a page's words into lines ordered top to bottom
///
/// Words share a line when their top coordinates agree to one decimal
/// place. Within a line words run left to right; a horizontal gap of at
/// least `column_gap` points becomes two spaces, anything smaller one.
/// Line numbers are 1-based in sorted order.
pub fn group_words_into_lines(words: &[PositionedWord], page: u32, column_gap: f64) -> Vec<RawLine> {
    let mut rows: BTreeMap<i64, Vec<&PositionedWord>> = BTreeMap::new();
    for word in words {
        let key = (word.y_min * 10.0).round() as i64;
        rows.entry(key).or_default().push(word);
    }

    rows.into_values()
        .enumerate()
        .map(|(index, mut row)| {
            row.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));

            let mut text = String::new();
            let mut previous: Option<&PositionedWord> = None;
            for word in row {
                if let Some(prev) = previous {
                    if word.x_min - prev.x_max >= column_gap {
                        text.push_str("  ");
                    } else {
                        text.push(' ');
                    }
                }
                text.push_str(&word.text);
                previous = Some(word);
            }

            RawLine::new(page, index as u32 + 1, text)
        })
        .collect()
}
