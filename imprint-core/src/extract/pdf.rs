//! PDF text extraction.
//!
//! Pages are visited in page-number order and each page's content stream is
//! scanned for the text-showing operators (`Tj`, `TJ`, `'`, `"`). Strings are
//! taken in the order they are emitted; no reading-order reconstruction is
//! attempted, so multi-column layouts come out in whatever order the producer
//! wrote them.
//!
//! Glyph strings are decoded as UTF-16BE when they carry a byte-order mark and
//! byte-per-char otherwise. Fonts with custom encodings or CID fonts without a
//! usable mapping produce garbage or nothing; scanned PDFs produce nothing at
//! all. Neither is an error.

use lopdf::content::Content;
use lopdf::{Document, Object};
use tracing::{debug, warn};

use super::{DocumentFormat, ExtractError};

/// `TJ` adjustments below this (in thousandths of an em) are read as a word gap.
const TJ_WORD_GAP: f32 = -200.0;

fn decode_error(reason: impl Into<String>) -> ExtractError {
    ExtractError::Decode {
        format: DocumentFormat::Pdf,
        reason: reason.into(),
    }
}

pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| decode_error(e.to_string()))?;

    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(decode_error("document has no pages"));
    }

    let mut out = String::new();
    for (page_number, page_id) in pages {
        let data = doc
            .get_page_content(page_id)
            .map_err(|e| decode_error(format!("page {page_number}: {e}")))?;
        let content = Content::decode(&data)
            .map_err(|e| decode_error(format!("page {page_number} content stream: {e}")))?;

        let runs = text_runs(&content);
        debug!(page = page_number, runs = runs.len(), "Extracted page text");

        out.push_str(&runs.join(" "));
        out.push('\n');
    }

    if out.trim().is_empty() {
        warn!("PDF has no extractable text (image-only or unmapped fonts)");
    }

    Ok(out)
}

/// Strings shown by text operators, one entry per operator.
fn text_runs(content: &Content) -> Vec<String> {
    let mut runs = Vec::new();

    for op in &content.operations {
        let run = match op.operator.as_str() {
            "Tj" | "'" => op.operands.last().and_then(string_operand),
            // aw ac string "
            "\"" => op.operands.get(2).and_then(string_operand),
            "TJ" => op.operands.first().map(tj_array),
            _ => None,
        };

        if let Some(run) = run.filter(|r| !r.is_empty()) {
            runs.push(run);
        }
    }

    runs
}

fn string_operand(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        _ => None,
    }
}

/// Flatten a `TJ` array of strings and kerning adjustments.
fn tj_array(obj: &Object) -> String {
    let Object::Array(items) = obj else {
        return string_operand(obj).unwrap_or_default();
    };

    let mut out = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => out.push_str(&decode_pdf_string(bytes)),
            other => {
                if let Ok(adjust) = other.as_float() {
                    if adjust < TJ_WORD_GAP && !out.ends_with(' ') {
                        out.push(' ');
                    }
                }
            }
        }
    }
    out
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}
