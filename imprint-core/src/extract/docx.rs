//! DOCX text extraction.
//!
//! A DOCX file is a ZIP package; the body lives in `word/document.xml` as
//! WordprocessingML. Visible text is carried by `w:t` runs, so everything else
//! (formatting, fields, drawing markup) is dropped.

use std::io::{Cursor, Read};

use super::{DocumentFormat, ExtractError};

/// Main document part inside the package.
const DOCUMENT_PART: &str = "word/document.xml";

/// WordprocessingML main namespace.
const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Cap on the inflated size of the document part.
const MAX_DOCUMENT_XML_BYTES: u64 = 256 * 1024 * 1024;

/// Markup Compatibility namespace (`mc:AlternateContent`).
const MC_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";

fn decode_error(reason: impl Into<String>) -> ExtractError {
    ExtractError::Decode {
        format: DocumentFormat::Docx,
        reason: reason.into(),
    }
}

pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    extract_limited(bytes, MAX_DOCUMENT_XML_BYTES)
}

fn extract_limited(bytes: &[u8], limit: u64) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| decode_error(format!("invalid ZIP package: {e}")))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| decode_error(format!("missing {DOCUMENT_PART}: {e}")))?;

    // The declared size is untrusted; count what is actually inflated
    let mut buf = Vec::new();
    part.by_ref()
        .take(limit + 1)
        .read_to_end(&mut buf)
        .map_err(|e| decode_error(format!("unreadable {DOCUMENT_PART}: {e}")))?;
    if buf.len() as u64 > limit {
        return Err(decode_error(format!(
            "{DOCUMENT_PART} inflates beyond {limit} bytes"
        )));
    }

    let xml = String::from_utf8(buf)
        .map_err(|e| decode_error(format!("{DOCUMENT_PART} is not UTF-8: {e}")))?;
    text_from_document_xml(&xml)
}

/// Collect text runs in document order, one line per paragraph.
///
/// Only the first branch of each `mc:AlternateContent` is visited; Word writes
/// text boxes twice (DrawingML choice plus VML fallback).
fn text_from_document_xml(xml: &str) -> Result<String, ExtractError> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| decode_error(format!("malformed {DOCUMENT_PART}: {e}")))?;

    let mut out = String::new();
    let mut stack = vec![doc.root_element()];

    while let Some(node) = stack.pop() {
        let tag = node.tag_name();

        if tag.namespace() == Some(MC_NS) && tag.name() == "AlternateContent" {
            if let Some(branch) = node.children().find(|c| c.is_element()) {
                stack.push(branch);
            }
            continue;
        }

        if tag.namespace() == Some(WORDML_NS) {
            match tag.name() {
                "p" if !out.is_empty() => out.push('\n'),
                "t" => out.push_str(node.text().unwrap_or_default()),
                "tab" => out.push('\t'),
                "br" | "cr" => out.push('\n'),
                _ => {}
            }
        }

        // Reverse so children pop in document order
        stack.extend(node.children().filter(|c| c.is_element()).rev());
    }

    Ok(out)
}
