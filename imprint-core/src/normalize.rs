//! Text canonicalization for content hashing.
//!
//! Extracted text from different containers (a DOCX and the TXT export of the
//! same document, say) differs in whitespace, case and Unicode representation.
//! [`normalize`] folds those differences away so the content hash only sees
//! the wording.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Zero-width code points removed during normalization.
pub const ZERO_WIDTH_CHARS: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Canonical text produced by [`normalize`].
///
/// Can only be constructed through normalization, so holding one guarantees
/// the text is already in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize raw extracted text.
///
/// Steps, in order:
/// 1. NFKC
/// 2. strip [`ZERO_WIDTH_CHARS`]
/// 3. lower-case
/// 4. collapse whitespace runs (except U+0085) to a single ASCII space
/// 5. trim
///
/// The function is total and idempotent.
pub fn normalize(text: &str) -> NormalizedText {
    let composed: String = text.nfkc().collect();

    let stripped: String = composed
        .chars()
        .filter(|c| !ZERO_WIDTH_CHARS.contains(c))
        .collect();
    // Removing a zero-width char can leave a base char directly before a
    // combining mark; compose again so a second pass is a no-op.
    let stripped = if stripped.len() == composed.len() {
        stripped
    } else {
        stripped.nfkc().collect()
    };

    let lowered = stripped.to_lowercase();

    NormalizedText(collapse_whitespace(&lowered))
}

/// Whitespace for collapsing: Unicode `White_Space` minus U+0085 (NEL), which
/// is kept as an ordinary character.
fn is_collapsible(ch: char) -> bool {
    ch.is_whitespace() && ch != '\u{0085}'
}

/// Collapse every whitespace run to one space and drop leading/trailing runs.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if is_collapsible(ch) {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    out
}
