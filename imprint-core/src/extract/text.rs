use std::borrow::Cow;

/// Decode as UTF-8, replacing malformed sequences with U+FFFD.
pub(super) fn extract_lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_owned(),
        Cow::Owned(s) => {
            tracing::debug!("Replaced malformed UTF-8 sequences");
            s
        }
    }
}

/// Decode as UTF-8, or `None` if the bytes are not valid UTF-8.
pub(super) fn extract_strict(bytes: &[u8]) -> Option<String> {
    std::str::from_utf8(bytes).ok().map(str::to_owned)
}
