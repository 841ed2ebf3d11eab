//! Exit codes following sysexits.h conventions.
//!
//! These codes let scripts tell a mismatch apart from a missing file or a
//! crash.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Command line usage error (malformed hash argument).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Data format error (hash mismatch, images not similar).
/// Maps to EX_DATAERR from sysexits.h.
pub const VERIFICATION_FAILED: i32 = 65;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// I/O error (cannot write output).
/// Maps to EX_IOERR from sysexits.h.
pub const IO_ERROR: i32 = 74;

/// Represents an exit code with optional error context.
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        // Typed core errors first, then context strings
        let code = if err.chain().any(|e| {
            matches!(
                e.downcast_ref::<imprint_core::ImprintError>(),
                Some(
                    imprint_core::ImprintError::InvalidHashLength { .. }
                        | imprint_core::ImprintError::InvalidHex(_)
                )
            )
        }) {
            USAGE_ERROR
        } else if message.contains("Failed to read file") {
            INPUT_ERROR
        } else if message.contains("Verification failed") || message.contains("not similar") {
            VERIFICATION_FAILED
        } else if message.contains("Failed to write") || message.contains("serialize") {
            IO_ERROR
        } else {
            GENERAL_ERROR
        };

        Self {
            code,
            message: Some(message),
        }
    }
}
