//! Error types for the word-finder service, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (W001-W003) for documentation lookup:
//!
//! - W001: `StoreUnavailable` (The dictionary store could not be initialized)
//! - W002: `WordlistEmpty` (The wordlist source yielded no usable entries)
//! - W003: `CapacityExceeded` (All concurrent search slots are taken)
//!
//! Invalid *filter input* (out-of-range pins, stray characters) is deliberately
//! not represented here: it is dropped during sanitization and the request
//! proceeds with whatever signal remains. Only conditions that make a request
//! unanswerable become errors.

use std::io;

/// Failure modes for a single search request.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// The backing wordlist could not be read on first-use load.
    #[error("dictionary store unavailable ('{path}'): {source}")]
    StoreUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The wordlist was readable but contained no valid `a-z` entries, so
    /// every query would silently return nothing. Treated as a setup failure.
    #[error("wordlist '{path}' contains no usable entries")]
    WordlistEmpty { path: String },

    /// The admission gate denied entry; the caller should retry later.
    #[error("server busy, please wait and try again")]
    CapacityExceeded,
}

impl FinderError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            FinderError::StoreUnavailable { .. } => "W001",
            FinderError::WordlistEmpty { .. } => "W002",
            FinderError::CapacityExceeded => "W003",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            FinderError::StoreUnavailable { .. } => {
                Some("Check that the wordlist file exists and is readable (--wordlist <PATH>)")
            }
            FinderError::WordlistEmpty { .. } => {
                Some("The wordlist must contain one word per line, letters a-z only")
            }
            FinderError::CapacityExceeded => None, // transient; retrying is the fix
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(
    base_msg: &str,
    code: &str,
    help: Option<&str>,
) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
