//! Error types for diagram conversion.

use std::io;

use thiserror::Error;

use gantry_parser::ParseError;

/// Everything that can go wrong between source text and a written payload.
///
/// `Parse` keeps the offending source alongside the diagnostics so a
/// frontend can render annotated excerpts. The other variants carry plain
/// messages.
#[derive(Debug, Error)]
pub enum GantryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Export error: {0}")]
    Export(String),
}

impl GantryError {
    /// Wrap parse diagnostics together with the source they point into.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
