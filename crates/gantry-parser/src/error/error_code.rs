//! Error codes for the Gantry diagnostic system.
//!
//! Only structural problems carry codes: the parser degrades on everything
//! else (unknown statements are skipped, dangling references are dropped from
//! rendering), which keeps the code space small.

use std::fmt;

/// Stable identifiers for the structural failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Empty document.
    ///
    /// The source contains no tokens at all, once whitespace and comments
    /// are stripped. There is nothing to convert.
    E100,

    /// Unclosed body.
    ///
    /// A `{` opened a body that is still open when the input ends. The
    /// diagnostic points at the offending opening brace.
    E101,
}

impl ErrorCode {
    /// The code as text, e.g. "E101".
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
        }
    }

    /// One-line account of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "the source contains no content to parse",
            ErrorCode::E101 => "a brace body is opened but never closed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
