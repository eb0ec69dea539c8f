//! Error and diagnostic system for the Gantry parser.
//!
//! The parser is tolerant by policy: unknown statements are skipped and
//! dangling references are dropped from rendering, neither surfacing here.
//! What remains are the structural failures that abort a conversion, and
//! those are reported as rich [`Diagnostic`]s with error codes, labeled
//! source spans, and help text, wrapped in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use gantry_parser::error::{Diagnostic, ErrorCode};
//! # use gantry_parser::Span;
//!
//! let diag = Diagnostic::error("body is never closed")
//!     .with_code(ErrorCode::E101)
//!     .with_label(Span::new(14..15), "body opened here")
//!     .with_secondary_label(Span::new(40..40), "input ends without the matching `}`")
//!     .with_help("add the matching `}`");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
