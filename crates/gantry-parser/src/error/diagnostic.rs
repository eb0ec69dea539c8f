//! The core diagnostic type for the Gantry error system.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A rich diagnostic message with source location information.
///
/// A diagnostic carries a severity, an optional error code, a primary
/// message, labeled source spans, and optional help text. The CLI adapts
/// these into terminal reports with source excerpts.
///
/// # Example
///
/// ```
/// # use gantry_parser::error::{Diagnostic, ErrorCode};
/// # use gantry_parser::Span;
///
/// let diag = Diagnostic::error("body is never closed")
///     .with_code(ErrorCode::E101)
///     .with_label(Span::new(14..15), "body opened here")
///     .with_help("add the matching `}`");
/// assert_eq!(diag.to_string(), "error[E101]: body is never closed");
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Start an error-severity diagnostic with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Start a warning-severity diagnostic with the given message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// The severity this diagnostic was created with.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The stable error code, when one was attached.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// The headline message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every label attached so far, in attachment order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The help text, when one was attached.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Attach a stable error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a primary label pointing at `span`.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Attach a secondary label pointing at `span`.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Attach help text suggesting a fix.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{code}]: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
