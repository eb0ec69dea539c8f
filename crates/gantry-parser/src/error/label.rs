//! Source annotations that diagnostics point at.

use crate::span::Span;

/// A message anchored to a span of the input.
///
/// A primary label marks the main location of a problem; secondary labels
/// add context, such as where the input ran out while a body was still open.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    fn new(span: Span, message: impl Into<String>, primary: bool) -> Self {
        Self {
            span,
            message: message.into(),
            primary,
        }
    }

    /// A label marking the main problem site.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message, true)
    }

    /// A label adding context around the main site.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message, false)
    }

    /// Where in the source this label points.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The text shown next to the span.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this label marks the main site.
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// Whether this label only adds context.
    pub fn is_secondary(&self) -> bool {
        !self.primary
    }
}
