//! Bridges library errors into miette reports.
//!
//! The library keeps its error types free of any rendering concern, so the
//! CLI wraps them here. A parse failure carries a batch of diagnostics and
//! each one becomes its own report with source snippet and labels; every
//! other failure becomes a single plain report.

use std::{error::Error, fmt};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use gantry::GantryError;
use gantry_parser::Diagnostic;

/// One renderable unit of a [`GantryError`].
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parser diagnostic together with the source it points into.
    Diagnostic { diag: &'a Diagnostic, src: &'a str },
    /// An error with no source location to show.
    Plain(&'a GantryError),
}

/// Splits an error into the reports miette should render.
///
/// A parse error yields one [`Reportable`] per diagnostic so that every
/// problem in the input gets its own snippet. Anything else yields a single
/// plain report.
pub fn to_reportables(err: &GantryError) -> Vec<Reportable<'_>> {
    match err {
        GantryError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Diagnostic { diag, src })
            .collect(),
        other => vec![Reportable::Plain(other)],
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic { diag, .. } => f.write_str(diag.message()),
            Reportable::Plain(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Reportable::Diagnostic { .. } => None,
            Reportable::Plain(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic { diag, .. } => {
                diag.code().map(|c| Box::new(c) as Box<dyn fmt::Display>)
            }
            Reportable::Plain(err) => {
                let code = match err {
                    GantryError::Io(_) => "gantry::io",
                    GantryError::Export(_) => "gantry::export",
                    GantryError::Parse { .. } => return None,
                };
                Some(Box::new(code))
            }
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic { diag, .. } => {
                diag.help().map(|h| Box::new(h) as Box<dyn fmt::Display>)
            }
            Reportable::Plain(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic { src, .. } => Some(src as &dyn miette::SourceCode),
            Reportable::Plain(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Diagnostic { diag, .. } = self else {
            return None;
        };
        let labels = diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let message = Some(label.message().to_string());
            let span = to_source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn to_source_span(span: gantry_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

#[cfg(test)]
mod tests {
    use gantry_parser::{ErrorCode, ParseError, Span};

    use super::*;

    #[test]
    fn test_parse_error_becomes_one_report_per_diagnostic() {
        let diags = vec![
            Diagnostic::error("no definitions found")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(0..4), "input starts here"),
            Diagnostic::error("unterminated comment")
                .with_code(ErrorCode::E101)
                .with_label(Span::new(8..12), "opened here")
                .with_help("close the comment with `*/`"),
            Diagnostic::error("stray token").with_label(Span::new(16..19), "unexpected"),
        ];
        let err = GantryError::new_parse_error(ParseError::new(diags), "part def Vehicle {}");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 3);
        assert_eq!(reportables[0].to_string(), "no definitions found");
        assert_eq!(reportables[1].to_string(), "unterminated comment");
        assert_eq!(reportables[2].to_string(), "stray token");
    }

    #[test]
    fn test_diagnostic_report_carries_code_and_source() {
        let diag = Diagnostic::error("nothing to diagram")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(0..2), "only comments here");
        let err = GantryError::new_parse_error(ParseError::from(diag), "// empty model");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let code = reportables[0].code().expect("Diagnostic should carry a code");
        assert_eq!(code.to_string(), "E100");
        assert!(reportables[0].source_code().is_some());
    }

    #[test]
    fn test_export_error_becomes_plain_report() {
        let err = GantryError::Export("missing geometry".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].to_string(),
            "Export error: missing geometry"
        );
        assert!(reportables[0].source_code().is_none());
        assert!(reportables[0].labels().is_none());
    }

    #[test]
    fn test_all_labels_survive_the_conversion() {
        let diag = Diagnostic::error("duplicate definition")
            .with_label(Span::new(21..28), "redefined here")
            .with_secondary_label(Span::new(0..7), "first defined here");
        let report = Reportable::Diagnostic {
            diag: &diag,
            src: "part def Engine {}\n\npart def Engine {}",
        };

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("redefined here"));
        assert_eq!(labels[1].label(), Some("first defined here"));
    }

    #[test]
    fn test_primary_flag_survives_the_conversion() {
        let diag = Diagnostic::error("duplicate definition")
            .with_label(Span::new(21..28), "redefined here")
            .with_secondary_label(Span::new(0..7), "first defined here");
        let report = Reportable::Diagnostic {
            diag: &diag,
            src: "part def Engine {}\n\npart def Engine {}",
        };

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }
}
