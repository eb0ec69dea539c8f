//! # Gantry Parser
//!
//! Parser for the SysML v2 textual subset. This crate provides the parsing
//! pipeline from source text to the semantic model consumed by the diagram
//! pipeline.
//!
//! The pipeline is deliberately hard to derail: the lexer never fails, and
//! statements the grammar does not recognize are skipped rather than
//! rejected, so a document mixing dialects or containing vendor extensions
//! still yields a diagram of everything that was understood. Only two
//! conditions are fatal: an empty document and an unclosed `{` body.
//!
//! ## Usage
//!
//! ```
//! # use gantry_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         package Vehicle {
//!             part Engine {
//!                 port FuelIn;
//!             }
//!         }
//!     "#;
//!
//!     let model = parse(source)?;
//!     assert!(model.has_definitions());
//!     Ok(())
//! }
//! ```

mod elaborate;
mod error;
mod lexer;
mod parser;
mod span;
mod tokens;
mod tree;

pub use error::{Diagnostic, ErrorCode, Label, ParseError, Severity};
pub use span::Span;

use gantry_core::model::Model;

/// Parse SysML v2 source text into a semantic model.
///
/// This is the main entry point for the crate. It orchestrates the complete
/// parsing pipeline:
///
/// 1. **Tokenize** - Convert source text to positioned tokens
/// 2. **Parse** - Build a parse tree, skipping unrecognized statements
/// 3. **Elaborate** - Resolve names and produce the semantic model
///
/// # Arguments
///
/// * `source` - The SysML v2 source text to parse
///
/// # Returns
///
/// Returns the elaborated [`Model`] on success, or a [`ParseError`] carrying
/// one diagnostic per fatal condition. Recoverable problems (unknown
/// statements, dangling transitions, unresolvable types) never surface here;
/// they are logged and the affected construct is skipped or kept dangling.
///
/// # Example
///
/// ```
/// # use gantry_parser::{parse, ParseError};
///
/// fn main() -> Result<(), ParseError> {
///     let model = parse("part def Engine;")?;
///     assert_eq!(model.element_count(), 1);
///     Ok(())
/// }
/// ```
pub fn parse(source: &str) -> Result<Model, ParseError> {
    // Step 1: Tokenize
    let tokens = lexer::tokenize(source);

    // Step 2: Parse
    let forest = parser::build_tree(&tokens)?;

    // Step 3: Elaborate
    Ok(elaborate::build_model(&forest))
}
