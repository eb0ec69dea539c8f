//! Command-line argument definitions for the gantry CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the diagram flavor,
//! configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

use gantry::DiagramKind;

/// Command-line arguments for the gantry diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input model file
    #[arg(help = "Path to the input file, or - to read standard input")]
    pub input: String,

    /// Diagram flavor to emit
    #[arg(short, long, value_enum, default_value_t = DiagramArg::Block)]
    pub diagram: DiagramArg,

    /// Path to the output DOT file, or - for standard output
    /// (default: <input stem>_<diagram>.dot)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to the output SVG file, or - for standard output
    /// (default: <input stem>_<diagram>.svg)
    #[arg(long)]
    pub svg_output: Option<String>,

    /// Render the DOT text through the external Graphviz `dot` binary
    /// into this file; the format follows the file extension
    #[cfg(feature = "graphviz")]
    #[arg(long)]
    pub render: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Diagram flavor as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiagramArg {
    /// Definition-level view
    Block,
    /// Part-and-port view
    Internal,
}

impl From<DiagramArg> for DiagramKind {
    fn from(arg: DiagramArg) -> Self {
        match arg {
            DiagramArg::Block => DiagramKind::Block,
            DiagramArg::Internal => DiagramKind::Internal,
        }
    }
}
