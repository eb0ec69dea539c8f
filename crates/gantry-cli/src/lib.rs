//! CLI logic for the gantry diagram tool.
//!
//! This module contains the core CLI logic for the gantry diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, DiagramArg};

use std::{fs, io, io::Write, path::Path};

use log::{info, warn};

use gantry::{DiagramBuilder, DiagramKind, GantryError};

/// Failure stage of a run, selecting the process exit code.
///
/// Input and conversion problems exit with 1, destination problems with 2,
/// so scripts can tell a bad model apart from a bad output location.
#[derive(Debug)]
pub enum CliError {
    /// Reading or converting the input failed.
    Convert(GantryError),
    /// Writing a payload or invoking the external renderer failed.
    Output(GantryError),
}

impl CliError {
    /// The underlying error, for reporting.
    pub fn inner(&self) -> &GantryError {
        match self {
            CliError::Convert(err) | CliError::Output(err) => err,
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Convert(_) => 1,
            CliError::Output(_) => 2,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.inner(), f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner())
    }
}

/// Run the gantry CLI application
///
/// This function reads the input document, converts it through the gantry
/// pipeline, and writes the DOT and SVG payloads to their destinations.
/// Both payloads are rendered before anything is written, so a failed
/// conversion never leaves partial output behind.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError::Convert` for:
/// - Input read errors
/// - Configuration loading errors
/// - Parsing errors
/// - Rendering errors
///
/// Returns `CliError::Output` for:
/// - Payload write errors
/// - External Graphviz render errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(input_path = args.input; "Processing model");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref()).map_err(CliError::Convert)?;

    // Read the input document
    let source = read_source(&args.input)
        .map_err(|err| CliError::Convert(GantryError::Io(err)))?;

    // Convert through the DiagramBuilder API
    let kind = DiagramKind::from(args.diagram);
    let builder = DiagramBuilder::new(app_config);
    let model = builder.parse(&source).map_err(CliError::Convert)?;

    if !model.has_definitions() {
        warn!("No block definitions were found in the input");
    }

    let dot = builder.render_dot(&model, kind).map_err(CliError::Convert)?;
    let svg = builder.render_svg(&model, kind).map_err(CliError::Convert)?;

    // Write both payloads
    let stem = input_stem(&args.input);
    let dot_path = args
        .output
        .clone()
        .unwrap_or_else(|| format!("{stem}_{kind}.dot"));
    let svg_path = args
        .svg_output
        .clone()
        .unwrap_or_else(|| format!("{stem}_{kind}.svg"));

    write_payload(&dot_path, &dot).map_err(CliError::Output)?;
    write_payload(&svg_path, &svg).map_err(CliError::Output)?;

    #[cfg(feature = "graphviz")]
    if let Some(render_path) = &args.render {
        render_with_graphviz(&dot, render_path).map_err(CliError::Output)?;
    }

    info!("All payloads exported successfully");

    Ok(())
}

/// Read the whole document, from a file or standard input for `-`.
fn read_source(input: &str) -> io::Result<String> {
    if input == "-" {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(input)
    }
}

/// File stem used for default output names; stdin reads get a fixed stem.
fn input_stem(input: &str) -> String {
    if input == "-" {
        return "diagram".to_string();
    }
    Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "diagram".to_string())
}

/// Write one payload to its destination, with `-` meaning standard output.
fn write_payload(path: &str, payload: &str) -> Result<(), GantryError> {
    if path == "-" {
        io::stdout()
            .write_all(payload.as_bytes())
            .map_err(GantryError::Io)?;
        return Ok(());
    }

    fs::write(path, payload).map_err(GantryError::Io)?;

    let resolved = fs::canonicalize(path)
        .map(|resolved| resolved.display().to_string())
        .unwrap_or_else(|_| path.to_string());
    println!("Diagram written to {resolved}");
    Ok(())
}

/// Render the DOT text through the external Graphviz binary.
///
/// The output format follows the destination file extension.
#[cfg(feature = "graphviz")]
fn render_with_graphviz(dot: &str, path: &str) -> Result<(), GantryError> {
    use graphviz_rust::cmd::{CommandArg, Format};

    let format = match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("png") => Format::Png,
        Some("svg") => Format::Svg,
        Some("pdf") => Format::Pdf,
        other => {
            return Err(GantryError::Export(format!(
                "unsupported render format {:?}; use .png, .svg, or .pdf",
                other.unwrap_or("none")
            )));
        }
    };

    info!(path = path; "Rendering DOT through Graphviz");
    graphviz_rust::exec_dot(
        dot.to_string(),
        vec![
            CommandArg::Format(format),
            CommandArg::Output(path.to_string()),
        ],
    )
    .map_err(|err| GantryError::Export(format!("Graphviz rendering failed: {err}")))?;

    Ok(())
}
