//! Gantry - a converter from SysML v2 structure text to diagrams
//!
//! This library parses a pragmatic subset of the SysML v2 textual notation,
//! arranges the parsed elements into nested panels with a deterministic
//! layout, and renders the result as Graphviz DOT text or as a
//! self-contained SVG document.

pub mod config;

mod error;
mod export;
mod layout;
mod scene;

pub use gantry_core::{color, draw, geometry, identifier, model};

pub use error::GantryError;

use std::fmt;

use log::{debug, info, trace};

use gantry_core::model::Model;

use config::AppConfig;
use scene::Scene;

/// The diagram flavors the emitters can produce.
///
/// Both flavors share the same scene and layout; the kind selects the
/// document title and the default output file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiagramKind {
    /// Definition-level view.
    #[default]
    Block,
    /// Part-and-port view inside the definitions.
    Internal,
}

impl DiagramKind {
    /// Short name used in file names and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagramKind::Block => "block",
            DiagramKind::Internal => "internal",
        }
    }

    /// Title drawn above the diagram.
    pub fn title(self) -> &'static str {
        match self {
            DiagramKind::Block => "SysML v2 Block Diagram",
            DiagramKind::Internal => "SysML v2 Internal Diagram",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for parsing and rendering SysML v2 diagrams.
///
/// This provides an API for processing model text through the parsing,
/// layout, and rendering stages.
///
/// # Examples
///
/// ```rust,no_run
/// use gantry::{DiagramBuilder, DiagramKind, config::AppConfig};
///
/// let source = "part def Vehicle { port ignition : Signal; }";
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// // Parse source to a model
/// let model = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render the model to both output formats
/// let dot = builder.render_dot(&model, DiagramKind::Block)
///     .expect("Failed to render");
/// let svg = builder.render_svg(&model, DiagramKind::Block)
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse model source text into a resolved model.
    ///
    /// Unknown statements are skipped and unresolved references are dropped
    /// from the relationship lists, so this only fails on source that yields
    /// no model at all.
    ///
    /// # Errors
    ///
    /// Returns `GantryError::Parse` for an empty document or an unclosed
    /// body.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use gantry::{DiagramBuilder, config::AppConfig};
    ///
    /// let builder = DiagramBuilder::new(AppConfig::default());
    /// let model = builder.parse("part def Vehicle;")
    ///     .expect("Failed to parse model");
    /// ```
    pub fn parse(&self, source: &str) -> Result<Model, GantryError> {
        info!("Parsing model source");
        let model = gantry_parser::parse(source)
            .map_err(|err| GantryError::new_parse_error(err, source))?;
        debug!(elements = model.element_count(); "Model built successfully");
        trace!(model:?; "Resolved model");
        Ok(model)
    }

    /// Render a model as Graphviz DOT text.
    ///
    /// # Errors
    ///
    /// Returns `GantryError::Export` when a configured color does not parse.
    pub fn render_dot(&self, model: &Model, kind: DiagramKind) -> Result<String, GantryError> {
        let scene = self.layout_scene(model);
        let dot = export::dot::render(&scene, kind, self.config.style())?;
        info!(kind:% = kind; "DOT rendered successfully");
        Ok(dot)
    }

    /// Render a model as a self-contained SVG document.
    ///
    /// # Errors
    ///
    /// Returns `GantryError::Export` when a configured color does not parse.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use gantry::{DiagramBuilder, DiagramKind, config::AppConfig};
    ///
    /// let builder = DiagramBuilder::new(AppConfig::default());
    /// let model = builder.parse("part def Vehicle;")
    ///     .expect("Failed to parse");
    ///
    /// let svg = builder.render_svg(&model, DiagramKind::Internal)
    ///     .expect("Failed to render diagram");
    ///
    /// println!("{}", svg);
    /// ```
    pub fn render_svg(&self, model: &Model, kind: DiagramKind) -> Result<String, GantryError> {
        let scene = self.layout_scene(model);
        let svg = export::svg::render(&scene, kind, &self.config)?;
        info!(kind:% = kind; "SVG rendered successfully");
        Ok(svg)
    }

    fn layout_scene(&self, model: &Model) -> Scene {
        info!("Building diagram scene");
        let mut scene = Scene::from_model(model);
        debug!(panels = scene.nodes().len(), edges = scene.edges().len(); "Scene built");
        layout::layout(&mut scene, self.config.layout());
        scene
    }
}
