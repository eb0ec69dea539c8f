//! Configuration types for diagram layout and styling.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Geometry constants used by the layout engine.
//! - [`StyleConfig`] - Fill palette and background color options.
//!
//! # Example
//!
//! ```
//! # use gantry::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use gantry_core::{color::Color, model::ElementKind};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Geometry constants for the layout engine.
///
/// Every value participates in the deterministic layout pass; two runs with
/// the same configuration produce byte-identical geometry. The defaults are
/// tuned for 13px labels in a fixed-advance estimate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Estimated horizontal advance per label character, in pixels.
    char_width: f32,

    /// Label font size in pixels.
    font_size: f32,

    /// Height of the band reserved at the top of a container panel for
    /// its own label.
    header_height: f32,

    /// Inner padding between a panel border and its content.
    padding: f32,

    /// Vertical gap between stacked siblings and horizontal gap between
    /// boundary ports.
    spacing: f32,

    /// Outer margin around the whole diagram.
    margin: f32,

    /// Width of the small box drawn for a boundary port.
    port_width: f32,

    /// Height of the small box drawn for a boundary port.
    port_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            char_width: 7.5,
            font_size: 13.0,
            header_height: 26.0,
            padding: 12.0,
            spacing: 12.0,
            margin: 24.0,
            port_width: 16.0,
            port_height: 10.0,
        }
    }
}

impl LayoutConfig {
    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn port_width(&self) -> f32 {
        self.port_width
    }

    pub fn port_height(&self) -> f32 {
        self.port_height
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// The fill palette maps element kind tags (`package`, `part`, `port`, ...)
/// to CSS color strings; kinds without an override use the built-in palette.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Default background [`Color`] for diagrams, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Per-kind fill color overrides, keyed by kind tag.
    #[serde(default)]
    fills: IndexMap<String, String>,
}

/// Built-in fill for each element kind.
fn default_fill(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Package => "#EDEDED",
        ElementKind::ItemDef => "#D5E8D4",
        ElementKind::Part => "#DAE8FC",
        ElementKind::Port => "#FFE6CC",
        ElementKind::Action => "#FFF2CC",
        ElementKind::StateMachine => "#E1D5E7",
        ElementKind::State => "#F8CECC",
        ElementKind::Block => "lightgray",
    }
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`] from a background color and fill overrides.
    pub fn new(background_color: Option<String>, fills: IndexMap<String, String>) -> Self {
        Self {
            background_color,
            fills,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the fill [`Color`] for an element kind, consulting the
    /// configured overrides before the built-in palette.
    ///
    /// # Errors
    ///
    /// Returns an error if an override string cannot be parsed into a valid
    /// [`Color`].
    pub fn fill(&self, kind: ElementKind) -> Result<Color, String> {
        let configured = self
            .fills
            .get(kind.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| default_fill(kind));
        Color::new(configured)
            .map_err(|err| format!("Invalid fill color for `{}` in config: {err}", kind.as_str()))
    }
}
