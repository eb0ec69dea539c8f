//! Emitters for laid-out scenes.
//!
//! Two independent serializers consume the same laid-out [`Scene`]: the DOT
//! emitter prints Graphviz text, the SVG emitter prints a self-contained
//! vector image. Both walk the arena in pre-order so output ordering is
//! reproducible, and both require that layout has already attached geometry.
//!
//! This is the last stage of the conversion, after parsing, scene
//! synthesis, and layout have all run.
//!
//! [`Scene`]: crate::scene::Scene

pub(crate) mod dot;
pub(crate) mod svg;
