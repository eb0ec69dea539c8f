//! Fill and background colors for diagram panels.
//!
//! Palette entries and configured overrides arrive as CSS color strings and
//! are parsed once through [`Color::new`]. The emitters only ever need the
//! string form back, via [`Display`](std::fmt::Display).

use std::str::FromStr;

use color::DynamicColor;

/// A parsed CSS color.
///
/// Accepts every form `DynamicColor` understands: hex like `#dae8fc`,
/// functional notation like `rgb(255, 230, 204)`, and named colors like
/// `lightgray`. Named colors keep their name when displayed.
///
/// # Examples
///
/// ```
/// use gantry_core::color::Color;
///
/// let fill = Color::new("#dae8fc").unwrap();
/// let named = Color::new("lightgray").unwrap();
/// assert_eq!(named.to_string(), "lightgray");
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color(DynamicColor);

impl Color {
    /// Parses a CSS color string, reporting unparseable input as a message
    /// naming the offending value.
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self(color)),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_palette_forms() {
        assert!(Color::new("#dae8fc").is_ok());
        assert!(Color::new("rgb(255, 230, 204)").is_ok());
        assert!(Color::new("white").is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_named_color_displays_as_name() {
        let color = Color::new("white").unwrap();
        assert_eq!(color.to_string(), "white");
    }
}
