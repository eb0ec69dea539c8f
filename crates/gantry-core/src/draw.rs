//! Drawing primitives shared by the layout engine and both emitters.
//!
//! This module carries the pieces that are about *appearance* rather than
//! meaning: the visual style of each edge class, the fixed-width text
//! estimate used for sizing labels, and the rectangle boundary math used to
//! attach edge endpoints to node boxes.

use crate::geometry::{Bounds, Point, Size};

/// Visual class of a diagram edge.
///
/// The class decides the arrowhead, the dash pattern and which end the
/// marker is drawn at. Composition carries its diamond at the owner end,
/// inheritance its open arrow at the supertype end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeStyle {
    /// Owner-to-owned structural edge, diamond at the owner.
    Composition,
    /// Subtype-to-supertype edge, open arrow at the supertype.
    Inheritance,
    /// Port-to-definition reference, dashed with an open dot.
    PortLink,
    /// State-to-state transition, plain vee arrow.
    Transition,
}

impl EdgeStyle {
    /// Graphviz arrowhead name for this style.
    pub fn arrow_name(self) -> &'static str {
        match self {
            EdgeStyle::Composition => "diamond",
            EdgeStyle::Inheritance => "onormal",
            EdgeStyle::PortLink => "odot",
            EdgeStyle::Transition => "vee",
        }
    }

    /// True when the marker sits at the source end of the edge.
    pub fn marker_at_source(self) -> bool {
        matches!(self, EdgeStyle::Composition)
    }

    /// True when the edge is drawn with a dash pattern.
    pub fn is_dashed(self) -> bool {
        matches!(self, EdgeStyle::PortLink)
    }

    /// Identifier of the SVG `<marker>` definition for this style.
    pub fn marker_id(self) -> &'static str {
        match self {
            EdgeStyle::Composition => "arrow-diamond",
            EdgeStyle::Inheritance => "arrow-onormal",
            EdgeStyle::PortLink => "arrow-odot",
            EdgeStyle::Transition => "arrow-vee",
        }
    }
}

/// Fixed-metric text measurement.
///
/// Label sizes are estimated from character count and a constant per-glyph
/// advance instead of shaping real font data. The estimate is intentionally
/// host-independent so that two runs, on any machine, produce the same
/// geometry for the same input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextEstimate {
    font_size: f32,
    char_width: f32,
}

impl TextEstimate {
    pub fn new(font_size: f32, char_width: f32) -> Self {
        Self {
            font_size,
            char_width,
        }
    }

    /// Returns the font size the estimate is based on.
    pub fn font_size(self) -> f32 {
        self.font_size
    }

    /// Estimated size of a single line of text.
    pub fn measure_line(self, text: &str) -> Size {
        let chars = text.chars().count() as f32;
        Size::new(chars * self.char_width, self.font_size)
    }

    /// Vertical advance from one text line to the next.
    pub fn line_height(self) -> f32 {
        self.font_size + 4.0
    }

    /// A smaller estimate for secondary labels such as port names.
    pub fn smaller(self) -> Self {
        Self {
            font_size: (self.font_size * 0.85).round(),
            char_width: self.char_width * 0.85,
        }
    }
}

/// Finds the point on the boundary of `bounds` that faces `toward`.
///
/// When `toward` lies outside the box this is the first intersection of the
/// ray from the box center to `toward` with the box edge. When `toward` lies
/// inside the box (an edge to a nested node) it is the projection of
/// `toward` onto the nearest edge. Edge ties resolve in the fixed order
/// left, right, top, bottom so repeated runs agree.
pub fn boundary_point(bounds: Bounds, toward: Point) -> Point {
    if bounds.contains(toward) {
        return project_to_nearest_edge(bounds, toward);
    }

    let center = bounds.center();
    let half_width = bounds.width() / 2.0;
    let half_height = bounds.height() / 2.0;

    let dist = toward.sub_point(center);
    let length = (dist.x() * dist.x() + dist.y() * dist.y()).sqrt();
    if length < 0.001 {
        return center;
    }

    let dx_norm = dist.x() / length;
    let dy_norm = dist.y() / length;

    // How far along the ray each of the four edges is hit.
    let t_top = (-half_height) / dy_norm;
    let t_bottom = half_height / dy_norm;
    let t_left = (-half_width) / dx_norm;
    let t_right = half_width / dx_norm;

    let mut t = f32::MAX;

    if t_top.is_finite() && t_top > 0.0 {
        let x = dx_norm.mul_add(t_top, center.x());
        if x >= bounds.min_x() && x <= bounds.max_x() {
            t = t_top;
        }
    }

    if t_bottom.is_finite() && t_bottom > 0.0 && t_bottom < t {
        let x = dx_norm.mul_add(t_bottom, center.x());
        if x >= bounds.min_x() && x <= bounds.max_x() {
            t = t_bottom;
        }
    }

    if t_left.is_finite() && t_left > 0.0 && t_left < t {
        let y = dy_norm.mul_add(t_left, center.y());
        if y >= bounds.min_y() && y <= bounds.max_y() {
            t = t_left;
        }
    }

    if t_right.is_finite() && t_right > 0.0 && t_right < t {
        let y = dy_norm.mul_add(t_right, center.y());
        if y >= bounds.min_y() && y <= bounds.max_y() {
            t = t_right;
        }
    }

    if t == f32::MAX {
        return center;
    }

    Point::new(
        dx_norm.mul_add(t, center.x()),
        dy_norm.mul_add(t, center.y()),
    )
}

fn project_to_nearest_edge(bounds: Bounds, point: Point) -> Point {
    let to_left = point.x() - bounds.min_x();
    let to_right = bounds.max_x() - point.x();
    let to_top = point.y() - bounds.min_y();
    let to_bottom = bounds.max_y() - point.y();

    let nearest = to_left.min(to_right).min(to_top).min(to_bottom);

    if nearest == to_left {
        Point::new(bounds.min_x(), point.y())
    } else if nearest == to_right {
        Point::new(bounds.max_x(), point.y())
    } else if nearest == to_top {
        Point::new(point.x(), bounds.min_y())
    } else {
        Point::new(point.x(), bounds.max_y())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::geometry::{Bounds, Point, Size};

    fn unit_box() -> Bounds {
        Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(10.0, 10.0))
    }

    #[test]
    fn test_edge_style_arrows() {
        assert_eq!(EdgeStyle::Composition.arrow_name(), "diamond");
        assert_eq!(EdgeStyle::Inheritance.arrow_name(), "onormal");
        assert_eq!(EdgeStyle::Transition.arrow_name(), "vee");
        assert!(EdgeStyle::PortLink.is_dashed());
        assert!(EdgeStyle::Composition.marker_at_source());
        assert!(!EdgeStyle::Transition.marker_at_source());
    }

    #[test]
    fn test_measure_line_scales_with_chars() {
        let text = TextEstimate::new(13.0, 7.5);
        let small = text.measure_line("On");
        let large = text.measure_line("PowerSupply");

        assert!(approx_eq!(f32, small.width(), 15.0));
        assert!(approx_eq!(f32, small.height(), 13.0));
        assert!(large.width() > small.width());
    }

    #[test]
    fn test_measure_line_counts_chars_not_bytes() {
        let text = TextEstimate::new(13.0, 7.5);
        assert!(approx_eq!(
            f32,
            text.measure_line("äöü").width(),
            text.measure_line("abc").width()
        ));
    }

    #[test]
    fn test_boundary_point_right() {
        let hit = boundary_point(unit_box(), Point::new(20.0, 0.0));
        assert!(approx_eq!(f32, hit.x(), 5.0, epsilon = 0.01));
        assert!(approx_eq!(f32, hit.y(), 0.0, epsilon = 0.01));
    }

    #[test]
    fn test_boundary_point_below() {
        let hit = boundary_point(unit_box(), Point::new(0.0, 30.0));
        assert!(approx_eq!(f32, hit.x(), 0.0, epsilon = 0.01));
        assert!(approx_eq!(f32, hit.y(), 5.0, epsilon = 0.01));
    }

    #[test]
    fn test_boundary_point_diagonal() {
        let hit = boundary_point(unit_box(), Point::new(20.0, 20.0));
        // A 45 degree ray exits at the corner.
        assert!(approx_eq!(f32, hit.x(), 5.0, epsilon = 0.01));
        assert!(approx_eq!(f32, hit.y(), 5.0, epsilon = 0.01));
    }

    #[test]
    fn test_boundary_point_inside_projects_to_nearest_edge() {
        let hit = boundary_point(unit_box(), Point::new(4.0, 1.0));
        assert!(approx_eq!(f32, hit.x(), 5.0, epsilon = 0.01));
        assert!(approx_eq!(f32, hit.y(), 1.0, epsilon = 0.01));
    }

    #[test]
    fn test_boundary_point_coincident_centers() {
        let hit = boundary_point(unit_box(), Point::new(0.0, 0.0));
        // Degenerate direction falls back to the center.
        assert!(approx_eq!(f32, hit.x(), 0.0, epsilon = 0.01));
        assert!(approx_eq!(f32, hit.y(), 0.0, epsilon = 0.01));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::geometry::{Bounds, Point, Size};

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            2.0f32..300.0,
            2.0f32..300.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// The computed endpoint always lies on (or numerically near) the box edge.
    fn check_on_boundary(bounds: Bounds, toward: Point) -> Result<(), TestCaseError> {
        let hit = boundary_point(bounds, toward);
        let eps = 0.01;

        let on_vertical = (hit.x() - bounds.min_x()).abs() < eps
            || (hit.x() - bounds.max_x()).abs() < eps;
        let on_horizontal = (hit.y() - bounds.min_y()).abs() < eps
            || (hit.y() - bounds.max_y()).abs() < eps;
        let within_x = hit.x() >= bounds.min_x() - eps && hit.x() <= bounds.max_x() + eps;
        let within_y = hit.y() >= bounds.min_y() - eps && hit.y() <= bounds.max_y() + eps;

        // The degenerate same-center case legitimately returns the center.
        let is_center = (hit.x() - bounds.center().x()).abs() < eps
            && (hit.y() - bounds.center().y()).abs() < eps;

        prop_assert!(is_center || ((on_vertical || on_horizontal) && within_x && within_y));
        Ok(())
    }

    proptest! {
        #[test]
        fn boundary_point_stays_on_box(bounds in bounds_strategy(), toward in point_strategy()) {
            check_on_boundary(bounds, toward)?;
        }
    }
}
