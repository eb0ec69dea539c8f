//! Geometric primitives for panel layout and edge routing.
//!
//! Three types cover everything the layout engine and the emitters need:
//! [`Point`] for coordinates, [`Size`] for measured extents, and [`Bounds`]
//! for placed rectangles. Coordinates follow the SVG convention, origin at
//! the top-left with y growing downward.
//!
//! All arithmetic is plain `f32` evaluated in a fixed order, so a given
//! input document always produces bit-equal geometry.

/// A position in diagram space.
///
/// # Examples
///
/// ```
/// # use gantry_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(4.0, 6.0);
///
/// assert_eq!(a.sub_point(b).x(), 6.0);
/// assert_eq!(a.midpoint(b).y(), 13.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Component-wise difference, used as a direction vector.
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// The point halfway between `self` and `other`.
    ///
    /// Edge labels hang from the midpoint of their connector.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// A measured width and height, before placement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned rectangle stored as min and max coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// A box whose top-left corner sits at `top_left`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width(),
            max_y: top_left.y + size.height(),
        }
    }

    /// A box centered on `center`.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width() / 2.0;
        let half_height = size.height() / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Whether `point` lies inside the box. Edges count as inside.
    pub fn contains(self, point: Point) -> bool {
        point.x() >= self.min_x
            && point.x() <= self.max_x
            && point.y() >= self.min_y
            && point.y() <= self.max_y
    }

    /// The smallest box covering both `self` and `other`.
    ///
    /// The document viewport is the merge of every placed panel.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gantry_core::geometry::{Bounds, Point, Size};
    /// let switch = Bounds::new_from_top_left(Point::new(24.0, 24.0), Size::new(96.0, 50.0));
    /// let lamp = Bounds::new_from_top_left(Point::new(24.0, 86.0), Size::new(84.0, 50.0));
    ///
    /// let viewport = switch.merge(&lamp);
    /// assert_eq!(viewport.max_x(), 120.0);
    /// assert_eq!(viewport.height(), 112.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_difference_and_midpoint() {
        let anchor = Point::new(12.0, 24.0);
        let tip = Point::new(36.0, 48.0);

        assert_eq!(tip.sub_point(anchor), Point::new(24.0, 24.0));
        assert_eq!(anchor.midpoint(tip), Point::new(24.0, 36.0));
    }

    #[test]
    fn test_bounds_corners_agree_with_constructor() {
        let panel = Bounds::new_from_top_left(Point::new(24.0, 24.0), Size::new(150.0, 64.0));

        assert_eq!(panel.min_x(), 24.0);
        assert_eq!(panel.max_x(), 174.0);
        assert_eq!(panel.max_y(), 88.0);
        assert_eq!(panel.width(), 150.0);
        assert_eq!(panel.height(), 64.0);
        assert_eq!(panel.center(), Point::new(99.0, 56.0));
    }

    #[test]
    fn test_centered_box_straddles_its_anchor() {
        // Port boxes sit centered on the parent border.
        let port = Bounds::new_from_center(Point::new(60.0, 88.0), Size::new(16.0, 10.0));

        assert_eq!(port.min_x(), 52.0);
        assert_eq!(port.max_x(), 68.0);
        assert_eq!(port.min_y(), 83.0);
        assert_eq!(port.max_y(), 93.0);
    }

    #[test]
    fn test_contains_treats_edges_as_inside() {
        let panel = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(80.0, 40.0));

        assert!(panel.contains(panel.center()));
        assert!(panel.contains(Point::new(0.0, 0.0)));
        assert!(panel.contains(Point::new(80.0, 40.0)));
        assert!(!panel.contains(Point::new(80.5, 20.0)));
        assert!(!panel.contains(Point::new(40.0, -0.5)));
    }

    #[test]
    fn test_merge_covers_disjoint_panels() {
        let upper = Bounds::new_from_top_left(Point::new(24.0, 24.0), Size::new(100.0, 50.0));
        let lower = Bounds::new_from_top_left(Point::new(40.0, 90.0), Size::new(130.0, 30.0));

        let viewport = upper.merge(&lower);
        assert_eq!(viewport.min_x(), 24.0);
        assert_eq!(viewport.min_y(), 24.0);
        assert_eq!(viewport.max_x(), 170.0);
        assert_eq!(viewport.max_y(), 120.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -400.0f32..400.0,
            -400.0f32..400.0,
            0.5f32..250.0,
            0.5f32..250.0,
        )
            .prop_map(|(x, y, width, height)| {
                Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
            })
    }

    /// Merging selects coordinates, so containment holds without tolerance.
    fn check_merge_covers_inputs(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.merge(&b2);

        for input in [b1, b2] {
            prop_assert!(merged.min_x() <= input.min_x());
            prop_assert!(merged.min_y() <= input.min_y());
            prop_assert!(merged.max_x() >= input.max_x());
            prop_assert!(merged.max_y() >= input.max_y());
        }
        Ok(())
    }

    /// An edge label anchored between two panel centers never escapes the
    /// merged viewport.
    fn check_anchor_inside_merge(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.merge(&b2);
        let anchor = b1.center().midpoint(b2.center());

        prop_assert!(merged.contains(anchor));
        Ok(())
    }

    /// A box always contains its own center.
    fn check_center_is_inside(bounds: Bounds) -> Result<(), TestCaseError> {
        prop_assert!(bounds.contains(bounds.center()));
        Ok(())
    }

    proptest! {
        #[test]
        fn merge_covers_inputs(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_merge_covers_inputs(b1, b2)?;
        }

        #[test]
        fn label_anchor_inside_merge(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_anchor_inside_merge(b1, b2)?;
        }

        #[test]
        fn center_is_inside(bounds in bounds_strategy()) {
            check_center_is_inside(bounds)?;
        }
    }
}
