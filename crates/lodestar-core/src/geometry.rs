//! Basic geometric types used throughout the engine.
//!
//! All coordinates are `f32` in the graph (content) coordinate space.
//! Rectangles are axis-aligned and stored as origin plus size, with
//! min/max accessors derived on demand.

use serde::{Deserialize, Serialize};

/// A point or offset in graph coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Returns a new point with absolute values of both coordinates
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Returns the coordinate along the given axis
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Returns a copy with the coordinate along the given axis replaced
    pub fn with_along(self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::X => Self { x: value, ..self },
            Axis::Y => Self { y: value, ..self },
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle in graph coordinates.
///
/// Stored as origin (top-left corner) plus size. Zero-area rectangles are
/// permitted; they never overlap anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and dimensions
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle spanning the given extents
    pub fn from_min_max(min: Point, max: Point) -> Self {
        Self {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    /// Returns the minimum x-coordinate of the rectangle
    pub fn min_x(self) -> f32 {
        self.x
    }

    /// Returns the minimum y-coordinate of the rectangle
    pub fn min_y(self) -> f32 {
        self.y
    }

    /// Returns the maximum x-coordinate of the rectangle
    pub fn max_x(self) -> f32 {
        self.x + self.width
    }

    /// Returns the maximum y-coordinate of the rectangle
    pub fn max_y(self) -> f32 {
        self.y + self.height
    }

    /// Returns the width of the rectangle
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height of the rectangle
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the top-left corner as a Point
    pub fn origin(self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// Returns the dimensions as a Size
    pub fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Returns a copy with the given top-left corner, preserving size
    pub fn with_origin(self, origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..self
        }
    }

    /// Moves the rectangle by the specified offset
    pub fn translate(self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }

    /// Merges two rectangles into a larger rectangle that contains both
    pub fn union(self, other: Self) -> Self {
        let min = Point::new(self.min_x().min(other.min_x()), self.min_y().min(other.min_y()));
        let max = Point::new(self.max_x().max(other.max_x()), self.max_y().max(other.max_y()));
        Self::from_min_max(min, max)
    }

    /// Checks whether the interiors of two rectangles intersect.
    ///
    /// Rectangles that merely share an edge do not overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// Checks whether the given point lies inside the rectangle.
    ///
    /// The minimum edges are inclusive, the maximum edges exclusive.
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// Grows the rectangle outward by the given amounts on each axis
    pub fn inflate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x - dx,
            y: self.y - dy,
            width: self.width + dx * 2.0,
            height: self.height + dy * 2.0,
        }
    }

    /// Returns the leading (minimum) edge along the given axis
    pub fn leading(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.min_x(),
            Axis::Y => self.min_y(),
        }
    }

    /// Returns the trailing (maximum) edge along the given axis
    pub fn trailing(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.max_x(),
            Axis::Y => self.max_y(),
        }
    }

    /// Returns the extent (width or height) along the given axis
    pub fn extent(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Returns the scalar position of the given reference line.
    ///
    /// Edge references return the corresponding edge coordinate, center
    /// references the midpoint along their axis.
    pub fn reference_position(self, reference: RectReference) -> f32 {
        match reference {
            RectReference::Left => self.min_x(),
            RectReference::HorizontalCenter => self.center().x(),
            RectReference::Right => self.max_x(),
            RectReference::Top => self.min_y(),
            RectReference::VerticalCenter => self.center().y(),
            RectReference::Bottom => self.max_y(),
        }
    }
}

/// One of the two coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Returns the other axis
    pub fn perpendicular(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Indicates which of the two axes a computed offset applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AxisMask {
    #[default]
    None,
    X,
    Y,
    Both,
}

impl AxisMask {
    /// Returns the mask covering exactly the given axis
    pub fn from_axis(axis: Axis) -> Self {
        match axis {
            Axis::X => AxisMask::X,
            Axis::Y => AxisMask::Y,
        }
    }

    /// Checks whether the mask covers the given axis
    pub fn contains(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (AxisMask::Both, _) | (AxisMask::X, Axis::X) | (AxisMask::Y, Axis::Y)
        )
    }

    /// Returns a mask additionally covering the given axis
    pub fn with(self, axis: Axis) -> Self {
        match (self, axis) {
            (AxisMask::None, Axis::X) => AxisMask::X,
            (AxisMask::None, Axis::Y) => AxisMask::Y,
            (AxisMask::X, Axis::Y) | (AxisMask::Y, Axis::X) => AxisMask::Both,
            (mask, _) => mask,
        }
    }

    /// Checks whether the mask covers neither axis
    pub fn is_none(self) -> bool {
        self == AxisMask::None
    }
}

/// A reference line on a rectangle: an edge or a center line.
///
/// `Left`, `HorizontalCenter`, and `Right` are vertical lines positioned
/// along the X axis; `Top`, `VerticalCenter`, and `Bottom` are horizontal
/// lines positioned along the Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectReference {
    Left,
    HorizontalCenter,
    Right,
    Top,
    VerticalCenter,
    Bottom,
}

impl RectReference {
    /// Returns the axis along which this reference line is positioned
    pub fn axis(self) -> Axis {
        match self {
            RectReference::Left | RectReference::HorizontalCenter | RectReference::Right => Axis::X,
            RectReference::Top | RectReference::VerticalCenter | RectReference::Bottom => Axis::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default_is_zero() {
        let point = Point::default();
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.add(p2), Point::new(4.0, 6.0));
        assert_eq!(p2.sub(p1), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_point_abs() {
        let point = Point::new(-2.5, 3.0);
        assert_eq!(point.abs(), Point::new(2.5, 3.0));
    }

    #[test]
    fn test_point_along_axis() {
        let point = Point::new(7.0, 11.0);
        assert_eq!(point.along(Axis::X), 7.0);
        assert_eq!(point.along(Axis::Y), 11.0);
        assert_eq!(point.with_along(Axis::X, 1.0), Point::new(1.0, 11.0));
        assert_eq!(point.with_along(Axis::Y, 1.0), Point::new(7.0, 1.0));
    }

    #[test]
    fn test_rect_accessors() {
        let rect = Rect::new(2.0, 3.0, 5.0, 8.0);
        assert_eq!(rect.min_x(), 2.0);
        assert_eq!(rect.min_y(), 3.0);
        assert_eq!(rect.max_x(), 7.0);
        assert_eq!(rect.max_y(), 11.0);
        assert_eq!(rect.width(), 5.0);
        assert_eq!(rect.height(), 8.0);
        assert_eq!(rect.origin(), Point::new(2.0, 3.0));
        assert_eq!(rect.center(), Point::new(4.5, 7.0));
    }

    #[test]
    fn test_rect_from_min_max() {
        let rect = Rect::from_min_max(Point::new(1.0, 2.0), Point::new(6.0, 9.0));
        assert_eq!(rect, Rect::new(1.0, 2.0, 5.0, 7.0));
    }

    #[test]
    fn test_rect_translate() {
        let rect = Rect::new(1.0, 2.0, 4.0, 4.0);
        let moved = rect.translate(Point::new(3.0, -1.0));
        assert_eq!(moved, Rect::new(4.0, 1.0, 4.0, 4.0));
    }

    #[test]
    fn test_rect_with_origin_preserves_size() {
        let rect = Rect::new(1.0, 2.0, 4.0, 5.0);
        let moved = rect.with_origin(Point::new(10.0, 20.0));
        assert_eq!(moved, Rect::new(10.0, 20.0, 4.0, 5.0));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(1.0, 2.0, 4.0, 4.0);
        let b = Rect::new(3.0, 0.0, 5.0, 4.0);
        let merged = a.union(b);
        assert_eq!(merged, Rect::new(1.0, 0.0, 7.0, 6.0));
    }

    #[test]
    fn test_rect_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(Rect::new(-5.0, -5.0, 10.0, 10.0)));
        // Containment counts as overlap
        assert!(a.overlaps(Rect::new(2.0, 2.0, 2.0, 2.0)));
        // Edge contact does not
        assert!(!a.overlaps(Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(Rect::new(0.0, 10.0, 5.0, 5.0)));
        // Disjoint
        assert!(!a.overlaps(Rect::new(20.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_zero_area_rect_never_overlaps() {
        let degenerate = Rect::new(5.0, 5.0, 0.0, 0.0);
        let other = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!degenerate.overlaps(other));
        assert!(!other.overlaps(degenerate));
    }

    #[test]
    fn test_rect_contains_point() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_point(Point::new(0.0, 0.0)));
        assert!(rect.contains_point(Point::new(5.0, 5.0)));
        assert!(!rect.contains_point(Point::new(10.0, 10.0)));
        assert!(!rect.contains_point(Point::new(-1.0, 5.0)));
    }

    #[test]
    fn test_rect_inflate() {
        let rect = Rect::new(2.0, 3.0, 4.0, 4.0);
        let inflated = rect.inflate(1.0, 2.0);
        assert_eq!(inflated, Rect::new(1.0, 1.0, 6.0, 8.0));
    }

    #[test]
    fn test_rect_axis_edges() {
        let rect = Rect::new(2.0, 3.0, 5.0, 8.0);
        assert_eq!(rect.leading(Axis::X), 2.0);
        assert_eq!(rect.trailing(Axis::X), 7.0);
        assert_eq!(rect.extent(Axis::X), 5.0);
        assert_eq!(rect.leading(Axis::Y), 3.0);
        assert_eq!(rect.trailing(Axis::Y), 11.0);
        assert_eq!(rect.extent(Axis::Y), 8.0);
    }

    #[test]
    fn test_rect_reference_positions() {
        let rect = Rect::new(10.0, 20.0, 4.0, 6.0);
        assert_eq!(rect.reference_position(RectReference::Left), 10.0);
        assert_eq!(rect.reference_position(RectReference::HorizontalCenter), 12.0);
        assert_eq!(rect.reference_position(RectReference::Right), 14.0);
        assert_eq!(rect.reference_position(RectReference::Top), 20.0);
        assert_eq!(rect.reference_position(RectReference::VerticalCenter), 23.0);
        assert_eq!(rect.reference_position(RectReference::Bottom), 26.0);
    }

    #[test]
    fn test_center_of_fractional_rect() {
        use float_cmp::approx_eq;
        let rect = Rect::new(0.1, 0.2, 0.3, 0.3);
        assert!(approx_eq!(f32, rect.center().x(), 0.25, epsilon = 1e-6));
        assert!(approx_eq!(f32, rect.center().y(), 0.35, epsilon = 1e-6));
    }

    #[test]
    fn test_axis_perpendicular() {
        assert_eq!(Axis::X.perpendicular(), Axis::Y);
        assert_eq!(Axis::Y.perpendicular(), Axis::X);
    }

    #[test]
    fn test_axis_mask_contains() {
        assert!(!AxisMask::None.contains(Axis::X));
        assert!(!AxisMask::None.contains(Axis::Y));
        assert!(AxisMask::X.contains(Axis::X));
        assert!(!AxisMask::X.contains(Axis::Y));
        assert!(AxisMask::Both.contains(Axis::X));
        assert!(AxisMask::Both.contains(Axis::Y));
    }

    #[test]
    fn test_axis_mask_with() {
        assert_eq!(AxisMask::None.with(Axis::X), AxisMask::X);
        assert_eq!(AxisMask::X.with(Axis::Y), AxisMask::Both);
        assert_eq!(AxisMask::Y.with(Axis::Y), AxisMask::Y);
        assert_eq!(AxisMask::Both.with(Axis::X), AxisMask::Both);
    }

    #[test]
    fn test_reference_axis() {
        assert_eq!(RectReference::Left.axis(), Axis::X);
        assert_eq!(RectReference::HorizontalCenter.axis(), Axis::X);
        assert_eq!(RectReference::Right.axis(), Axis::X);
        assert_eq!(RectReference::Top.axis(), Axis::Y);
        assert_eq!(RectReference::VerticalCenter.axis(), Axis::Y);
        assert_eq!(RectReference::Bottom.axis(), Axis::Y);
    }

    proptest! {
        #[test]
        fn union_contains_both(
            (ax, ay, aw, ah) in (-1e3f32..1e3, -1e3f32..1e3, 0f32..1e3, 0f32..1e3),
            (bx, by, bw, bh) in (-1e3f32..1e3, -1e3f32..1e3, 0f32..1e3, 0f32..1e3),
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            let u = a.union(b);
            prop_assert!(u.min_x() <= a.min_x() && u.min_x() <= b.min_x());
            prop_assert!(u.min_y() <= a.min_y() && u.min_y() <= b.min_y());
            prop_assert!(u.max_x() >= a.max_x() && u.max_x() >= b.max_x());
            prop_assert!(u.max_y() >= a.max_y() && u.max_y() >= b.max_y());
        }

        #[test]
        fn overlap_is_symmetric(
            (ax, ay, aw, ah) in (-1e3f32..1e3, -1e3f32..1e3, 0f32..1e3, 0f32..1e3),
            (bx, by, bw, bh) in (-1e3f32..1e3, -1e3f32..1e3, 0f32..1e3, 0f32..1e3),
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(b), b.overlaps(a));
        }
    }
}
