//! Integer points and rectangles for shape operations.
//!
//! Coordinates are `i32` so callers can address positions off the surface;
//! the drawing primitives clip silently.

/// A point on (or off) the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle between two corner points.
///
/// Whether the `max` edge is inclusive depends on the operation:
/// [`draw_box`](crate::Surface::draw_box) treats it as inclusive,
/// [`fill_box`](crate::Surface::fill_box) as exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Create a rectangle from two corners, swapping coordinates as needed
    /// so that `min.x <= max.x` and `min.y <= max.y`.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Width as `max.x - min.x`.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height as `max.y - min.y`.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.max.y - self.min.y
    }
}
