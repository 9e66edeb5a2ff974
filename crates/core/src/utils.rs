//! Geometry helpers shared by the layout modules.
//!
//! Coordinates are image pixels: x grows to the right, y grows downward.

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A rectangle defined by (x0, y0, x1, y1) with (x0, y0) the top-left corner.
pub type Rect = (f64, f64, f64, f64);

/// Four corners of a token's bounding quadrilateral:
/// top-left, top-right, bottom-right, bottom-left.
pub type Quad = [Point; 4];

/// Midpoint of two points.
#[inline]
pub fn midpoint(a: Point, b: Point) -> Point {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn distance_sq(a: Point, b: Point) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx.mul_add(dx, dy * dy)
}

/// Axis-aligned quad for the rectangle (x0, y0, x1, y1).
pub fn quad_from_rect(rect: Rect) -> Quad {
    let (x0, y0, x1, y1) = rect;
    [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
}

/// Arithmetic mean of a set of points. `None` for an empty input.
pub fn mean_point<I: IntoIterator<Item = Point>>(pts: I) -> Option<Point> {
    let mut n = 0usize;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for (x, y) in pts {
        sx += x;
        sy += y;
        n += 1;
    }
    (n > 0).then(|| (sx / n as f64, sy / n as f64))
}
