//! Planar geometry: [`Point`], [`Bounds`] and [`Course`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

use crate::error::FieldError;

/// A position (or displacement) in the plane.
///
/// `Point` is a plain value type. Equality and hashing are by value:
/// two points are equal when their coordinates have identical bit
/// patterns after folding `-0.0` onto `0.0`. This makes `Point` a
/// lawful `Eq + Hash` key, which the nearest-neighbour cache relies on.
/// NaN coordinates compare equal only to the same NaN bit pattern.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (self - other).norm()
    }

    /// Length of the vector from the origin to this point.
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn canonical_bits(self) -> (u64, u64) {
        // 0.0 == -0.0 numerically; fold them so Eq agrees with Hash.
        let fold = |v: f64| if v == 0.0 { 0u64 } else { v.to_bits() };
        (fold(self.x), fold(self.y))
    }
}

/// Euclidean distance between two points.
///
/// Symmetric, and zero exactly when the points coincide.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bits() == other.canonical_bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Bounds ──────────────────────────────────────────────────────

/// Rectangular map extent anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Map width (exclusive upper bound for `x`).
    pub width: f64,
    /// Map height (exclusive upper bound for `y`).
    pub height: f64,
}

impl Bounds {
    /// Create bounds, rejecting non-finite or non-positive extents.
    pub fn new(width: f64, height: f64) -> Result<Self, FieldError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(FieldError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    /// Whether `p` lies in `[0, width) × [0, height)`.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width && p.y < self.height
    }
}

// ── Course ──────────────────────────────────────────────────────

/// Fixed start, fixed destination and the map the road is drawn on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Course {
    /// Where every path starts.
    pub origin: Point,
    /// Where every path is trying to go.
    pub destination: Point,
    /// Waypoints outside these bounds do not contribute to fitness.
    pub bounds: Bounds,
}

impl Course {
    /// Create a course from explicit endpoints.
    pub fn new(origin: Point, destination: Point, bounds: Bounds) -> Result<Self, FieldError> {
        if !origin.is_finite() {
            return Err(FieldError::NonFiniteEndpoint { which: "origin" });
        }
        if !destination.is_finite() {
            return Err(FieldError::NonFiniteEndpoint {
                which: "destination",
            });
        }
        Ok(Self {
            origin,
            destination,
            bounds,
        })
    }

    /// Corner-to-corner course on a `width × height` screen: origin at
    /// `(0, 0)`, destination at `(width, height)`.
    pub fn for_screen(width: f64, height: f64) -> Result<Self, FieldError> {
        let bounds = Bounds::new(width, height)?;
        Self::new(Point::ZERO, Point::new(width, height), bounds)
    }

    /// Straight-line distance from origin to destination.
    pub fn straight_line(&self) -> f64 {
        self.origin.distance(self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn negative_zero_equals_zero_and_hashes_alike() {
        let a = Point::new(0.0, -0.0);
        let b = Point::new(-0.0, 0.0);
        assert_eq!(a, b);
        let set: HashSet<Point> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn distinct_points_hash_separately() {
        let set: HashSet<Point> = [Point::new(1.0, 2.0), Point::new(2.0, 1.0)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn three_four_five() {
        assert_eq!(distance(Point::ZERO, Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn bounds_are_half_open() {
        let b = Bounds::new(10.0, 5.0).unwrap();
        assert!(b.contains(Point::ZERO));
        assert!(b.contains(Point::new(9.999, 4.999)));
        assert!(!b.contains(Point::new(10.0, 1.0)));
        assert!(!b.contains(Point::new(1.0, 5.0)));
        assert!(!b.contains(Point::new(-0.1, 1.0)));
    }

    #[test]
    fn bounds_reject_degenerate_extent() {
        assert!(Bounds::new(0.0, 5.0).is_err());
        assert!(Bounds::new(5.0, f64::NAN).is_err());
        assert!(Bounds::new(-1.0, 5.0).is_err());
    }

    #[test]
    fn screen_course_runs_corner_to_corner() {
        let c = Course::for_screen(900.0, 600.0).unwrap();
        assert_eq!(c.origin, Point::ZERO);
        assert_eq!(c.destination, Point::new(900.0, 600.0));
        assert!((c.straight_line() - 900.0f64.hypot(600.0)).abs() < 1e-9);
    }

    #[test]
    fn course_rejects_non_finite_endpoint() {
        let b = Bounds::new(1.0, 1.0).unwrap();
        let err = Course::new(Point::new(f64::INFINITY, 0.0), Point::ZERO, b).unwrap_err();
        assert_eq!(err, FieldError::NonFiniteEndpoint { which: "origin" });
    }

    proptest! {
        #[test]
        fn distance_is_symmetric_and_zero_on_self(
            ax in -1e4f64..1e4, ay in -1e4f64..1e4,
            bx in -1e4f64..1e4, by in -1e4f64..1e4,
        ) {
            let p = Point::new(ax, ay);
            let q = Point::new(bx, by);
            prop_assert_eq!(distance(p, q), distance(q, p));
            prop_assert_eq!(distance(p, p), 0.0);
            if p != q {
                prop_assert!(distance(p, q) > 0.0);
            }
        }

        #[test]
        fn triangle_inequality(
            ax in -1e3f64..1e3, ay in -1e3f64..1e3,
            bx in -1e3f64..1e3, by in -1e3f64..1e3,
            cx in -1e3f64..1e3, cy in -1e3f64..1e3,
        ) {
            let a = Point::new(ax, ay);
            let b = Point::new(bx, by);
            let c = Point::new(cx, cy);
            prop_assert!(distance(a, c) <= distance(a, b) + distance(b, c) + 1e-9);
        }
    }
}
