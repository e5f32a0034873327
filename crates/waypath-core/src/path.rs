//! The append-only waypoint sequence produced by simulation.

use std::ops::Index;

use crate::geometry::Point;

/// Ordered waypoints from the course origin onward.
///
/// A `Path` is never empty: it is created with its origin and only ever
/// grows by [`push`](Self::push). The simulator owns it while stepping and
/// hands it out read-only once the run terminates.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Start a path at `origin`.
    pub fn new(origin: Point) -> Self {
        Self {
            points: vec![origin],
        }
    }

    /// Start a path at `origin` with room for `capacity` waypoints.
    pub fn with_capacity(origin: Point, capacity: usize) -> Self {
        let mut points = Vec::with_capacity(capacity.max(1));
        points.push(origin);
        Self { points }
    }

    /// Append a waypoint.
    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    /// The first waypoint.
    pub fn origin(&self) -> Point {
        self.points[0]
    }

    /// The most recent waypoint.
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Number of waypoints, including the origin.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All waypoints in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterate over the waypoints.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Sum of distances between consecutive waypoints.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }

    /// Consume the path, returning its waypoints.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl Index<usize> for Path {
    type Output = Point;

    fn index(&self, i: usize) -> &Point {
        &self.points[i]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin() {
        let p = Path::new(Point::new(2.0, 3.0));
        assert_eq!(p.len(), 1);
        assert_eq!(p.origin(), Point::new(2.0, 3.0));
        assert_eq!(p.last(), p.origin());
        assert!(!p.is_empty());
    }

    #[test]
    fn single_point_has_zero_length() {
        assert_eq!(Path::new(Point::ZERO).length(), 0.0);
    }

    #[test]
    fn length_sums_segments() {
        let mut p = Path::new(Point::ZERO);
        p.push(Point::new(3.0, 4.0));
        p.push(Point::new(3.0, 10.0));
        assert_eq!(p.length(), 11.0);
        assert_eq!(p[1], Point::new(3.0, 4.0));
        assert_eq!(p.iter().count(), 3);
    }
}
