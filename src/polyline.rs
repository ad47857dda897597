//! Polyline representation for route geometries.
//!
//! Route paths travel through the planner as decoded coordinate sequences.
//! Compact polyline encodings belong at API boundaries (when receiving from
//! the routing service or sending to a frontend), not inside the core.

use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;

/// A route geometry as an ordered sequence of decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// An empty geometry, used for legs the routing service could not serve.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_points() {
        let points = vec![
            Coordinate::new(45.5152, -122.6784),
            Coordinate::new(45.5202, -122.6742),
        ];
        let line = Polyline::new(points.clone());
        assert_eq!(line.points(), &points[..]);
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn into_points_returns_owned() {
        let points = vec![Coordinate::new(45.5, -122.6)];
        let line = Polyline::new(points.clone());
        assert_eq!(line.into_points(), points);
    }

    #[test]
    fn empty_geometry() {
        let line = Polyline::empty();
        assert!(line.is_empty());
        assert_eq!(line.len(), 0);
    }

    #[test]
    fn equality_is_pointwise() {
        let a = Polyline::new(vec![Coordinate::new(1.0, 2.0)]);
        let b = Polyline::new(vec![Coordinate::new(1.0, 2.0)]);
        let c = Polyline::new(vec![Coordinate::new(1.0, 2.1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
