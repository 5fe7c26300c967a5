//! Coordinate adapters for plugging user coordinate types into the index.
//!
//! The index itself is monomorphic over [`LatLng`]; adapters lift arbitrary
//! coordinate shapes (map-SDK points, tuples, structs) to it at the edges,
//! so no dynamic dispatch sits on the query hot path.

use crate::{LatLng, Route, Segment};

/// Capability set lifting a user coordinate type to [`LatLng`] and back.
///
/// Only `from_coord` and `to_coord` are required; segment and route
/// conversion are provided.
///
/// # Example
///
/// ```rust
/// use routesnap::{CoordinateAdapter, RouteIndex};
/// use routesnap::adapter::TupleAdapter;
///
/// let raw = vec![vec![(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]];
/// let route = TupleAdapter.from_route(&raw);
/// let index = RouteIndex::new(&route).unwrap();
/// assert_eq!(index.sub_segment_count(), 2);
/// ```
pub trait CoordinateAdapter {
    /// The user coordinate type.
    type Coord;

    /// Lift a user coordinate to a [`LatLng`].
    fn from_coord(&self, coord: &Self::Coord) -> LatLng;

    /// Lower a [`LatLng`] back to the user coordinate type.
    fn to_coord(&self, point: &LatLng) -> Self::Coord;

    /// Convert one polyline of user coordinates.
    fn from_segment(&self, coords: &[Self::Coord]) -> Segment {
        coords.iter().map(|c| self.from_coord(c)).collect()
    }

    /// Convert a whole route of user coordinates.
    fn from_route(&self, segments: &[Vec<Self::Coord>]) -> Route {
        segments.iter().map(|s| self.from_segment(s)).collect()
    }
}

/// Adapter for `(latitude, longitude)` tuples.
#[derive(Debug, Clone, Copy, Default)]
pub struct TupleAdapter;

impl CoordinateAdapter for TupleAdapter {
    type Coord = (f64, f64);

    fn from_coord(&self, coord: &(f64, f64)) -> LatLng {
        LatLng::new(coord.0, coord.1)
    }

    fn to_coord(&self, point: &LatLng) -> (f64, f64) {
        (point.latitude, point.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_round_trip() {
        let adapter = TupleAdapter;
        let point = adapter.from_coord(&(47.37, 8.55));
        assert_eq!(point, LatLng::new(47.37, 8.55));
        assert_eq!(adapter.to_coord(&point), (47.37, 8.55));
    }

    #[test]
    fn test_from_route_shape() {
        let adapter = TupleAdapter;
        let route = adapter.from_route(&[
            vec![(0.0, 0.0), (0.0, 1.0)],
            vec![],
            vec![(1.0, 1.0)],
        ]);
        assert_eq!(route.len(), 3);
        assert_eq!(route[0].len(), 2);
        assert!(route[1].is_empty());
        assert_eq!(route[2], vec![LatLng::new(1.0, 1.0)]);
    }
}
