//! Synthetic route generator for tests and benchmarks.
//!
//! Generates deterministic winding routes and near-route query targets
//! from a seed, so index behavior can be validated against brute-force
//! scans on reproducible data.
//!
//! Feature-gated behind `synthetic` (enabled by default).
//!
//! # Example
//!
//! ```rust
//! use routesnap::synthetic::RouteScenario;
//! use routesnap::LatLng;
//!
//! let scenario = RouteScenario {
//!     origin: LatLng::new(47.37, 8.55),
//!     segment_count: 10,
//!     points_per_segment: 50,
//!     step_meters: 25.0,
//!     seed: 42,
//! };
//!
//! let route = scenario.generate();
//! assert_eq!(route.len(), 10);
//! assert_eq!(route[0].len(), 50);
//! ```

use crate::{LatLng, Route, Segment};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

fn meters_to_deg_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}

fn meters_to_deg_lng(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg_lng = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg_lng.abs() < 1e-10 {
        return 0.0;
    }
    meters / meters_per_deg_lng
}

/// Scenario configuration for generating a synthetic route.
#[derive(Debug, Clone)]
pub struct RouteScenario {
    /// Origin point of the route.
    pub origin: LatLng,
    /// Number of outer segments.
    pub segment_count: usize,
    /// Vertices per segment.
    pub points_per_segment: usize,
    /// Spacing between consecutive vertices in meters.
    pub step_meters: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl RouteScenario {
    /// A winding ~16 km route split into 30 segments, Zurich origin.
    pub fn suburban() -> Self {
        Self {
            origin: LatLng::new(47.37, 8.55),
            segment_count: 30,
            points_per_segment: 26,
            step_meters: 20.0,
            seed: 42,
        }
    }

    /// Generate the route: a continuous winding walk, cut into
    /// `segment_count` consecutive segments that share no vertices.
    pub fn generate(&self) -> Route {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut heading = rng.gen_range(0.0..(2.0 * PI));
        let mut current = self.origin;
        let mut route = Vec::with_capacity(self.segment_count);

        for _ in 0..self.segment_count {
            let mut segment: Segment = Vec::with_capacity(self.points_per_segment);
            for _ in 0..self.points_per_segment {
                segment.push(current);

                // Realistic turns, max ~17 degrees per step
                heading += rng.gen_range(-0.3..0.3);
                let dlat = meters_to_deg_lat(self.step_meters * heading.sin());
                let dlng = meters_to_deg_lng(self.step_meters * heading.cos(), current.latitude);
                current = LatLng::new(current.latitude + dlat, current.longitude + dlng);
            }
            route.push(segment);
        }

        route
    }
}

/// Deterministic query targets offset from random route vertices by up to
/// `max_offset_meters`.
pub fn targets_near_route(
    route: &[Segment],
    count: usize,
    max_offset_meters: f64,
    seed: u64,
) -> Vec<LatLng> {
    let vertices: Vec<LatLng> = route.iter().flatten().copied().collect();
    assert!(!vertices.is_empty(), "route has no vertices");

    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let vertex = vertices[rng.gen_range(0..vertices.len())];
            let bearing = rng.gen_range(0.0..(2.0 * PI));
            let offset = rng.gen_range(0.0..max_offset_meters);
            LatLng::new(
                vertex.latitude + meters_to_deg_lat(offset * bearing.sin()),
                vertex.longitude + meters_to_deg_lng(offset * bearing.cos(), vertex.latitude),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_generation() {
        let scenario = RouteScenario::suburban();
        let a = scenario.generate();
        let b = scenario.generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shape() {
        let scenario = RouteScenario {
            origin: LatLng::new(0.0, 0.0),
            segment_count: 3,
            points_per_segment: 5,
            step_meters: 10.0,
            seed: 7,
        };
        let route = scenario.generate();
        assert_eq!(route.len(), 3);
        assert!(route.iter().all(|s| s.len() == 5));

        // Segments continue from one another
        let gap = crate::geo_utils::haversine_distance(
            route[0].last().unwrap(),
            route[1].first().unwrap(),
        );
        assert!(gap < 15.0);
    }

    #[test]
    fn test_step_spacing() {
        let scenario = RouteScenario::suburban();
        let route = scenario.generate();
        for pair in route[0].windows(2) {
            let d = crate::geo_utils::haversine_distance(&pair[0], &pair[1]);
            assert!((d - 20.0).abs() < 1.0, "vertex spacing {d}m, expected ~20m");
        }
    }

    #[test]
    fn test_targets_near_route() {
        let route = RouteScenario::suburban().generate();
        let targets = targets_near_route(&route, 20, 100.0, 9);
        assert_eq!(targets.len(), 20);

        for target in &targets {
            let nearest = route
                .iter()
                .flatten()
                .map(|v| crate::geo_utils::haversine_distance(v, target))
                .fold(f64::INFINITY, f64::min);
            assert!(nearest <= 100.5);
        }
    }
}
