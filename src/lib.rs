//! # Route Snap
//!
//! Spatial index over polyline routes answering "nearest point on route"
//! queries for real-time location snapping.
//!
//! This library provides:
//! - A two-level R-tree index over route sub-segments and clusters
//! - Adaptive-radius nearest-point queries with candidate pruning
//! - Tangent-frame point-to-segment projection with true Haversine distances
//! - A pluggable distance function for map-SDK unit consistency
//!
//! The intended workload is snapping live locations against long polylines
//! (thousands to hundreds of thousands of vertices) with sub-20ms latency
//! on commodity devices: navigation, fitness tracking, fleet tracking and
//! geofencing.
//!
//! ## Features
//!
//! - **`parallel`** - Parallel sub-segment emission during construction (rayon)
//! - **`synthetic`** - Seeded synthetic route generation for tests and benches
//!
//! ## Quick Start
//!
//! ```rust
//! use routesnap::{LatLng, RouteIndex};
//!
//! // A route is a sequence of segments; a segment is a polyline.
//! let route = vec![vec![
//!     LatLng::new(51.5074, -0.1278),
//!     LatLng::new(51.5080, -0.1290),
//!     LatLng::new(51.5090, -0.1300),
//! ]];
//!
//! let index = RouteIndex::new(&route).unwrap();
//! let snapped = index.find_nearest_point(&LatLng::new(51.5081, -0.1295));
//!
//! assert_eq!(snapped.segment_index, 0);
//! assert!(snapped.distance_meters < 100.0);
//! ```
//!
//! ## Limitations
//!
//! The index is read-only after construction and answers only single
//! nearest-point queries (no k-nearest, range or along-route queries).
//! Sub-segments crossing the ±180° antimeridian are not split; distances
//! near that seam degrade.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// Unified error handling
pub mod error;
pub use error::{Result, RouteSnapError};

// Geographic utilities (distance, rectangles, projection)
pub mod geo_utils;

// Two-level spatial index and query engine
pub mod index;
pub use index::{Cluster, RouteIndex, SubSegment};

// Coordinate adapters for user coordinate types
pub mod adapter;
pub use adapter::CoordinateAdapter;

// Synthetic route generator for tests and benchmarks
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude in decimal degrees.
///
/// # Example
/// ```
/// use routesnap::LatLng;
/// let point = LatLng::new(51.5074, -0.1278); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    /// Create a new coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the coordinate is finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Arithmetic midpoint of two coordinates in (lat, lng) degree space.
    pub fn midpoint(&self, other: &LatLng) -> LatLng {
        LatLng::new(
            (self.latitude + other.latitude) / 2.0,
            (self.longitude + other.longitude) / 2.0,
        )
    }
}

/// A segment is one polyline contributed by the caller.
pub type Segment = Vec<LatLng>;

/// A route is an ordered sequence of segments.
pub type Route = Vec<Segment>;

/// Axis-aligned bounding rectangle in (longitude, latitude) degree space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Tight bounds of a point set. Returns `None` for empty input.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::from_pair(first, first);
        for p in &points[1..] {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Tight bounds of two points (any order).
    pub fn from_pair(a: &LatLng, b: &LatLng) -> Self {
        Self {
            min_lat: a.latitude.min(b.latitude),
            max_lat: a.latitude.max(b.latitude),
            min_lng: a.longitude.min(b.longitude),
            max_lng: a.longitude.max(b.longitude),
        }
    }

    /// Grow the bounds to cover a point.
    pub fn include(&mut self, p: &LatLng) {
        self.min_lat = self.min_lat.min(p.latitude);
        self.max_lat = self.max_lat.max(p.latitude);
        self.min_lng = self.min_lng.min(p.longitude);
        self.max_lng = self.max_lng.max(p.longitude);
    }

    /// A copy expanded by `buffer` degrees on all four sides.
    pub fn expanded(&self, buffer: f64) -> Self {
        Self {
            min_lat: self.min_lat - buffer,
            max_lat: self.max_lat + buffer,
            min_lng: self.min_lng - buffer,
            max_lng: self.max_lng + buffer,
        }
    }

    /// Center point of the bounds.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// The nearest point on the route to a query location.
///
/// `segment_index` and `sub_segment_index` identify the sub-segment the
/// point lies on. Both are `-1` (with `distance_meters` = +∞) only when the
/// index holds no sub-segments at all, e.g. a route whose only segment has
/// a single vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPoint {
    /// The snapped point, lying on the route polyline.
    pub point: LatLng,
    /// Distance from the query location to `point`, per the configured
    /// distance function (meters with the default Haversine).
    pub distance_meters: f64,
    /// 0-based index of the outer segment, or -1 when unmatched.
    pub segment_index: i32,
    /// 0-based index of the sub-segment within its segment, or -1.
    pub sub_segment_index: i32,
}

impl SegmentPoint {
    /// Whether the result identifies an actual sub-segment.
    pub fn is_matched(&self) -> bool {
        self.segment_index >= 0
    }

    pub(crate) fn unmatched(point: LatLng) -> Self {
        Self {
            point,
            distance_meters: f64::INFINITY,
            segment_index: -1,
            sub_segment_index: -1,
        }
    }
}

/// Route metadata accumulated during index construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Number of outer segments in the input route.
    pub segment_count: usize,
    /// Total number of emitted sub-segments.
    pub sub_segment_count: usize,
    /// Sum of sub-segment lengths, per the configured distance function.
    pub total_length_meters: f64,
    /// Tight bounds of all sub-segment endpoints, without buffer.
    /// `None` when no sub-segments were emitted.
    pub bounds: Option<Bounds>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Pluggable distance function. Must be non-negative, commutative and
/// return 0 for equal inputs. Reported distances match this function's
/// units; the default is Haversine in meters.
pub type DistanceFn = Arc<dyn Fn(&LatLng, &LatLng) -> f64 + Send + Sync>;

/// Configuration for index construction.
#[derive(Clone)]
pub struct IndexConfig {
    /// Distance function used for cached sub-segment lengths and for the
    /// final distance of every projected point.
    pub distance_calculator: DistanceFn,

    /// Build the coarse cluster level. Even when enabled, the level is
    /// only built once the route exceeds `2 * cluster_size` sub-segments.
    /// Default: true
    pub use_cluster_level: bool,

    /// Number of consecutive sub-segments per cluster.
    /// Default: 50
    pub cluster_size: usize,

    /// Rectangle buffer in degrees applied to every sub-segment rectangle
    /// (clusters use twice this value).
    /// Default: 0.0001 (~11 meters at the equator)
    pub buffer_size: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            distance_calculator: Arc::new(|a, b| geo_utils::haversine_distance(a, b)),
            use_cluster_level: true,
            cluster_size: 50,
            buffer_size: 0.0001,
        }
    }
}

impl fmt::Debug for IndexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexConfig")
            .field("distance_calculator", &"<fn>")
            .field("use_cluster_level", &self.use_cluster_level)
            .field("cluster_size", &self.cluster_size)
            .field("buffer_size", &self.buffer_size)
            .finish()
    }
}

/// Per-query options for [`RouteIndex::find_nearest_point_with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Seed radius in degrees for both the cluster and direct searches.
    /// Default: 0.005 (~500 m)
    pub initial_search_radius_degrees: f64,

    /// Hard ceiling on radius expansion in the direct path.
    /// Default: 0.05 (~5 km)
    pub max_search_radius_degrees: f64,

    /// Cap on candidates projected in the first stage.
    /// Default: 100
    pub max_initial_segments_to_check: usize,

    /// Combined cap across both stages.
    /// Default: 400
    pub max_total_segments_to_check: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            initial_search_radius_degrees: 0.005,
            max_search_radius_degrees: 0.05,
            max_initial_segments_to_check: 100,
            max_total_segments_to_check: 400,
        }
    }
}
