//! # Two-Level Spatial Index
//!
//! The index is built once from a route and is thereafter immutable; it
//! may be queried concurrently from any number of threads.
//!
//! ## Architecture
//!
//! Two bulk-loaded R-trees sit over record arenas owned by the index:
//! - the sub-segment tree, over buffered per-edge rectangles,
//! - the cluster tree, over padded rectangles of contiguous runs of
//!   sub-segments (the coarse level, built only for larger routes).
//!
//! Queries either walk the cluster level first and then narrow down
//! (two-stage path), or hit the sub-segment tree directly for small
//! routes, with adaptive radius expansion and a global-sort fallback
//! that keeps every query total.

pub mod builder;
pub mod cluster;
pub mod query;
pub mod subsegment;

pub use cluster::Cluster;
pub use subsegment::SubSegment;

use rstar::{RTree, RTreeObject, AABB};
use std::fmt;

use crate::{Bounds, DistanceFn, IndexConfig, LatLng, Result, RouteInfo, Segment};

/// R-tree entry: a rectangle envelope plus an index into one of the
/// record arenas owned by the [`RouteIndex`].
#[derive(Debug, Clone)]
pub(crate) struct RectEntry {
    envelope: AABB<[f64; 2]>,
    pub(crate) idx: usize,
}

impl RectEntry {
    pub(crate) fn new(rect: &Bounds, idx: usize) -> Self {
        Self {
            envelope: to_aabb(rect),
            idx,
        }
    }
}

impl RTreeObject for RectEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Convert bounds to an rstar envelope in (lng, lat) axis order.
pub(crate) fn to_aabb(bounds: &Bounds) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [bounds.min_lng, bounds.min_lat],
        [bounds.max_lng, bounds.max_lat],
    )
}

/// Read-only spatial index over a polyline route, answering nearest-point
/// queries via [`RouteIndex::find_nearest_point`].
///
/// # Example
///
/// ```rust
/// use routesnap::{LatLng, RouteIndex};
///
/// let route = vec![vec![
///     LatLng::new(0.0, 0.0),
///     LatLng::new(0.0, 1.0),
/// ]];
/// let index = RouteIndex::new(&route).unwrap();
///
/// let snapped = index.find_nearest_point(&LatLng::new(0.1, 0.5));
/// assert_eq!(snapped.segment_index, 0);
/// assert!(snapped.distance_meters > 11_000.0 && snapped.distance_meters < 11_200.0);
/// ```
pub struct RouteIndex {
    pub(crate) sub_segments: Vec<SubSegment>,
    /// segment_index -> arena indices of that segment's sub-segments,
    /// in emission order. Used by the query's cluster-expansion step.
    pub(crate) segment_lookup: Vec<Vec<usize>>,
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) sub_segment_tree: RTree<RectEntry>,
    pub(crate) cluster_tree: RTree<RectEntry>,
    pub(crate) info: RouteInfo,
    pub(crate) distance: DistanceFn,
    pub(crate) buffer_size: f64,
}

impl RouteIndex {
    /// Build an index over `route` with the default configuration.
    ///
    /// Fails with an argument error when the route has no segments, or
    /// when none of its segments has any points.
    pub fn new(route: &[Segment]) -> Result<Self> {
        Self::with_config(route, IndexConfig::default())
    }

    /// Build an index over `route` with a custom configuration.
    pub fn with_config(route: &[Segment], config: IndexConfig) -> Result<Self> {
        builder::build(route, config)
    }

    /// Route metadata accumulated during construction.
    pub fn info(&self) -> &RouteInfo {
        &self.info
    }

    /// All sub-segment records, in emission order.
    pub fn sub_segments(&self) -> &[SubSegment] {
        &self.sub_segments
    }

    /// Cluster records; empty when the coarse level was not built.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Number of outer segments in the input route.
    pub fn segment_count(&self) -> usize {
        self.segment_lookup.len()
    }

    /// Total number of indexed sub-segments.
    pub fn sub_segment_count(&self) -> usize {
        self.sub_segments.len()
    }

    /// Whether the index holds no sub-segments at all.
    pub fn is_empty(&self) -> bool {
        self.sub_segments.is_empty()
    }

    /// Whether the coarse cluster level was built.
    pub fn has_cluster_level(&self) -> bool {
        !self.clusters.is_empty()
    }

    /// Evaluate the configured distance function.
    pub(crate) fn distance(&self, a: &LatLng, b: &LatLng) -> f64 {
        (self.distance)(a, b)
    }

    /// Sub-segment arena indices whose buffered rectangles overlap the
    /// square of `radius_degrees` around `center`.
    pub(crate) fn search_sub_segments(&self, center: &LatLng, radius_degrees: f64) -> Vec<usize> {
        let query = to_aabb(&crate::geo_utils::search_bounds(center, radius_degrees));
        self.sub_segment_tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.idx)
            .collect()
    }

    /// Cluster arena indices whose padded rectangles overlap the square
    /// of `radius_degrees` around `center`.
    pub(crate) fn search_clusters(&self, center: &LatLng, radius_degrees: f64) -> Vec<usize> {
        let query = to_aabb(&crate::geo_utils::search_bounds(center, radius_degrees));
        self.cluster_tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.idx)
            .collect()
    }
}

impl fmt::Debug for RouteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteIndex")
            .field("segment_count", &self.segment_count())
            .field("sub_segment_count", &self.sub_segment_count())
            .field("cluster_count", &self.clusters.len())
            .field("buffer_size", &self.buffer_size)
            .finish()
    }
}
