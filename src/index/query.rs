//! Nearest-point query engine.
//!
//! Two paths share the same projection primitive:
//! - the *two-stage path* walks the cluster level first, projects the
//!   nearest candidates, then widens the radius against the sub-segment
//!   tree and re-projects whatever survives the prune;
//! - the *direct path* hits the sub-segment tree with adaptive radius
//!   doubling, falling back to a global sort when nothing matches.
//!
//! Every path is total: for any finite location some candidate set is
//! produced and the best projection over it is returned.

use log::debug;
use std::collections::HashSet;

use super::{RouteIndex, SubSegment};
use crate::geo_utils::{planar_distance_sq, project_point_to_segment, METERS_PER_DEGREE};
use crate::{LatLng, QueryOptions, SegmentPoint};

/// Below this distance a stage-1 hit is good enough to return without
/// widening the search.
const NEAR_HIT_DISTANCE_METERS: f64 = 10.0;

/// Slack applied to the squared prune bound in the widened pass.
const PRUNE_SLACK: f64 = 1.5;

/// Number of clusters kept by the nearest-centroid fallback when no
/// cluster rectangle overlaps any search radius.
const CLUSTER_FALLBACK_COUNT: usize = 5;

/// The cluster search stops doubling once the radius exceeds this
/// multiple of the initial value.
const CLUSTER_RADIUS_GROWTH_LIMIT: f64 = 4.0;

impl RouteIndex {
    /// Find the point on the route nearest to `location`, with default
    /// [`QueryOptions`].
    pub fn find_nearest_point(&self, location: &LatLng) -> SegmentPoint {
        self.find_nearest_point_with(location, &QueryOptions::default())
    }

    /// Find the point on the route nearest to `location`.
    ///
    /// Never fails: degenerate geometry and empty searches are handled
    /// inline, and an index without sub-segments yields an unmatched
    /// result (`-1` indices, infinite distance).
    pub fn find_nearest_point_with(
        &self,
        location: &LatLng,
        opts: &QueryOptions,
    ) -> SegmentPoint {
        if self.sub_segments.is_empty() {
            return SegmentPoint::unmatched(*location);
        }

        let small_route = self.sub_segments.len() <= opts.max_initial_segments_to_check;
        if small_route || self.clusters.is_empty() {
            self.find_nearest_direct(location, opts)
        } else {
            self.find_nearest_two_stage(location, opts)
        }
    }

    // ========================================================================
    // Two-stage path
    // ========================================================================

    fn find_nearest_two_stage(&self, location: &LatLng, opts: &QueryOptions) -> SegmentPoint {
        // Stage 1: coarse lookup, then project the nearest candidates.
        let cluster_ids = self.lookup_clusters(location, opts);

        let mut candidates = self.collect_cluster_candidates(&cluster_ids, opts);
        self.sort_by_midpoint_distance(&mut candidates, location);
        candidates.truncate(opts.max_initial_segments_to_check);

        // Only the candidates actually projected count as examined; the
        // widened pass may re-surface ones dropped by the truncation.
        let examined: HashSet<(usize, usize)> = candidates
            .iter()
            .map(|&i| self.sub_segments[i].id())
            .collect();

        let mut best = self.project_best(location, &candidates);
        if best.distance_meters < NEAR_HIT_DISTANCE_METERS {
            return best;
        }

        // Stage 2: widen against the sub-segment tree and re-project
        // whatever survives the prune.
        let radius = (2.0 * opts.initial_search_radius_degrees)
            .max(best.distance_meters / METERS_PER_DEGREE + 2.0 * self.buffer_size)
            .min(opts.max_search_radius_degrees);

        let mut additions: Vec<usize> = self
            .search_sub_segments(location, radius)
            .into_iter()
            .filter(|&i| !examined.contains(&self.sub_segments[i].id()))
            .collect();
        self.sort_by_midpoint_distance(&mut additions, location);

        let budget = opts
            .max_total_segments_to_check
            .saturating_sub(candidates.len());
        let bound = best.distance_meters / METERS_PER_DEGREE + self.buffer_size;
        let bound_sq = bound * bound;

        let mut accepted = 0;
        for &idx in &additions {
            if accepted >= budget {
                break;
            }
            let sub = &self.sub_segments[idx];
            // Candidates are sorted ascending, so the first miss ends the
            // pass.
            if planar_distance_sq(sub.midpoint(), location) >= PRUNE_SLACK * bound_sq {
                break;
            }
            accepted += 1;

            let projected = self.project(location, sub);
            if projected.distance_meters < best.distance_meters {
                best = projected;
            }
        }

        best
    }

    /// Select the clusters to expand: rectangle overlap with doubling
    /// radius, then nearest centroids as a guaranteed-non-empty fallback.
    fn lookup_clusters(&self, location: &LatLng, opts: &QueryOptions) -> Vec<usize> {
        let mut radius = opts.initial_search_radius_degrees;
        let limit = CLUSTER_RADIUS_GROWTH_LIMIT * opts.initial_search_radius_degrees;

        loop {
            let hits = self.search_clusters(location, radius);
            if !hits.is_empty() {
                return hits;
            }
            radius *= 2.0;
            if radius > limit {
                break;
            }
        }

        debug!(
            "no cluster rect within {:.4} deg of ({:.5}, {:.5}); taking {} nearest centroids",
            limit, location.latitude, location.longitude, CLUSTER_FALLBACK_COUNT
        );

        let mut ids: Vec<usize> = (0..self.clusters.len()).collect();
        ids.sort_by(|&a, &b| {
            planar_distance_sq(&self.clusters[a].centroid, location)
                .total_cmp(&planar_distance_sq(&self.clusters[b].centroid, location))
        });
        ids.truncate(CLUSTER_FALLBACK_COUNT);
        ids
    }

    /// Union the sub-segments of every outer segment each cluster spans.
    ///
    /// Collection is by outer-segment membership, not by the cluster's
    /// nominal sub-segment range, so a cluster whose segments are long
    /// contributes more than `cluster_size` candidates. The cap is checked
    /// between segments; the caller sorts and truncates.
    fn collect_cluster_candidates(
        &self,
        cluster_ids: &[usize],
        opts: &QueryOptions,
    ) -> Vec<usize> {
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut candidates = Vec::new();

        'clusters: for &cluster_id in cluster_ids {
            let cluster = &self.clusters[cluster_id];
            for segment in cluster.start_segment_index..=cluster.end_segment_index {
                for &idx in &self.segment_lookup[segment] {
                    if seen.insert(self.sub_segments[idx].id()) {
                        candidates.push(idx);
                    }
                }
                if candidates.len() >= opts.max_initial_segments_to_check {
                    break 'clusters;
                }
            }
        }

        candidates
    }

    // ========================================================================
    // Direct path
    // ========================================================================

    fn find_nearest_direct(&self, location: &LatLng, opts: &QueryOptions) -> SegmentPoint {
        let mut radius = opts.initial_search_radius_degrees;
        let mut hits = self.search_sub_segments(location, radius);

        while hits.is_empty() && radius < opts.max_search_radius_degrees {
            radius = (radius * 2.0).min(opts.max_search_radius_degrees);
            hits = self.search_sub_segments(location, radius);
        }

        if hits.is_empty() {
            // Nothing within the ceiling radius: rank the whole route.
            // O(N), but guarantees termination for targets far from a
            // small route.
            debug!(
                "no sub-segment within {:.4} deg of ({:.5}, {:.5}); scanning whole route",
                opts.max_search_radius_degrees, location.latitude, location.longitude
            );
            hits = (0..self.sub_segments.len()).collect();
        }

        self.sort_by_midpoint_distance(&mut hits, location);
        hits.truncate(opts.max_total_segments_to_check);

        self.project_best(location, &hits)
    }

    // ========================================================================
    // Projection
    // ========================================================================

    /// Project `location` onto one sub-segment: tangent-frame closest
    /// point, then the true distance-function value on it.
    fn project(&self, location: &LatLng, sub: &SubSegment) -> SegmentPoint {
        let point = project_point_to_segment(location, &sub.start, &sub.end);
        SegmentPoint {
            point,
            distance_meters: self.distance(location, &point),
            segment_index: sub.segment_index as i32,
            sub_segment_index: sub.sub_segment_index as i32,
        }
    }

    /// Project onto every candidate and keep the closest.
    fn project_best(&self, location: &LatLng, candidates: &[usize]) -> SegmentPoint {
        let mut best = SegmentPoint::unmatched(*location);
        for &idx in candidates {
            let projected = self.project(location, &self.sub_segments[idx]);
            if projected.distance_meters < best.distance_meters {
                best = projected;
            }
        }
        best
    }

    fn sort_by_midpoint_distance(&self, candidates: &mut [usize], location: &LatLng) {
        candidates.sort_by(|&a, &b| {
            planar_distance_sq(self.sub_segments[a].midpoint(), location)
                .total_cmp(&planar_distance_sq(self.sub_segments[b].midpoint(), location))
        });
    }
}
