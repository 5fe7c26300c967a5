//! Index construction: validation, sub-segment emission, clustering and
//! R-tree bulk loading.

use log::debug;
use rstar::RTree;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{Cluster, RectEntry, RouteIndex, SubSegment};
use crate::{Bounds, DistanceFn, IndexConfig, Result, RouteInfo, RouteSnapError, Segment};

pub(crate) fn build(route: &[Segment], config: IndexConfig) -> Result<RouteIndex> {
    validate(route, &config)?;

    let IndexConfig {
        distance_calculator: distance,
        use_cluster_level,
        cluster_size,
        buffer_size,
    } = config;

    // First pass: one sub-segment per consecutive vertex pair, in input
    // order, with per-segment index restart.
    let per_segment = emit(route, buffer_size, &distance);

    let mut sub_segments = Vec::with_capacity(per_segment.iter().map(Vec::len).sum());
    let mut segment_lookup = vec![Vec::new(); route.len()];
    let mut total_length_meters = 0.0;
    let mut bounds: Option<Bounds> = None;

    for subs in per_segment {
        for sub in subs {
            total_length_meters += sub.length_meters;
            match bounds.as_mut() {
                Some(b) => {
                    b.include(&sub.start);
                    b.include(&sub.end);
                }
                None => {
                    bounds = Some(Bounds::from_pair(&sub.start, &sub.end));
                }
            }
            segment_lookup[sub.segment_index].push(sub_segments.len());
            sub_segments.push(sub);
        }
    }

    let info = RouteInfo {
        segment_count: route.len(),
        sub_segment_count: sub_segments.len(),
        total_length_meters,
        bounds,
    };

    let sub_segment_tree = RTree::bulk_load(
        sub_segments
            .iter()
            .enumerate()
            .map(|(i, sub)| RectEntry::new(sub.rect(), i))
            .collect(),
    );

    // The coarse level only pays off once there is more than a handful of
    // clusters to discriminate between.
    let clusters = if use_cluster_level && sub_segments.len() > 2 * cluster_size {
        sub_segments
            .chunks(cluster_size)
            .enumerate()
            .map(|(cluster_id, run)| Cluster::from_run(cluster_id, run, buffer_size))
            .collect()
    } else {
        Vec::new()
    };

    let cluster_tree = RTree::bulk_load(
        clusters
            .iter()
            .enumerate()
            .map(|(i, cluster)| RectEntry::new(cluster.rect(), i))
            .collect(),
    );

    debug!(
        "built route index: {} segments, {} sub-segments, {} clusters, {:.0}m total",
        info.segment_count,
        info.sub_segment_count,
        clusters.len(),
        info.total_length_meters
    );

    Ok(RouteIndex {
        sub_segments,
        segment_lookup,
        clusters,
        sub_segment_tree,
        cluster_tree,
        info,
        distance,
        buffer_size,
    })
}

fn validate(route: &[Segment], config: &IndexConfig) -> Result<()> {
    if route.is_empty() {
        return Err(RouteSnapError::EmptyRoute);
    }
    if route.iter().all(|segment| segment.is_empty()) {
        return Err(RouteSnapError::NoCoordinates {
            segment_count: route.len(),
        });
    }
    if config.cluster_size == 0 {
        return Err(RouteSnapError::InvalidConfig {
            message: "cluster_size must be positive".to_string(),
        });
    }
    if !(config.buffer_size > 0.0) {
        return Err(RouteSnapError::InvalidConfig {
            message: "buffer_size must be positive".to_string(),
        });
    }
    Ok(())
}

/// Emit the sub-segments of one outer segment. Segments with fewer than
/// two points contribute nothing.
fn emit_segment(
    segment_index: usize,
    points: &[crate::LatLng],
    buffer: f64,
    distance: &DistanceFn,
) -> Vec<SubSegment> {
    points
        .windows(2)
        .enumerate()
        .map(|(sub_segment_index, pair)| {
            SubSegment::new(
                pair[0],
                pair[1],
                segment_index,
                sub_segment_index,
                buffer,
                distance,
            )
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn emit(route: &[Segment], buffer: f64, distance: &DistanceFn) -> Vec<Vec<SubSegment>> {
    route
        .par_iter()
        .enumerate()
        .map(|(i, points)| emit_segment(i, points, buffer, distance))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn emit(route: &[Segment], buffer: f64, distance: &DistanceFn) -> Vec<Vec<SubSegment>> {
    route
        .iter()
        .enumerate()
        .map(|(i, points)| emit_segment(i, points, buffer, distance))
        .collect()
}
