//! Cluster records, the coarse level of the index.

use super::SubSegment;
use crate::{Bounds, LatLng};

/// A contiguous run of sub-segments in emission order, used as a coarse
/// index entry. Clusters carry a wider rectangle buffer than individual
/// sub-segments (twice the index buffer per side), giving them a larger
/// capture radius during the first query stage.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Dense 0-based cluster identifier.
    pub cluster_id: usize,
    /// First outer segment this run touches.
    pub start_segment_index: usize,
    /// Last outer segment this run touches.
    pub end_segment_index: usize,
    /// `sub_segment_index` of the run's first member.
    pub start_sub_segment_index: usize,
    /// `sub_segment_index` of the run's last member.
    pub end_sub_segment_index: usize,
    /// Mean of all member endpoint coordinates (both endpoints of every
    /// member contribute).
    pub centroid: LatLng,
    /// Union of member endpoints, padded by twice the index buffer.
    rect: Bounds,
}

impl Cluster {
    /// Build a cluster from a non-empty run of consecutive sub-segments.
    pub(crate) fn from_run(cluster_id: usize, members: &[SubSegment], buffer: f64) -> Self {
        debug_assert!(!members.is_empty());

        let first = &members[0];
        let last = &members[members.len() - 1];

        let mut bounds = Bounds::from_pair(&first.start, &first.end);
        let mut lat_sum = 0.0;
        let mut lng_sum = 0.0;
        for sub in members {
            bounds.include(&sub.start);
            bounds.include(&sub.end);
            lat_sum += sub.start.latitude + sub.end.latitude;
            lng_sum += sub.start.longitude + sub.end.longitude;
        }
        let n = (members.len() * 2) as f64;

        Self {
            cluster_id,
            start_segment_index: first.segment_index,
            end_segment_index: last.segment_index,
            start_sub_segment_index: first.sub_segment_index,
            end_sub_segment_index: last.sub_segment_index,
            centroid: LatLng::new(lat_sum / n, lng_sum / n),
            rect: bounds.expanded(2.0 * buffer),
        }
    }

    /// Padded bounding rectangle used for R-tree placement.
    pub fn rect(&self) -> &Bounds {
        &self.rect
    }
}
