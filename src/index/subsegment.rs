//! Sub-segment records, the atomic unit of indexing.

use crate::{Bounds, DistanceFn, LatLng};

/// A single straight edge between two consecutive vertices of an outer
/// segment, with derived values computed once at construction.
#[derive(Debug, Clone)]
pub struct SubSegment {
    /// First vertex of the edge.
    pub start: LatLng,
    /// Second vertex of the edge.
    pub end: LatLng,
    /// 0-based index of the outer segment in the input route.
    pub segment_index: usize,
    /// 0-based index of this edge within its outer segment.
    pub sub_segment_index: usize,
    /// Length per the configured distance function, cached at construction
    /// and never recomputed.
    pub length_meters: f64,
    /// Endpoint bounds expanded by the index buffer on all sides.
    rect: Bounds,
    /// Arithmetic midpoint, used purely as a planar-distance sort key.
    midpoint: LatLng,
}

impl SubSegment {
    pub(crate) fn new(
        start: LatLng,
        end: LatLng,
        segment_index: usize,
        sub_segment_index: usize,
        buffer: f64,
        distance: &DistanceFn,
    ) -> Self {
        let length_meters = distance(&start, &end);
        // Coincident endpoints are legal; the rect degenerates to the
        // buffer square around the point.
        let rect = Bounds::from_pair(&start, &end).expanded(buffer);
        let midpoint = start.midpoint(&end);

        Self {
            start,
            end,
            segment_index,
            sub_segment_index,
            length_meters,
            rect,
            midpoint,
        }
    }

    /// Buffered bounding rectangle used for R-tree placement.
    pub fn rect(&self) -> &Bounds {
        &self.rect
    }

    /// Midpoint sort key.
    pub fn midpoint(&self) -> &LatLng {
        &self.midpoint
    }

    /// Identity pair used for query-time deduplication.
    pub(crate) fn id(&self) -> (usize, usize) {
        (self.segment_index, self.sub_segment_index)
    }
}
