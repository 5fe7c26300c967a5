//! Geographic computation utilities for route snapping.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two coordinates |
//! | [`planar_distance_sq`] | Squared degree-space distance, sort key only |
//! | [`search_bounds`] | Square query rectangle around a center |
//! | [`project_point_to_segment`] | Tangent-frame projection onto a sub-segment |
//! | [`point_to_segment_distance`] | Projection plus Haversine distance |
//!
//! All functions expect WGS84 coordinates (latitude/longitude in degrees).
//!
//! ## Coordinate frames
//!
//! The projection works in an equirectangular tangent frame anchored at the
//! *target's* latitude: `(x, y) = (lng * cos(target_lat), lat)`. Within a
//! few degrees of the target the angular distortion is small and the frame
//! is independent of segment orientation. The returned distance is always
//! the true value of the distance function on the projected point, so a
//! mis-ranked candidate never yields a wrong reported distance.

use crate::{Bounds, LatLng};
use geo::{Distance, Haversine, Point};

/// Approximate meters per degree of great-circle arc, used to convert a
/// meter distance into a degree-scale search radius or prune bound.
pub const METERS_PER_DEGREE: f64 = 100_000.0;

/// Squared tangent-frame length below which a sub-segment is treated as a
/// single point during projection.
const MIN_SEGMENT_LENGTH_SQ: f64 = 1e-10;

/// Great-circle distance between two coordinates in meters (Haversine).
///
/// # Example
///
/// ```rust
/// use routesnap::{geo_utils, LatLng};
///
/// let london = LatLng::new(51.5074, -0.1278);
/// let paris = LatLng::new(48.8566, 2.3522);
/// let dist = geo_utils::haversine_distance(&london, &paris);
/// assert!((dist - 343_560.0).abs() < 5000.0); // ~344 km
/// ```
#[inline]
pub fn haversine_distance(p1: &LatLng, p2: &LatLng) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Squared Euclidean distance in (lat, lng) degree space.
///
/// Used only to order candidates; the magnitude is not meaningful and no
/// latitude scaling is applied. Monotone in true planar distance for small
/// extents, mis-ranks near the poles.
#[inline]
pub fn planar_distance_sq(a: &LatLng, b: &LatLng) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlng = a.longitude - b.longitude;
    dlat * dlat + dlng * dlng
}

/// Axis-aligned square of side `2 * radius_degrees` centered on `center`.
#[inline]
pub fn search_bounds(center: &LatLng, radius_degrees: f64) -> Bounds {
    Bounds {
        min_lat: center.latitude - radius_degrees,
        max_lat: center.latitude + radius_degrees,
        min_lng: center.longitude - radius_degrees,
        max_lng: center.longitude + radius_degrees,
    }
}

/// Project `target` onto the segment `start..end` in the target-local
/// equirectangular tangent frame, returning the closest point on the
/// segment (endpoints included).
///
/// Zero-length segments (tangent-frame length² below 1e-10) project to
/// `start`.
pub fn project_point_to_segment(target: &LatLng, start: &LatLng, end: &LatLng) -> LatLng {
    let factor = target.latitude.to_radians().cos();

    let (sx, sy) = (start.longitude * factor, start.latitude);
    let (ex, ey) = (end.longitude * factor, end.latitude);
    let (px, py) = (target.longitude * factor, target.latitude);

    let dx = ex - sx;
    let dy = ey - sy;
    let len_sq = dx * dx + dy * dy;
    if len_sq < MIN_SEGMENT_LENGTH_SQ {
        return *start;
    }

    let t = (((px - sx) * dx + (py - sy) * dy) / len_sq).clamp(0.0, 1.0);
    let qx = sx + t * dx;
    let qy = sy + t * dy;

    LatLng::new(qy, qx / factor)
}

/// Project `target` onto `start..end` and return the Haversine distance to
/// the projected point.
pub fn point_to_segment_distance(target: &LatLng, start: &LatLng, end: &LatLng) -> f64 {
    let projected = project_point_to_segment(target, start, end);
    haversine_distance(target, &projected)
}
