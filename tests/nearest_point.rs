//! End-to-end nearest-point scenarios on small literal routes.

use routesnap::{LatLng, QueryOptions, RouteIndex};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn unit_square() -> Vec<Vec<LatLng>> {
    vec![vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 1.0),
        LatLng::new(1.0, 1.0),
        LatLng::new(1.0, 0.0),
        LatLng::new(0.0, 0.0),
    ]]
}

#[test]
fn test_straight_equatorial_line() {
    let route = vec![vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 1.0),
        LatLng::new(0.0, 2.0),
        LatLng::new(0.0, 3.0),
    ]];
    let index = RouteIndex::new(&route).unwrap();

    let result = index.find_nearest_point(&LatLng::new(0.0, 1.5));
    assert!(result.distance_meters < 1.0);
    assert!(approx_eq(result.point.latitude, 0.0, 1e-6));
    assert!(approx_eq(result.point.longitude, 1.5, 1e-6));
    assert_eq!(result.segment_index, 0);
}

#[test]
fn test_off_axis_point() {
    let route = vec![vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 1.0),
        LatLng::new(0.0, 2.0),
        LatLng::new(0.0, 3.0),
    ]];
    let index = RouteIndex::new(&route).unwrap();

    let result = index.find_nearest_point(&LatLng::new(0.1, 1.5));
    // 0.1 degrees of latitude is ~11.1 km
    assert!(approx_eq(result.distance_meters, 11_119.5, 30.0));
    assert!(approx_eq(result.point.latitude, 0.0, 1e-4));
    assert!(approx_eq(result.point.longitude, 1.5, 1e-4));
}

#[test]
fn test_rectangle_edge_projection() {
    let index = RouteIndex::new(&unit_square()).unwrap();

    // South of the bottom edge
    let result = index.find_nearest_point(&LatLng::new(-0.5, 0.5));
    assert!(approx_eq(result.point.latitude, 0.0, 0.01));
    assert!(approx_eq(result.point.longitude, 0.5, 0.01));

    // West of the left edge
    let result = index.find_nearest_point(&LatLng::new(0.5, -0.5));
    assert!(approx_eq(result.point.latitude, 0.5, 0.01));
    assert!(approx_eq(result.point.longitude, 0.0, 0.01));
}

#[test]
fn test_rectangle_corner_projection() {
    let index = RouteIndex::new(&unit_square()).unwrap();

    let result = index.find_nearest_point(&LatLng::new(1.1, 1.1));
    assert!(approx_eq(result.point.latitude, 1.0, 0.01));
    assert!(approx_eq(result.point.longitude, 1.0, 0.01));
}

#[test]
fn test_symmetry_across_route() {
    let route = vec![vec![LatLng::new(0.0, -1.0), LatLng::new(0.0, 1.0)]];
    let index = RouteIndex::new(&route).unwrap();

    let north = index.find_nearest_point(&LatLng::new(0.5, 0.0));
    let south = index.find_nearest_point(&LatLng::new(-0.5, 0.0));

    assert!(approx_eq(north.point.latitude, south.point.latitude, 0.01));
    assert!(approx_eq(north.point.longitude, south.point.longitude, 0.01));
    assert!(approx_eq(north.distance_meters, south.distance_meters, 1.0));
}

#[test]
fn test_vertex_target_returns_vertex() {
    let route = vec![vec![
        LatLng::new(47.37, 8.55),
        LatLng::new(47.372, 8.553),
        LatLng::new(47.375, 8.554),
        LatLng::new(47.377, 8.551),
    ]];
    let index = RouteIndex::new(&route).unwrap();

    for vertex in &route[0] {
        let result = index.find_nearest_point(vertex);
        assert!(result.distance_meters < 0.1, "vertex distance {}", result.distance_meters);
        assert!(approx_eq(result.point.latitude, vertex.latitude, 0.01));
        assert!(approx_eq(result.point.longitude, vertex.longitude, 0.01));
    }
}

#[test]
fn test_result_indexes_bracketing_sub_segment() {
    let index = RouteIndex::new(&unit_square()).unwrap();

    for target in [
        LatLng::new(-0.3, 0.7),
        LatLng::new(0.4, 1.6),
        LatLng::new(1.2, 0.5),
        LatLng::new(0.5, 0.5),
    ] {
        let result = index.find_nearest_point(&target);
        assert!(result.is_matched());

        let sub = index
            .sub_segments()
            .iter()
            .find(|s| {
                s.segment_index == result.segment_index as usize
                    && s.sub_segment_index == result.sub_segment_index as usize
            })
            .expect("result indices must name an existing sub-segment");

        // The projected point lies between the endpoints on both axes.
        let (min_lat, max_lat) = (
            sub.start.latitude.min(sub.end.latitude),
            sub.start.latitude.max(sub.end.latitude),
        );
        let (min_lng, max_lng) = (
            sub.start.longitude.min(sub.end.longitude),
            sub.start.longitude.max(sub.end.longitude),
        );
        assert!(result.point.latitude >= min_lat - 1e-9);
        assert!(result.point.latitude <= max_lat + 1e-9);
        assert!(result.point.longitude >= min_lng - 1e-9);
        assert!(result.point.longitude <= max_lng + 1e-9);
    }
}

#[test]
fn test_far_target_terminates_with_nearest_endpoint() {
    // A tiny route and a target ~10 degrees away: every radius search
    // misses and the global-sort fallback must still answer.
    let route = vec![vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.001)]];
    let index = RouteIndex::new(&route).unwrap();

    let result = index.find_nearest_point(&LatLng::new(10.0, 10.0));
    assert!(result.is_matched());
    assert!(approx_eq(result.point.latitude, 0.0, 1e-6));
    assert!(approx_eq(result.point.longitude, 0.001, 1e-6));
    assert!(result.distance_meters > 1_000_000.0);
}

#[test]
fn test_branching_routes_share_endpoint() {
    // Two segments forking from a common vertex; branching is represented
    // only by shared endpoints.
    let route = vec![
        vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)],
        vec![LatLng::new(0.0, 1.0), LatLng::new(1.0, 1.0)],
    ];
    let index = RouteIndex::new(&route).unwrap();

    let east = index.find_nearest_point(&LatLng::new(0.01, 0.5));
    assert_eq!(east.segment_index, 0);

    let north = index.find_nearest_point(&LatLng::new(0.5, 1.01));
    assert_eq!(north.segment_index, 1);
}

#[test]
fn test_custom_query_options() {
    let route = vec![vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 1.0),
        LatLng::new(0.0, 2.0),
    ]];
    let index = RouteIndex::new(&route).unwrap();

    // A generous initial radius hits on the first search.
    let opts = QueryOptions {
        initial_search_radius_degrees: 0.5,
        ..QueryOptions::default()
    };
    let result = index.find_nearest_point_with(&LatLng::new(0.2, 1.0), &opts);
    assert!(approx_eq(result.point.longitude, 1.0, 1e-4));
}
