use std::sync::Arc;

use floornav_core::{Graph, GraphDocument, GraphError, NavError, Navigator, SearchOptions, Waypoint, INVALID_DISTANCE};
use serde_json::json;

fn linear(levels: [i32; 3]) -> Navigator {
    let doc = json!({
        "width": 100, "height": 100,
        "dots": [
            { "id": 0, "x": 0.0, "y": 0.0, "level": levels[0], "connected": [1] },
            { "id": 1, "x": 0.5, "y": 0.0, "level": levels[1], "connected": [0, 2] },
            { "id": 2, "x": 1.0, "y": 0.0, "level": levels[2], "connected": [1] }
        ]
    });
    Navigator::from_json_str(&doc.to_string()).expect("graph")
}

/// Two floors joined by a stair pair (3 <-> 4).
fn building() -> Navigator {
    let doc = json!({
        "width": 200, "height": 100,
        "dots": [
            { "id": 0, "x": 0.1, "y": 0.1, "level": 1, "connected": [1], "name": "Entrance" },
            { "id": 1, "x": 0.3, "y": 0.1, "level": 1, "connected": [0, 2, 5] },
            { "id": 2, "x": 0.3, "y": 0.5, "level": 1, "connected": [1, 3] },
            { "id": 3, "x": 0.5, "y": 0.5, "level": 1, "connected": [2, 4], "type": "stairs" },
            { "id": 4, "x": 0.5, "y": 0.5, "level": 2, "connected": [3, 6], "type": "stairs" },
            { "id": 5, "x": 0.3, "y": 0.9, "level": 1, "connected": [1] },
            { "id": 6, "x": 0.9, "y": 0.5, "level": 2, "connected": [4], "name": "Lab" }
        ]
    });
    Navigator::from_json_str(&doc.to_string()).expect("graph")
}

#[test]
fn linear_graph_emits_duplicated_interior_points() {
    let mut nav = linear([1, 1, 1]);
    let path = nav.compute_path(0, 2, 1).unwrap();
    assert_eq!(path, vec![0.0, 0.0, 50.0, 0.0, 50.0, 0.0, 100.0, 0.0]);
}

#[test]
fn disconnected_start_yields_empty_path() {
    let doc = json!({
        "width": 10, "height": 10,
        "dots": [
            { "id": 0, "x": 0.0, "y": 0.0, "level": 1, "connected": [] },
            { "id": 1, "x": 1.0, "y": 1.0, "level": 1, "connected": [0] }
        ]
    });
    let mut nav = Navigator::from_json_str(&doc.to_string()).unwrap();
    assert!(nav.compute_path(0, 1, 1).unwrap().is_empty());
    assert_eq!(nav.route(0, 1, 1).unwrap_err(), NavError::NoPathFound { reason: "no-path" });
    assert!(nav.cache().is_empty());
}

#[test]
fn off_floor_nodes_are_dropped() {
    let mut nav = linear([1, 1, 2]);
    let route = nav.route(0, 2, 1).unwrap();
    assert_eq!(route.waypoints, vec![0, 1]);
    assert_eq!(route.segments, vec![0.0, 0.0, 50.0, 0.0]);
}

#[test]
fn unknown_finish_is_out_of_range_and_leaves_scratch_untouched() {
    let mut nav = linear([1, 1, 1]);
    let generation = nav.search_context().generation();
    let err = nav.compute_path(0, 3, 1).unwrap_err();
    assert_eq!(err, NavError::Graph(GraphError::OutOfRange { id: 3, count: 3 }));
    assert_eq!(nav.search_context().generation(), generation);
    for u in 0..3 {
        assert!(!nav.search_context().is_discovered(u));
    }
}

#[test]
fn distance_is_symmetric_and_sentinel_on_bad_ids() {
    let nav = building();
    let g = nav.graph();
    for a in 0..7 {
        for b in 0..7 {
            assert_eq!(g.distance(a, b), g.distance(b, a));
        }
    }
    assert_eq!(g.distance(0, 7), INVALID_DISTANCE);
    assert_eq!(g.distance(70, 0), INVALID_DISTANCE);
}

#[test]
fn endpoints_match_waypoint_positions() {
    let mut nav = building();
    let route = nav.route(0, 3, 1).unwrap();
    let first = nav.graph().position(0).unwrap();
    let last = nav.graph().position(3).unwrap();
    assert_eq!(route.points().next(), Some(first));
    assert_eq!(route.points().last(), Some(last));
    assert_eq!(route.segments.len(), 4 * route.waypoints.len() - 4);
}

#[test]
fn off_floor_finish_ends_at_last_on_floor_node() {
    let mut nav = building();
    let route = nav.route(0, 6, 1).unwrap();
    assert_eq!(route.waypoints, vec![0, 1, 2, 3]);
    let stair = nav.graph().position(3).unwrap();
    assert_eq!(route.points().last(), Some(stair));

    let upstairs = nav.route(0, 6, 2).unwrap();
    assert_eq!(upstairs.waypoints, vec![4, 6]);
}

#[test]
fn floor_with_no_route_nodes_is_empty() {
    let mut nav = building();
    assert!(nav.compute_path(0, 2, 2).unwrap().is_empty());
    assert!(matches!(nav.route(0, 2, 2), Err(NavError::Reconstruction(_))));
}

#[test]
fn single_node_route_is_degenerate() {
    let mut nav = building();
    let route = nav.route(5, 5, 1).unwrap();
    assert_eq!(route.waypoints, vec![5]);
    assert!(route.segments.is_empty());
    assert_eq!(nav.route_length(5, 5).unwrap(), 0.0);
}

#[test]
fn repeated_requests_are_identical() {
    let mut nav = building();
    let a = nav.compute_path(0, 6, 1).unwrap();
    let b = nav.compute_path(0, 6, 1).unwrap();
    assert_eq!(a, b);
    assert_eq!(nav.cache().len(), 1);
}

#[test]
fn cached_route_does_not_leak_across_floors() {
    let mut nav = building();
    let ground = nav.compute_path(0, 6, 1).unwrap();
    let first = nav.compute_path(0, 6, 2).unwrap();
    assert_ne!(ground, first);
    assert_eq!(first.len(), 4);
}

#[test]
fn route_length_spans_every_floor() {
    let mut nav = building();
    // 40 + 40 + 40 + 0 + 80 pixels
    let len = nav.route_length(0, 6).unwrap();
    assert!((len - 200.0).abs() < 1e-3, "len={len}");
    let ground_only = nav.route(0, 6, 1).unwrap();
    assert!((ground_only.length - 120.0).abs() < 1e-3);
    assert!(matches!(nav.route_length(6, 5), Ok(_)));
}

#[test]
fn route_length_without_route_is_error() {
    let doc = json!({
        "width": 10, "height": 10,
        "dots": [
            { "id": 0, "x": 0.0, "y": 0.0, "level": 1, "connected": [] },
            { "id": 1, "x": 1.0, "y": 1.0, "level": 1, "connected": [] }
        ]
    });
    let mut nav = Navigator::from_json_str(&doc.to_string()).unwrap();
    assert!(nav.route_length(0, 1).unwrap_err().is_no_path());
}

#[test]
fn shortest_of_two_branches_wins() {
    let doc = json!({
        "width": 100, "height": 100,
        "dots": [
            { "id": 0, "x": 0.0, "y": 0.0, "level": 1, "connected": [1, 2] },
            { "id": 1, "x": 0.5, "y": 0.9, "level": 1, "connected": [3] },
            { "id": 2, "x": 0.5, "y": 0.1, "level": 1, "connected": [3] },
            { "id": 3, "x": 1.0, "y": 0.0, "level": 1, "connected": [] }
        ]
    });
    let mut nav = Navigator::from_json_str(&doc.to_string()).unwrap();
    assert_eq!(nav.route(0, 3, 1).unwrap().waypoints, vec![0, 2, 3]);
}

#[test]
fn ids_need_not_match_positions() {
    let doc = json!({
        "width": 100, "height": 100,
        "dots": [
            { "id": 42, "x": 1.0, "y": 0.0, "level": 1, "connected": [7] },
            { "id": 7, "x": 0.0, "y": 0.0, "level": 1, "connected": [42] }
        ]
    });
    let mut nav = Navigator::from_json_str(&doc.to_string()).unwrap();
    assert_eq!(nav.compute_path(7, 42, 1).unwrap(), vec![0.0, 0.0, 100.0, 0.0]);
    assert_eq!(nav.waypoint(42).unwrap().x, 1.0);
}

#[test]
fn expansion_limit_reports_no_path() {
    let graph = Arc::new(building().graph().as_ref().clone());
    let opts = SearchOptions { max_expansions: 2, ..SearchOptions::default() };
    let mut nav = Navigator::with_options(graph, opts);
    assert_eq!(nav.route(0, 6, 2).unwrap_err(), NavError::NoPathFound { reason: "expansion-limit" });
    assert!(nav.compute_path(0, 6, 2).unwrap().is_empty());
}

#[test]
fn timeout_reports_no_path() {
    // One-way chain that never reaches the isolated finish.
    const CHAIN: u32 = 400_000;
    let mut dots: Vec<Waypoint> = (0..CHAIN)
        .map(|i| {
            let next = if i + 1 < CHAIN { vec![i + 1] } else { vec![] };
            Waypoint::new(i, i as f32 / CHAIN as f32, 0.0, 1, next)
        })
        .collect();
    dots.push(Waypoint::new(CHAIN, 1.0, 1.0, 1, vec![]));
    let graph = Graph::from_document(GraphDocument { width: 1000, height: 1000, dots }).unwrap();

    let opts = SearchOptions { timeout_ms: 1, ..SearchOptions::default() };
    let mut nav = Navigator::with_options(Arc::new(graph), opts);
    assert_eq!(nav.route(0, CHAIN, 1).unwrap_err(), NavError::NoPathFound { reason: "timeout" });
    assert!(nav.compute_path(0, CHAIN, 1).unwrap().is_empty());
    assert!(nav.cache().is_empty());
    assert!(!nav.search_context().is_visited(0));
}

#[test]
fn malformed_documents_fail_to_load() {
    assert!(matches!(Graph::from_json_str("not json"), Err(GraphError::MalformedGraph(_))));
    assert!(matches!(
        Graph::from_json_str(r#"{"width":1,"height":1,"dots":[{"id":0,"x":"a","y":0,"level":1,"connected":[]}]}"#),
        Err(GraphError::MalformedGraph(_))
    ));
}

#[test]
fn metadata_passes_through() {
    let nav = building();
    let lab = nav.waypoint(6).unwrap();
    assert_eq!(lab.meta.name.as_deref(), Some("Lab"));
    assert_eq!(nav.waypoint(3).unwrap().meta.kind.as_deref(), Some("stairs"));
    assert_eq!(nav.graph().levels(), vec![1, 2]);
}
