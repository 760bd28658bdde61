//! Path search integration tests.
//!
//! Exercises full legs against no-fly zones and the central area.

use delivery_core::{FlightRules, Heading, NoFlyZone, PathFinder, Polygon, Position, ZoneMap, STEP_LENGTH};

fn rect(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Vec<Position> {
    vec![
        Position::new(min_lng, min_lat),
        Position::new(max_lng, min_lat),
        Position::new(max_lng, max_lat),
        Position::new(min_lng, max_lat),
    ]
}

fn central(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> ZoneMap {
    ZoneMap::new(vec![], Some(Polygon::new(rect(min_lng, min_lat, max_lng, max_lat)).unwrap()))
}

#[test]
fn test_straight_east_route() {
    let zones = ZoneMap::default();
    let mut finder = PathFinder::new(&zones, &FlightRules::default());
    let start = Position::new(0.0, 0.0);
    let end = Position::new(1.0, 0.0);

    let route = finder.find_path(start, end).unwrap();

    // Search stops one step short: the first position strictly within a step.
    let expected = (1.0 / STEP_LENGTH).ceil() as usize - 1;
    assert_eq!(route.len(), expected);
    assert!(route.steps.iter().all(|s| s.heading == Heading::E));
    assert!(route.end().is_close_to(&end));
}

#[test]
fn test_route_avoids_no_fly_zone() {
    let start = Position::new(0.0, 0.0);
    let end = Position::new(0.003, 0.0);

    let open = ZoneMap::default();
    let direct = PathFinder::new(&open, &FlightRules::default())
        .find_path(start, end)
        .unwrap();

    let zones = ZoneMap::new(
        vec![NoFlyZone::new("block", rect(0.001, -0.0005, 0.002, 0.0005)).unwrap()],
        None,
    );
    let route = PathFinder::new(&zones, &FlightRules::default())
        .find_path(start, end)
        .unwrap();

    assert!(route.len() > direct.len());
    assert!(route.end().is_close_to(&end));
    for step in &route.steps {
        assert!(!zones.crosses_no_fly_zone(step.from, step.to));
        assert!(!zones.in_no_fly_zone(step.to));
    }
}

#[test]
fn test_route_inside_central_area_never_crosses() {
    let zones = central(-0.01, -0.01, 0.01, 0.01);
    let route = PathFinder::new(&zones, &FlightRules::default())
        .find_path(Position::new(0.0, 0.0), Position::new(0.003, 0.001))
        .unwrap();
    assert_eq!(route.central_crossings(&zones), 0);
}

#[test]
fn test_route_into_central_area_crosses_once() {
    let zones = central(0.002, -0.005, 0.01, 0.005);
    let end = Position::new(0.004, 0.0);
    let route = PathFinder::new(&zones, &FlightRules::default())
        .find_path(Position::new(0.0, 0.0), end)
        .unwrap();
    assert_eq!(route.central_crossings(&zones), 1);
    assert!(zones.in_central_area(route.end()));
}

#[test]
fn test_route_goes_around_central_area() {
    let zones = central(0.001, -0.0005, 0.002, 0.0005);
    let route = PathFinder::new(&zones, &FlightRules::default())
        .find_path(Position::new(0.0, 0.0), Position::new(0.003, 0.0))
        .unwrap();
    // Clipping a corner counts as the leg's single crossing.
    assert!(route.central_crossings(&zones) <= 1);
    assert!(route.steps.iter().all(|s| !zones.in_central_area(s.to)));
}

#[test]
fn test_route_out_of_central_area_crosses_once() {
    let zones = central(-0.002, -0.002, 0.002, 0.002);
    let end = Position::new(0.004, 0.0);
    let route = PathFinder::new(&zones, &FlightRules::default())
        .find_path(Position::new(0.0, 0.0), end)
        .unwrap();
    assert_eq!(route.central_crossings(&zones), 1);
    assert!(!zones.in_central_area(route.end()));
}

#[test]
fn test_target_in_boundary_pocket_reached_from_outside() {
    // The target sits just inside the left edge, shut in by a C-shaped zone
    // that opens onto the boundary. Only a leg that leaves the area and comes
    // back within a step of the edge can reach it.
    let zones = ZoneMap::new(
        vec![NoFlyZone::new(
            "pocket",
            vec![
                Position::new(0.0, 0.5003),
                Position::new(0.0003, 0.5003),
                Position::new(0.0003, 0.4997),
                Position::new(0.0, 0.4997),
                Position::new(0.0, 0.4998),
                Position::new(0.0002, 0.4998),
                Position::new(0.0002, 0.5002),
                Position::new(0.0, 0.5002),
            ],
        )
        .unwrap()],
        Some(Polygon::new(rect(0.0, 0.0, 1.0, 1.0)).unwrap()),
    );
    let end = Position::new(0.00001, 0.5);

    let route = PathFinder::new(&zones, &FlightRules::default())
        .find_path(Position::new(0.0008, 0.5), end)
        .unwrap();

    assert!(route.end().is_close_to(&end));
    assert!(!zones.in_central_area(route.end()));
    assert_eq!(route.central_crossings(&zones), 1);
    for step in &route.steps {
        assert!(!zones.crosses_no_fly_zone(step.from, step.to));
    }
}
