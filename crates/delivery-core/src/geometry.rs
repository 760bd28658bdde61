//! Planar geometry for positions, polygons, and segment tests.
//!
//! Coordinates are treated as a flat plane (longitude on x, latitude on y).
//! Distances are plain Euclidean distances in coordinate units, which is what
//! the step-based move model measures in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::heading::STEP_LENGTH;

/// Points closer than this to an edge are treated as lying on it.
const BOUNDARY_EPSILON: f64 = 1e-12;

/// Errors raised when constructing geometry from untrusted input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),
    #[error("non-finite coordinate ({lng}, {lat})")]
    NonFiniteCoordinate { lng: f64, lat: f64 },
}

/// A point on the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "longitude")]
    pub lng: f64,
    #[serde(rename = "latitude")]
    pub lat: f64,
}

impl Position {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        distance(*self, *other)
    }

    /// True if `other` is strictly closer than one step.
    pub fn is_close_to(&self, other: &Position) -> bool {
        is_close(*self, *other)
    }

    /// True if `other` is strictly closer than `radius`.
    pub fn is_within(&self, other: &Position, radius: f64) -> bool {
        self.distance_to(other) < radius
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

/// Euclidean distance between two positions.
pub fn distance(a: Position, b: Position) -> f64 {
    (a.lng - b.lng).hypot(a.lat - b.lat)
}

/// True if the positions are strictly less than one step apart.
pub fn is_close(a: Position, b: Position) -> bool {
    distance(a, b) < STEP_LENGTH
}

/// A closed polygon. The closing edge from the last vertex back to the first
/// is implied, so a repeated closing vertex in the input is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct Polygon {
    vertices: Vec<Position>,
}

impl Polygon {
    /// Build a polygon, rejecting degenerate or non-finite input.
    pub fn new(mut vertices: Vec<Position>) -> Result<Self, GeometryError> {
        if let Some(bad) = vertices.iter().find(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate {
                lng: bad.lng,
                lat: bad.lat,
            });
        }
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Position] {
        &self.vertices
    }

    /// Iterate over every edge, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Boundary-inclusive containment test.
    pub fn contains(&self, point: Position) -> bool {
        point_in_polygon(point, self)
    }

    /// True if the segment `from -> to` touches or crosses any edge.
    pub fn is_crossed_by(&self, from: Position, to: Position) -> bool {
        self.edges()
            .any(|(a, b)| segments_intersect(from, to, a, b))
    }

    /// Shortest distance from `point` to any edge.
    pub fn distance_to_boundary(&self, point: Position) -> f64 {
        self.edges()
            .map(|(a, b)| distance_to_segment(point, a, b))
            .fold(f64::INFINITY, f64::min)
    }
}

impl TryFrom<Vec<Position>> for Polygon {
    type Error = GeometryError;

    fn try_from(vertices: Vec<Position>) -> Result<Self, Self::Error> {
        Polygon::new(vertices)
    }
}

impl From<Polygon> for Vec<Position> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

/// Ray-casting containment test.
///
/// Counts the edges whose latitude range straddles the point and whose
/// crossing with the point's latitude lies east of it. Points on an edge or
/// vertex are reported as inside.
pub fn point_in_polygon(point: Position, polygon: &Polygon) -> bool {
    let mut inside = false;
    for (a, b) in polygon.edges() {
        if lies_on_edge(a, b, point) {
            return true;
        }
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let crossing_lng = a.lng + (point.lat - a.lat) * (b.lng - a.lng) / (b.lat - a.lat);
            if crossing_lng > point.lng {
                inside = !inside;
            }
        }
    }
    inside
}

/// True if the finite segments `a1-a2` and `b1-b2` cross or touch.
///
/// Collinear segments intersect only if they overlap.
pub fn segments_intersect(a1: Position, a2: Position, b1: Position, b2: Position) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if opposite_sides(d1, d2) && opposite_sides(d3, d4) {
        return true;
    }

    (d1 == 0.0 && within_bounds(b1, b2, a1))
        || (d2 == 0.0 && within_bounds(b1, b2, a2))
        || (d3 == 0.0 && within_bounds(a1, a2, b1))
        || (d4 == 0.0 && within_bounds(a1, a2, b2))
}

/// Distance from `point` to the closest point of segment `a-b`.
pub fn distance_to_segment(point: Position, a: Position, b: Position) -> f64 {
    let (dx, dy) = (b.lng - a.lng, b.lat - a.lat);
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return distance(point, a);
    }
    let t = (((point.lng - a.lng) * dx + (point.lat - a.lat) * dy) / length_sq).clamp(0.0, 1.0);
    distance(point, Position::new(a.lng + t * dx, a.lat + t * dy))
}

/// Signed area of the triangle `p, q, r` (twice over). Positive when `r` is
/// left of the directed line `p -> q`.
fn orientation(p: Position, q: Position, r: Position) -> f64 {
    (q.lng - p.lng) * (r.lat - p.lat) - (q.lat - p.lat) * (r.lng - p.lng)
}

fn opposite_sides(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

/// True if `r` lies inside the bounding box of `p-q`.
fn within_bounds(p: Position, q: Position, r: Position) -> bool {
    r.lng >= p.lng.min(q.lng)
        && r.lng <= p.lng.max(q.lng)
        && r.lat >= p.lat.min(q.lat)
        && r.lat <= p.lat.max(q.lat)
}

fn lies_on_edge(a: Position, b: Position, point: Position) -> bool {
    let length = distance(a, b);
    if length == 0.0 {
        return distance(a, point) <= BOUNDARY_EPSILON;
    }
    let offset = orientation(a, b, point).abs() / length;
    offset <= BOUNDARY_EPSILON
        && point.lng >= a.lng.min(b.lng) - BOUNDARY_EPSILON
        && point.lng <= a.lng.max(b.lng) + BOUNDARY_EPSILON
        && point.lat >= a.lat.min(b.lat) - BOUNDARY_EPSILON
        && point.lat <= a.lat.max(b.lat) + BOUNDARY_EPSILON
}
