//! No-fly zones and the central area.
//!
//! No-fly zones are hard exclusions: a move whose segment touches any zone
//! edge is never allowed. The central area is soft: a single leg may cross its
//! boundary once, but not twice.

use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryError, Polygon, Position};

/// A named polygon the drone may never fly into or across.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NoFlyZoneRecord", into = "NoFlyZoneRecord")]
pub struct NoFlyZone {
    pub name: String,
    pub polygon: Polygon,
}

/// Wire shape of a no-fly zone: vertices as `[lng, lat]` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoFlyZoneRecord {
    pub name: String,
    pub coordinates: Vec<[f64; 2]>,
}

impl NoFlyZone {
    pub fn new(name: impl Into<String>, vertices: Vec<Position>) -> Result<Self, GeometryError> {
        Ok(Self {
            name: name.into(),
            polygon: Polygon::new(vertices)?,
        })
    }
}

impl TryFrom<NoFlyZoneRecord> for NoFlyZone {
    type Error = GeometryError;

    fn try_from(record: NoFlyZoneRecord) -> Result<Self, Self::Error> {
        let vertices = record
            .coordinates
            .iter()
            .map(|[lng, lat]| Position::new(*lng, *lat))
            .collect();
        NoFlyZone::new(record.name, vertices)
    }
}

impl From<NoFlyZone> for NoFlyZoneRecord {
    fn from(zone: NoFlyZone) -> Self {
        Self {
            name: zone.name,
            coordinates: zone
                .polygon
                .vertices()
                .iter()
                .map(|p| [p.lng, p.lat])
                .collect(),
        }
    }
}

/// Why a single move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    NoFlyZone,
    SecondCentralCrossing,
}

/// Outcome of checking one move against the zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCheck {
    /// The move is allowed; `crosses_central` is true if it crosses the
    /// central-area boundary.
    Allowed { crosses_central: bool },
    Rejected(MoveRejection),
}

/// Read-only snapshot of all zones for one planning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneMap {
    pub no_fly_zones: Vec<NoFlyZone>,
    pub central_area: Option<Polygon>,
}

impl ZoneMap {
    pub fn new(no_fly_zones: Vec<NoFlyZone>, central_area: Option<Polygon>) -> Self {
        Self {
            no_fly_zones,
            central_area,
        }
    }

    /// True if the segment intersects an edge of any no-fly zone.
    pub fn crosses_no_fly_zone(&self, from: Position, to: Position) -> bool {
        self.no_fly_zones
            .iter()
            .any(|zone| zone.polygon.is_crossed_by(from, to))
    }

    /// True if the segment intersects an edge of the central area.
    pub fn crosses_central_boundary(&self, from: Position, to: Position) -> bool {
        self.central_area
            .as_ref()
            .is_some_and(|area| area.is_crossed_by(from, to))
    }

    /// Name of the no-fly zone containing `point` (boundary inclusive).
    pub fn no_fly_zone_at(&self, point: Position) -> Option<&str> {
        self.no_fly_zones
            .iter()
            .find(|zone| zone.polygon.contains(point))
            .map(|zone| zone.name.as_str())
    }

    pub fn in_no_fly_zone(&self, point: Position) -> bool {
        self.no_fly_zone_at(point).is_some()
    }

    pub fn in_central_area(&self, point: Position) -> bool {
        self.central_area
            .as_ref()
            .is_some_and(|area| area.contains(point))
    }

    /// Check one move of a leg that has (or has not) already crossed the
    /// central boundary.
    pub fn check_move(&self, from: Position, to: Position, central_crossed: bool) -> MoveCheck {
        if self.crosses_no_fly_zone(from, to) {
            return MoveCheck::Rejected(MoveRejection::NoFlyZone);
        }
        let crosses_central = self.crosses_central_boundary(from, to);
        if crosses_central && central_crossed {
            return MoveCheck::Rejected(MoveRejection::SecondCentralCrossing);
        }
        MoveCheck::Allowed { crosses_central }
    }
}
