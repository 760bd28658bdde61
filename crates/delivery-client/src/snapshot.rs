//! One day's worth of input data, fetched together.

use chrono::NaiveDate;
use delivery_core::{GeometryError, NoFlyZone, OrderRecord, Polygon, Position, Restaurant, ZoneMap};
use serde::{Deserialize, Serialize};

/// Everything a planning run reads from the REST service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub restaurants: Vec<Restaurant>,
    pub orders: Vec<OrderRecord>,
    pub no_fly_zones: Vec<NoFlyZone>,
    pub central_area: Polygon,
}

impl DaySnapshot {
    /// Zones for the path finder, in service order.
    pub fn zone_map(&self) -> ZoneMap {
        ZoneMap::new(self.no_fly_zones.clone(), Some(self.central_area.clone()))
    }
}

/// The service sends the central area as a list of named corner points.
pub fn central_area_from_points(points: Vec<Position>) -> Result<Polygon, GeometryError> {
    Polygon::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTRAL_AREA: &str = r#"[
        {"name": "Forrest Hill", "longitude": -3.192473, "latitude": 55.946233},
        {"name": "KFC", "longitude": -3.184319, "latitude": 55.946233},
        {"name": "Buccleuch St bus stop", "longitude": -3.184319, "latitude": 55.942617},
        {"name": "Top of the Meadows", "longitude": -3.192473, "latitude": 55.942617}
    ]"#;

    const NO_FLY_ZONES: &str = r#"[
        {
            "name": "George Square Area",
            "coordinates": [
                [-3.190578818321228, 55.94402412577528],
                [-3.1899887323379517, 55.94284650540911],
                [-3.187097311019897, 55.94328811724263],
                [-3.187682032585144, 55.944477740393744],
                [-3.190578818321228, 55.94402412577528]
            ]
        }
    ]"#;

    #[test]
    fn test_central_area_fixture() {
        let points: Vec<Position> = serde_json::from_str(CENTRAL_AREA).unwrap();
        let area = central_area_from_points(points).unwrap();
        assert_eq!(area.vertices().len(), 4);
        assert!(area.contains(Position::new(-3.186874, 55.944494)));
        assert!(!area.contains(Position::new(-3.202541470527649, 55.943284737579376)));
    }

    #[test]
    fn test_central_area_needs_three_points() {
        let points = vec![Position::new(0.0, 0.0), Position::new(1.0, 0.0)];
        assert_eq!(
            central_area_from_points(points),
            Err(GeometryError::TooFewVertices(2))
        );
    }

    #[test]
    fn test_zone_map_from_fixtures() {
        let points: Vec<Position> = serde_json::from_str(CENTRAL_AREA).unwrap();
        let snapshot = DaySnapshot {
            date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            restaurants: vec![],
            orders: vec![],
            no_fly_zones: serde_json::from_str(NO_FLY_ZONES).unwrap(),
            central_area: central_area_from_points(points).unwrap(),
        };

        let zones = snapshot.zone_map();
        assert_eq!(zones.no_fly_zones.len(), 1);
        assert_eq!(zones.no_fly_zones[0].polygon.vertices().len(), 4);
        assert!(zones.in_central_area(Position::new(-3.186874, 55.944494)));
        assert_eq!(
            zones.no_fly_zone_at(Position::new(-3.1889, 55.9437)),
            Some("George Square Area")
        );
    }
}
