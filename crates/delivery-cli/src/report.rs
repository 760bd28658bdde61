//! Result files for a planned day.
//!
//! Three files are written per date: the outcome of every order, every drone
//! move, and the drone's track as a GeoJSON `LineString`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use delivery_core::{DroneMove, Order, OrderOutcome, Position};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::plan::DayPlan;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryRecord<'a> {
    order_no: &'a str,
    outcome: OrderOutcome,
    cost_in_pence: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FlightPathRecord<'a> {
    order_no: &'a str,
    from_longitude: f64,
    from_latitude: f64,
    angle: Option<f64>,
    to_longitude: f64,
    to_latitude: f64,
    ticks_since_start_of_calculation: u64,
}

/// Where each result file was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub deliveries: PathBuf,
    pub flight_path: PathBuf,
    pub drone: PathBuf,
}

impl ReportPaths {
    pub fn new(dir: &Path, date: NaiveDate) -> Self {
        let date = date.format("%Y-%m-%d");
        Self {
            deliveries: dir.join(format!("deliveries-{date}.json")),
            flight_path: dir.join(format!("flightpath-{date}.json")),
            drone: dir.join(format!("drone-{date}.geojson")),
        }
    }
}

pub fn deliveries_json(orders: &[Order]) -> Value {
    let records: Vec<DeliveryRecord<'_>> = orders
        .iter()
        .map(|order| DeliveryRecord {
            order_no: &order.order_no,
            outcome: order.outcome(),
            cost_in_pence: order.price_total_in_pence,
        })
        .collect();
    json!(records)
}

/// Hovers carry a null angle.
pub fn flight_path_json(moves: &[DroneMove]) -> Value {
    let records: Vec<FlightPathRecord<'_>> = moves
        .iter()
        .map(|m| FlightPathRecord {
            order_no: &m.order_no,
            from_longitude: m.from.lng,
            from_latitude: m.from.lat,
            angle: m.angle(),
            to_longitude: m.to.lng,
            to_latitude: m.to.lat,
            ticks_since_start_of_calculation: m.tick,
        })
        .collect();
    json!(records)
}

pub fn drone_geojson(start: Position, moves: &[DroneMove]) -> Value {
    let coordinates: Vec<[f64; 2]> = std::iter::once(start)
        .chain(moves.iter().map(|m| m.to))
        .map(|p| [p.lng, p.lat])
        .collect();
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
        }],
    })
}

/// Write all three result files into `dir`, creating it if needed.
pub fn write_reports(plan: &DayPlan, dir: &Path) -> Result<ReportPaths> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let paths = ReportPaths::new(dir, plan.date);
    write_json(&paths.deliveries, &deliveries_json(&plan.orders))?;
    write_json(&paths.flight_path, &flight_path_json(plan.drone.moves()))?;
    write_json(
        &paths.drone,
        &drone_geojson(plan.drone.start(), plan.drone.moves()),
    )?;

    info!(dir = %dir.display(), date = %plan.date, "wrote result files");
    Ok(paths)
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}
