//! Delivery CLI - plans one day of deliveries and writes the result files.
//!
//! The `plan-deliveries` binary wires these pieces together:
//! - config: environment defaults for the run
//! - plan: order validation and scheduling over a fetched snapshot
//! - report: deliveries, flight path, and GeoJSON output files

pub mod config;
pub mod plan;
pub mod report;

pub use config::Config;
pub use plan::{plan_day, DayPlan};
pub use report::{write_reports, ReportPaths};
