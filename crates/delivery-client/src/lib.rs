//! Delivery client - REST access to the day's restaurants, orders, and zones.

pub mod client;
pub mod snapshot;

pub use client::{ClientError, RestClient};
pub use snapshot::{central_area_from_points, DaySnapshot};
