//! Validation and scheduling for one day's snapshot.

use chrono::NaiveDate;
use delivery_client::DaySnapshot;
use delivery_core::{deliver_orders, validate_orders, Drone, FlightRules, Order, OrderError, ScheduleReport};
use tracing::warn;

/// Result of planning one day.
#[derive(Debug, Clone)]
pub struct DayPlan {
    pub date: NaiveDate,
    /// Every order of the day with its final outcome, in input order
    pub orders: Vec<Order>,
    pub drone: Drone,
    pub schedule: ScheduleReport,
}

impl DayPlan {
    pub fn valid_count(&self) -> usize {
        self.orders.iter().filter(|o| o.outcome().is_valid()).count()
    }

    pub fn delivered_count(&self) -> usize {
        self.schedule.delivered.len()
    }
}

/// Validate the snapshot's orders and deliver as many as the budget allows.
pub fn plan_day(snapshot: &DaySnapshot, rules: &FlightRules) -> Result<DayPlan, OrderError> {
    let mut orders = validate_orders(&snapshot.orders, &snapshot.restaurants);
    for order in orders.iter().filter(|o| !o.outcome().is_valid()) {
        warn!(order_no = %order.order_no, outcome = %order.outcome(), "order failed validation");
    }

    let zones = snapshot.zone_map();
    let mut drone = Drone::from_rules(rules);
    let schedule = deliver_orders(&mut drone, &mut orders, &zones, rules)?;

    Ok(DayPlan {
        date: snapshot.date,
        orders,
        drone,
        schedule,
    })
}
