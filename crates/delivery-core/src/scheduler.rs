//! Greedy delivery scheduling against the drone's move budget.
//!
//! Orders are ranked by the length of their round trip from the drone's
//! start. The cheapest is then re-planned from wherever the drone currently
//! is and committed if the budget covers it; scheduling stops at the first
//! order the remaining budget cannot cover.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::geometry::Position;
use crate::models::{DroneMove, Order, OrderError, RestaurantRef};
use crate::pathfinder::{NoRoute, PathFinder, Route};
use crate::rules::FlightRules;
use crate::zones::ZoneMap;

/// The drone's position, battery, and flight log for one day.
#[derive(Debug, Clone)]
pub struct Drone {
    start: Position,
    position: Position,
    move_budget: u32,
    moves_remaining: u32,
    moves: Vec<DroneMove>,
}

impl Drone {
    pub fn new(start: Position, move_budget: u32) -> Self {
        Self {
            start,
            position: start,
            move_budget,
            moves_remaining: move_budget,
            moves: Vec::new(),
        }
    }

    pub fn from_rules(rules: &FlightRules) -> Self {
        Self::new(rules.start, rules.move_budget)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn move_budget(&self) -> u32 {
        self.move_budget
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    /// Every committed move, in flight order.
    pub fn moves(&self) -> &[DroneMove] {
        &self.moves
    }

    pub fn can_afford(&self, moves: usize) -> bool {
        moves <= self.moves_remaining as usize
    }

    /// Fly a planned sequence. Callers check [`Drone::can_afford`] first.
    fn commit(&mut self, planned: Vec<DroneMove>) {
        debug_assert!(self.can_afford(planned.len()));
        for planned_move in planned {
            self.position = planned_move.to;
            self.moves_remaining -= 1;
            self.moves.push(planned_move);
        }
    }
}

/// Summary of one scheduling run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleReport {
    /// Delivered order numbers, in delivery order
    pub delivered: Vec<String>,
    /// Valid orders left undelivered
    pub pending: Vec<String>,
    /// Pending orders that had no feasible round trip
    pub unreachable: Vec<String>,
    pub moves_used: usize,
    pub moves_remaining: u32,
    pub final_position: Option<Position>,
}

/// Plans round trips and commits them to a drone.
#[derive(Debug)]
pub struct DeliveryScheduler<'a> {
    finder: PathFinder<'a>,
}

impl<'a> DeliveryScheduler<'a> {
    pub fn new(zones: &'a ZoneMap, rules: &FlightRules) -> Self {
        Self {
            finder: PathFinder::new(zones, rules),
        }
    }

    /// Plan collection from `restaurant` starting at `from`, then delivery
    /// back to `home`, with a hover at both ends.
    pub fn plan_round_trip(
        &mut self,
        order_no: &str,
        restaurant: &RestaurantRef,
        from: Position,
        home: Position,
    ) -> Result<Vec<DroneMove>, NoRoute> {
        let outbound = self.finder.find_path(from, restaurant.location)?;
        let inbound = self.finder.find_path(outbound.end(), home)?;

        let mut planned = Vec::with_capacity(outbound.len() + inbound.len() + 2);
        self.append_leg(&mut planned, order_no, &outbound);
        self.append_leg(&mut planned, order_no, &inbound);
        Ok(planned)
    }

    fn append_leg(&mut self, planned: &mut Vec<DroneMove>, order_no: &str, leg: &Route) {
        planned.extend(leg.steps.iter().map(|step| DroneMove {
            order_no: order_no.to_string(),
            from: step.from,
            to: step.to,
            heading: Some(step.heading),
            tick: step.tick,
        }));
        let hover_at = leg.end();
        planned.push(DroneMove {
            order_no: order_no.to_string(),
            from: hover_at,
            to: hover_at,
            heading: None,
            tick: self.finder.next_tick(),
        });
    }

    /// Deliver as many pending orders as the drone's budget allows.
    ///
    /// Delivered orders transition to `Delivered`; every other order keeps its
    /// outcome.
    pub fn deliver_orders(
        &mut self,
        drone: &mut Drone,
        orders: &mut [Order],
    ) -> Result<ScheduleReport, OrderError> {
        let mut report = ScheduleReport::default();
        let mut queue: BinaryHeap<Reverse<(usize, usize)>> = BinaryHeap::new();

        for (index, order) in orders.iter().enumerate() {
            let Some(restaurant) = order.restaurant().filter(|_| order.is_pending()) else {
                continue;
            };
            match self.plan_round_trip(&order.order_no, restaurant, drone.start(), drone.start()) {
                Ok(planned) => queue.push(Reverse((planned.len(), index))),
                Err(reason) => {
                    warn!(order_no = %order.order_no, %reason, "order has no feasible route");
                    report.unreachable.push(order.order_no.clone());
                }
            }
        }
        debug!(feasible = queue.len(), "ranked orders by round-trip length");

        while let Some(Reverse((estimate, index))) = queue.pop() {
            let order = &orders[index];
            let Some(restaurant) = order.restaurant() else {
                continue;
            };

            let planned = match self.plan_round_trip(
                &order.order_no,
                restaurant,
                drone.position(),
                drone.start(),
            ) {
                Ok(planned) => planned,
                Err(reason) => {
                    warn!(order_no = %order.order_no, %reason, "order unreachable from current position");
                    report.unreachable.push(order.order_no.clone());
                    continue;
                }
            };

            if !drone.can_afford(planned.len()) {
                debug!(
                    order_no = %order.order_no,
                    estimate,
                    needed = planned.len(),
                    remaining = drone.moves_remaining(),
                    "budget exhausted"
                );
                break;
            }

            let needed = planned.len();
            drone.commit(planned);
            orders[index].mark_delivered()?;
            info!(
                order_no = %orders[index].order_no,
                moves = needed,
                remaining = drone.moves_remaining(),
                "order delivered"
            );
            report.delivered.push(orders[index].order_no.clone());
        }

        report.pending = orders
            .iter()
            .filter(|order| order.is_pending())
            .map(|order| order.order_no.clone())
            .collect();
        report.moves_used = drone.moves().len();
        report.moves_remaining = drone.moves_remaining();
        report.final_position = Some(drone.position());
        Ok(report)
    }
}

/// Run one day's scheduling with a fresh path finder.
pub fn deliver_orders(
    drone: &mut Drone,
    orders: &mut [Order],
    zones: &ZoneMap,
    rules: &FlightRules,
) -> Result<ScheduleReport, OrderError> {
    DeliveryScheduler::new(zones, rules).deliver_orders(drone, orders)
}
