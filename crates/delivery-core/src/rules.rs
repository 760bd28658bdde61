//! Flight rules and limits for the delivery drone.

use serde::{Deserialize, Serialize};

use crate::geometry::Position;
use crate::heading::STEP_LENGTH;

/// Appleton Tower, where the drone starts and delivers every order.
pub const APPLETON_TOWER: Position = Position::new(-3.186874, 55.944494);

/// Configuration for one day of deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRules {
    /// Where the drone takes off and returns each order to
    pub start: Position,
    /// Total moves the battery allows per day
    pub move_budget: u32,
    /// Length of one move in coordinate units
    pub step_length: f64,
    /// Weight applied to the A* heuristic (1.0 is plain A*)
    pub heuristic_weight: f64,
    /// Node expansions after which a single search gives up
    pub max_expansions: usize,
}

impl Default for FlightRules {
    fn default() -> Self {
        Self {
            start: APPLETON_TOWER,
            move_budget: 2000,
            step_length: STEP_LENGTH,
            heuristic_weight: 1.5,
            max_expansions: 100_000,
        }
    }
}

impl FlightRules {
    pub fn with_start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    pub fn with_move_budget(mut self, move_budget: u32) -> Self {
        self.move_budget = move_budget;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}
