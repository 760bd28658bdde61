//! Discretized move model: sixteen compass headings and a fixed step length.

use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// Length of one drone move, in coordinate units (degrees).
pub const STEP_LENGTH: f64 = 0.00015;

/// One of the sixteen directions a drone can fly in.
///
/// Angles are measured in degrees counter-clockwise from east (the positive
/// longitude axis), so north is 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    E,
    ENE,
    NE,
    NNE,
    N,
    NNW,
    NW,
    WNW,
    W,
    WSW,
    SW,
    SSW,
    S,
    SSE,
    SE,
    ESE,
}

impl Heading {
    /// All headings in increasing angle, starting at east.
    pub const ALL: [Heading; 16] = [
        Heading::E,
        Heading::ENE,
        Heading::NE,
        Heading::NNE,
        Heading::N,
        Heading::NNW,
        Heading::NW,
        Heading::WNW,
        Heading::W,
        Heading::WSW,
        Heading::SW,
        Heading::SSW,
        Heading::S,
        Heading::SSE,
        Heading::SE,
        Heading::ESE,
    ];

    /// Angle in degrees from east, in `[0, 360)`.
    pub fn angle(self) -> f64 {
        self as u8 as f64 * 22.5
    }

    /// The heading pointing the opposite way.
    pub fn opposite(self) -> Heading {
        Heading::ALL[(self as usize + 8) % 16]
    }
}

impl Position {
    /// Position after one standard step. `None` hovers in place.
    pub fn next_position(self, heading: Option<Heading>) -> Position {
        next_position(self, heading)
    }

    /// Position after one step of the given length.
    pub fn step(self, heading: Option<Heading>, step_length: f64) -> Position {
        match heading {
            None => self,
            Some(heading) => {
                let radians = heading.angle().to_radians();
                Position::new(
                    self.lng + step_length * radians.cos(),
                    self.lat + step_length * radians.sin(),
                )
            }
        }
    }
}

/// Position reached from `pos` after one [`STEP_LENGTH`] move.
pub fn next_position(pos: Position, heading: Option<Heading>) -> Position {
    pos.step(heading, STEP_LENGTH)
}
