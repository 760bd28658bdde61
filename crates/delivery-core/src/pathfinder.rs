//! Weighted A* search over the implicit step graph.
//!
//! Every node has up to sixteen neighbours, one per [`Heading`]. Moves that
//! touch a no-fly zone, or that would cross the central-area boundary a second
//! time on the same leg, are pruned. The search succeeds as soon as a
//! generated neighbour lies within one step of the target, so routes end
//! close to, not exactly on, their target.
//!
//! Nodes live in an arena and refer to their parent by index. Search states
//! are deduplicated through a [`StateKey`] that rounds positions to a tenth of
//! a step, so a walled-in region has finitely many states and its search
//! runs dry instead of spinning until the expansion limit.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::geometry::Position;
use crate::heading::Heading;
use crate::rules::FlightRules;
use crate::zones::{MoveCheck, ZoneMap};

/// State keys are spaced this fraction of a step apart.
const KEY_RESOLUTION: f64 = 0.1;

/// Why no route could be produced for a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoRoute {
    #[error("search space exhausted after {expanded} expansions")]
    SearchExhausted { expanded: usize },
    #[error("search gave up after {0} expansions")]
    ExpansionLimit(usize),
    #[error("route endpoint lies inside a no-fly zone")]
    EndpointInNoFlyZone,
}

/// One move of a planned leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub from: Position,
    pub to: Position,
    pub heading: Heading,
    /// Path finder tick at which this step was generated
    pub tick: u64,
}

/// A one-way leg, as a sequence of single-step moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub start: Position,
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// A leg that needs no moves because start is already close to the target.
    pub fn empty(start: Position) -> Self {
        Self {
            start,
            steps: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Where the leg finishes.
    pub fn end(&self) -> Position {
        self.steps.last().map(|step| step.to).unwrap_or(self.start)
    }

    /// Number of moves that cross the central-area boundary.
    pub fn central_crossings(&self, zones: &ZoneMap) -> usize {
        self.steps
            .iter()
            .filter(|step| zones.crosses_central_boundary(step.from, step.to))
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    x: i64,
    y: i64,
    central_crossed: bool,
}

/// Best `f` at which each state was expanded.
#[derive(Debug, Default)]
struct ClosedSet {
    best: HashMap<StateKey, f64>,
}

impl ClosedSet {
    /// Mark `key` expanded at `f_score`. Returns false if it was already
    /// expanded at least as cheaply, in which case the caller skips it.
    fn close(&mut self, key: StateKey, f_score: f64) -> bool {
        match self.best.get(&key) {
            Some(&closed_f) if closed_f <= f_score => false,
            _ => {
                self.best.insert(key, f_score);
                true
            }
        }
    }

    /// Whether a candidate should go on the open set. A closed entry with a
    /// strictly higher `f` is evicted so the state can be expanded again.
    fn admit(&mut self, key: StateKey, f_score: f64) -> bool {
        match self.best.get(&key) {
            None => true,
            Some(&closed_f) if closed_f > f_score => {
                self.best.remove(&key);
                true
            }
            Some(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    position: Position,
    parent: Option<usize>,
    heading: Option<Heading>,
    steps: u32,
    central_crossed: bool,
    tick: u64,
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Open-set entry. Equal `f` scores fall back to insertion order so the
/// search is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f_score: FloatOrd,
    seq: u64,
    index: usize,
}

/// Plans single legs against a fixed zone snapshot.
///
/// The path finder keeps a tick counter across searches: every generated node
/// advances it, so ticks on planned moves increase monotonically over a run.
#[derive(Debug)]
pub struct PathFinder<'a> {
    zones: &'a ZoneMap,
    step_length: f64,
    heuristic_weight: f64,
    max_expansions: usize,
    ticks: u64,
}

impl<'a> PathFinder<'a> {
    pub fn new(zones: &'a ZoneMap, rules: &FlightRules) -> Self {
        Self {
            zones,
            step_length: rules.step_length,
            heuristic_weight: rules.heuristic_weight,
            max_expansions: rules.max_expansions,
            ticks: 0,
        }
    }

    /// Current tick counter value.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the tick counter by one and return the new value.
    pub fn next_tick(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }

    /// Find a route from `start` to within one step of `end`.
    pub fn find_path(&mut self, start: Position, end: Position) -> Result<Route, NoRoute> {
        if start.is_within(&end, self.step_length) {
            return Ok(Route::empty(start));
        }
        if self.zones.in_no_fly_zone(start) || self.zones.in_no_fly_zone(end) {
            return Err(NoRoute::EndpointInNoFlyZone);
        }

        let target_in_central = self.zones.in_central_area(end);
        // A crossing onto the far side from the target is a dead end, unless
        // the target is close enough to the boundary to finish from there.
        let prune_far_side = self
            .zones
            .central_area
            .as_ref()
            .is_some_and(|area| area.distance_to_boundary(end) >= self.step_length);
        let mut arena: Vec<SearchNode> = vec![SearchNode {
            position: start,
            parent: None,
            heading: None,
            steps: 0,
            central_crossed: false,
            tick: self.ticks,
        }];
        let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
        let mut closed_set = ClosedSet::default();
        let mut seq = 0u64;
        let mut expanded = 0usize;

        open_set.push(Reverse(OpenNode {
            f_score: FloatOrd(self.f_score(0, start, end)),
            seq,
            index: 0,
        }));

        while let Some(Reverse(current)) = open_set.pop() {
            let node = arena[current.index];
            let current_key = self.key(node.position, node.central_crossed);
            if !closed_set.close(current_key, current.f_score.0) {
                continue;
            }

            expanded += 1;
            if expanded > self.max_expansions {
                debug!(
                    from = ?start,
                    to = ?end,
                    expanded,
                    "search hit expansion limit"
                );
                return Err(NoRoute::ExpansionLimit(self.max_expansions));
            }

            for heading in Heading::ALL {
                let next = node.position.step(Some(heading), self.step_length);
                let central_crossed = match self.zones.check_move(
                    node.position,
                    next,
                    node.central_crossed,
                ) {
                    MoveCheck::Rejected(_) => continue,
                    MoveCheck::Allowed { crosses_central } => {
                        if prune_far_side
                            && crosses_central
                            && self.zones.in_central_area(next) != target_in_central
                        {
                            continue;
                        }
                        node.central_crossed || crosses_central
                    }
                };

                self.ticks += 1;
                let candidate = SearchNode {
                    position: next,
                    parent: Some(current.index),
                    heading: Some(heading),
                    steps: node.steps + 1,
                    central_crossed,
                    tick: self.ticks,
                };

                if next.is_within(&end, self.step_length) {
                    arena.push(candidate);
                    let route = build_route(&arena, arena.len() - 1);
                    debug!(
                        from = ?start,
                        to = ?end,
                        expanded,
                        steps = route.len(),
                        "route found"
                    );
                    return Ok(route);
                }

                let f_score = self.f_score(candidate.steps, next, end);
                if !closed_set.admit(self.key(next, central_crossed), f_score) {
                    continue;
                }

                arena.push(candidate);
                seq += 1;
                open_set.push(Reverse(OpenNode {
                    f_score: FloatOrd(f_score),
                    seq,
                    index: arena.len() - 1,
                }));
            }
        }

        debug!(from = ?start, to = ?end, expanded, "search exhausted");
        Err(NoRoute::SearchExhausted { expanded })
    }

    /// `g + w * h`, with `h` the straight-line distance in steps.
    fn f_score(&self, steps: u32, position: Position, target: Position) -> f64 {
        let h_score = position.distance_to(&target) / self.step_length;
        steps as f64 + self.heuristic_weight * h_score
    }

    fn key(&self, position: Position, central_crossed: bool) -> StateKey {
        let scale = 1.0 / (self.step_length * KEY_RESOLUTION);
        StateKey {
            x: (position.lng * scale).round() as i64,
            y: (position.lat * scale).round() as i64,
            central_crossed,
        }
    }
}

fn build_route(arena: &[SearchNode], last: usize) -> Route {
    let mut steps = Vec::new();
    let mut cursor = last;
    while let Some(parent) = arena[cursor].parent {
        let node = &arena[cursor];
        if let Some(heading) = node.heading {
            steps.push(RouteStep {
                from: arena[parent].position,
                to: node.position,
                heading,
                tick: node.tick,
            });
        }
        cursor = parent;
    }
    steps.reverse();

    Route {
        start: arena[cursor].position,
        steps,
    }
}
