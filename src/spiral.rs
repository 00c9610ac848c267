use crate::grid::{CellPos, Grid};
use serde::{Deserialize, Serialize};

/// Leg direction, visited clockwise starting with `Up`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit step. `Up` is +y.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn clockwise(&self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// What the walker does when a leg ends and the turn leaves it standing on
/// the cell it returned last time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPolicy {
    /// Re-check the unmoved cell and return it again if it is still free.
    /// A caller that commits every returned cell never sees a repeat.
    #[default]
    Revisit,
    /// Only return after at least one step of movement in the same call.
    AlwaysAdvance,
}

/// Progress through the current spiral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub current: CellPos,
    pub step_size: i32,
    pub direction: Direction,
    pub steps_taken: i32,
}

impl Leg {
    fn start(origin: CellPos) -> Self {
        Leg {
            current: origin,
            step_size: 1,
            direction: Direction::Up,
            steps_taken: 0,
        }
    }

    /// One step along the leg, or a turn if the leg is used up.
    /// Returns true if the walker moved.
    fn advance(&mut self) -> bool {
        if self.steps_taken < self.step_size {
            let (dx, dy) = self.direction.delta();
            self.current = self.current.offset(dx, dy);
            self.steps_taken += 1;
            true
        } else {
            self.direction = self.direction.clockwise();
            self.steps_taken = 0;
            // Legs grow after each vertical+horizontal pair
            if self.direction.is_vertical() {
                self.step_size += 1;
            }
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerState {
    Uninitialized,
    Active(Leg),
    /// The spiral left the grid. Stays here until `reset`.
    Exhausted,
}

/// Yields free cells along a clockwise square spiral around an origin.
#[derive(Debug, Clone)]
pub struct SpiralWalker {
    state: WalkerState,
    policy: TurnPolicy,
}

impl Default for SpiralWalker {
    fn default() -> Self {
        Self::new(TurnPolicy::default())
    }
}

impl SpiralWalker {
    pub fn new(policy: TurnPolicy) -> Self {
        SpiralWalker {
            state: WalkerState::Uninitialized,
            policy,
        }
    }

    pub fn state(&self) -> WalkerState {
        self.state
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == WalkerState::Exhausted
    }

    /// Forget all progress. The next call to `next_cell` starts a new spiral.
    pub fn reset(&mut self) {
        self.state = WalkerState::Uninitialized;
    }

    /// Next free cell on the spiral. `origin` is only read on the first
    /// call after a reset. Returns `None` once the spiral leaves the grid.
    pub fn next_cell(&mut self, grid: &Grid, origin: CellPos) -> Option<CellPos> {
        let mut leg = match self.state {
            WalkerState::Uninitialized => Leg::start(origin),
            WalkerState::Active(leg) => leg,
            WalkerState::Exhausted => return None,
        };

        let mut moved = false;
        loop {
            moved |= leg.advance();

            if !grid.is_inside_bounds(leg.current) {
                log::debug!(
                    "Spiral around ({}, {}) left the grid at ({}, {})",
                    origin.x,
                    origin.y,
                    leg.current.x,
                    leg.current.y
                );
                self.state = WalkerState::Exhausted;
                return None;
            }

            let may_return = moved || self.policy == TurnPolicy::Revisit;
            if may_return && grid.is_valid(leg.current) {
                self.state = WalkerState::Active(leg);
                return Some(leg.current);
            }
        }
    }
}
