use super::action::Direction;
use super::config::Mode;
use std::time::Duration;

/// A cell on the game grid; the plane is y-flat so only (x, z) exist here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// The cell one step away in a direction
    pub fn neighbor(&self, direction: Direction) -> Self {
        let (dx, dz) = direction.delta();
        self.offset(dx, dz)
    }
}

/// The snake: an ordered chain of cells with the head at index 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<Cell>,
    pub direction: Direction,
}

impl Snake {
    /// Create a snake of the given length with trailing segments laid out
    /// behind the head, opposite the direction of travel
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let (dx, dz) = direction.delta();
        let mut segments = vec![head];
        for i in 1..length {
            let prev = segments[i - 1];
            segments.push(prev.offset(-dx, -dz));
        }
        Self {
            segments,
            direction,
        }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());
        Self {
            segments,
            direction,
        }
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn tail(&self) -> Cell {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether any segment (head and tail included) sits on the cell.
    /// Used for the pre-move collision check and food placement.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Advance by one cell: every segment takes the position of the one
    /// ahead of it, tail to head, then the head takes the candidate cell.
    /// Deliberately the O(n) shift, matching the observable step order.
    pub fn advance(&mut self, candidate: Cell) {
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] = candidate;
    }

    /// Append a new tail segment, used on growth with the cell the old
    /// tail just vacated
    pub fn grow_tail(&mut self, cell: Cell) {
        self.segments.push(cell);
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Classic only: the head left the grid
    OffScreen,
    /// The head ran into the body
    SelfCollision,
}

impl EndReason {
    pub fn label(&self) -> &'static str {
        match self {
            EndReason::OffScreen => "off-screen",
            EndReason::SelfCollision => "self-collision",
        }
    }
}

/// Complete mutable state of one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub mode: Mode,
    /// Grid half-span; both axes cover [-boundary, boundary)
    pub boundary: i32,
    pub score: u32,
    pub foods_eaten: u32,
    /// Current simulation interval; Modern mode shortens this mid-round
    pub step_interval: Duration,
    /// Set exactly once per round, on the terminal transition
    pub over: Option<EndReason>,
}

impl GameState {
    pub fn new(
        snake: Snake,
        food: Cell,
        mode: Mode,
        boundary: i32,
        step_interval: Duration,
    ) -> Self {
        Self {
            snake,
            food,
            mode,
            boundary,
            score: 0,
            foods_eaten: 0,
            step_interval,
            over: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.over.is_some()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= -self.boundary
            && cell.x < self.boundary
            && cell.z >= -self.boundary
            && cell.z < self.boundary
    }

    /// Wrap a cell onto the torus so both coordinates land back in
    /// [-boundary, boundary)
    pub fn wrap(&self, cell: Cell) -> Cell {
        let span = self.boundary * 2;
        let fold = |v: i32| (v + self.boundary).rem_euclid(span) - self.boundary;
        Cell::new(fold(cell.x), fold(cell.z))
    }
}
