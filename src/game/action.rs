/// Compass direction of travel on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// Grid axis a direction moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

impl Direction {
    /// Returns the unit grid delta (dx, dz) for this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::East | Direction::West => Axis::X,
            Direction::North | Direction::South => Axis::Z,
        }
    }

    /// Turn lock: steering input whose axis matches the current motion axis
    /// is ignored, so only 90-degree turns register. This also rules out
    /// reversing straight into the neck.
    pub fn blocks(&self, requested: Direction) -> bool {
        self.axis() == requested.axis()
    }
}

/// What the snake does at a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerAction {
    /// Adopt a new direction before moving
    Turn(Direction),
    /// Keep moving in the current direction
    Continue,
}

impl From<Direction> for SteerAction {
    fn from(direction: Direction) -> Self {
        SteerAction::Turn(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.delta(), (0, -1));
        assert_eq!(Direction::South.delta(), (0, 1));
        assert_eq!(Direction::East.delta(), (1, 0));
        assert_eq!(Direction::West.delta(), (-1, 0));
    }

    #[test]
    fn test_axis() {
        assert_eq!(Direction::East.axis(), Axis::X);
        assert_eq!(Direction::West.axis(), Axis::X);
        assert_eq!(Direction::North.axis(), Axis::Z);
        assert_eq!(Direction::South.axis(), Axis::Z);
    }

    #[test]
    fn test_same_axis_input_is_blocked() {
        // Reversal is blocked
        assert!(Direction::East.blocks(Direction::West));
        assert!(Direction::North.blocks(Direction::South));
        // So is repeating the current direction
        assert!(Direction::East.blocks(Direction::East));

        // Perpendicular turns are allowed
        assert!(!Direction::East.blocks(Direction::North));
        assert!(!Direction::East.blocks(Direction::South));
        assert!(!Direction::South.blocks(Direction::West));
    }
}
