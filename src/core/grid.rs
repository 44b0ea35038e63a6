//! Grid Coordinates and Directions
//!
//! Integer cell coordinates with y growing downward (screen order).

use std::fmt;
use serde::{Serialize, Deserialize};

/// A cell on a level grid.
///
/// Implements Ord so wall sets can live in a BTreeSet with a stable
/// iteration order (by x, then y).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    /// Column
    pub x: i32,
    /// Row (0 = top)
    pub y: i32,
}

impl GridPos {
    /// Create a position from raw coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a direction.
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Translate against a direction (the mirrored step).
    #[inline]
    pub fn step_mirrored(self, dir: Direction) -> Self {
        self.step(dir.opposite())
    }

    /// Check bounds for a `width` x `height` grid.
    #[inline]
    pub fn in_bounds(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four arrow-key / swipe directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// ArrowUp: (0, -1)
    Up = 0,
    /// ArrowDown: (0, 1)
    Down = 1,
    /// ArrowLeft: (-1, 0)
    Left = 2,
    /// ArrowRight: (1, 0)
    Right = 3,
}

impl Direction {
    /// All directions, in solver expansion order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit displacement `(dx, dy)`.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The reverse direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Build from a unit delta. Anything but the four unit vectors is `None`.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Map a touch swipe to a direction.
    ///
    /// Horizontal wins only when strictly dominant. A zero-length swipe
    /// maps to `Up`.
    pub fn from_swipe(dx: f32, dy: f32) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Direction::Right } else { Direction::Left }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Parse a browser `KeyboardEvent.key` name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}
