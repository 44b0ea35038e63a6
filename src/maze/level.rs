//! Level Definitions
//!
//! Immutable level records and the ordered catalog the engine plays
//! through. Levels are validated once, when a catalog is built, so the
//! engine can treat every catalog entry as well-formed.

use std::collections::BTreeSet;
use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::grid::GridPos;

/// Level validation and loading errors.
#[derive(Debug, Error)]
pub enum LevelError {
    /// Width or height is zero.
    #[error("level dimensions must be positive, got {width}x{height}")]
    EmptyDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
    },
    /// A start or goal marker lies outside the grid.
    #[error("{marker} at {pos} is outside the grid")]
    MarkerOutOfBounds {
        /// Marker name (`player1`, `goal2`, ...)
        marker: &'static str,
        /// Offending position
        pos: GridPos,
    },
    /// A wall lies outside the grid.
    #[error("wall at {pos} is outside the grid")]
    WallOutOfBounds {
        /// Offending position
        pos: GridPos,
    },
    /// A wall covers a start or goal cell.
    #[error("wall at {pos} covers {marker}")]
    WallOnMarker {
        /// Marker name
        marker: &'static str,
        /// Offending position
        pos: GridPos,
    },
    /// Catalog has no levels.
    #[error("level catalog is empty")]
    EmptyCatalog,
    /// No mirrored move sequence reaches both goals.
    #[error("level {index} has no solution")]
    Unsolvable {
        /// Catalog index
        index: usize,
    },
    /// A catalog entry failed validation.
    #[error("level {index}: {source}")]
    InLevel {
        /// Catalog index
        index: usize,
        /// Underlying problem
        #[source]
        source: Box<LevelError>,
    },
    /// Malformed JSON.
    #[error("level data parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Catalog file could not be read.
    #[error("level data read error: {0}")]
    Io(#[from] std::io::Error),
}

/// One immutable maze layout.
///
/// The JSON shape matches the level files the puzzle schedule stores:
/// `{width, height, player1, player2, goal1, goal2, walls}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Player 1 spawn
    #[serde(rename = "player1")]
    pub player1_start: GridPos,
    /// Player 2 spawn
    #[serde(rename = "player2")]
    pub player2_start: GridPos,
    /// Player 1 target
    pub goal1: GridPos,
    /// Player 2 target
    pub goal2: GridPos,
    /// Impassable cells
    #[serde(default)]
    pub walls: BTreeSet<GridPos>,
}

impl Level {
    /// Check the structural invariants of a level.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelError::EmptyDimensions { width: self.width, height: self.height });
        }

        for (marker, pos) in self.markers() {
            if !pos.in_bounds(self.width, self.height) {
                return Err(LevelError::MarkerOutOfBounds { marker, pos });
            }
        }

        for wall in &self.walls {
            if !wall.in_bounds(self.width, self.height) {
                return Err(LevelError::WallOutOfBounds { pos: *wall });
            }
            if let Some((marker, _)) = self.markers().into_iter().find(|(_, p)| p == wall) {
                return Err(LevelError::WallOnMarker { marker, pos: *wall });
            }
        }

        Ok(())
    }

    /// Whether a token may stand on `pos`.
    #[inline]
    pub fn is_open(&self, pos: GridPos) -> bool {
        pos.in_bounds(self.width, self.height) && !self.walls.contains(&pos)
    }

    fn markers(&self) -> [(&'static str, GridPos); 4] {
        [
            ("player1", self.player1_start),
            ("player2", self.player2_start),
            ("goal1", self.goal1),
            ("goal2", self.goal2),
        ]
    }
}

/// Ordered, non-empty sequence of validated levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Build a catalog, validating every level.
    pub fn new(levels: Vec<Level>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }
        for (index, level) in levels.iter().enumerate() {
            level.validate().map_err(|e| LevelError::InLevel { index, source: Box::new(e) })?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Read a JSON catalog from disk.
    pub fn from_path(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The five shipped levels.
    pub fn builtin() -> Self {
        Self::new(builtin_levels()).expect("built-in levels are valid")
    }

    /// Check that every level can be finished.
    pub fn validate_solvable(&self) -> Result<(), LevelError> {
        for (index, level) in self.levels.iter().enumerate() {
            if crate::maze::solver::solve(level).is_none() {
                return Err(LevelError::Unsolvable { index });
            }
        }
        Ok(())
    }

    /// Level at `index`.
    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// First level. A constructed catalog is never empty.
    pub fn first(&self) -> &Level {
        &self.levels[0]
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterate in play order.
    pub fn iter(&self) -> std::slice::Iter<'_, Level> {
        self.levels.iter()
    }
}

// =============================================================================
// BUILT-IN LEVELS
// =============================================================================

fn walls(cells: &[(i32, i32)]) -> BTreeSet<GridPos> {
    cells.iter().map(|&(x, y)| GridPos::new(x, y)).collect()
}

/// Square level with both players starting in opposite corners and the
/// goals in the two remaining corners, one cell in from the edge.
fn corner_level(size: u32, wall_cells: &[(i32, i32)]) -> Level {
    let far = size as i32 - 2;
    Level {
        width: size,
        height: size,
        player1_start: GridPos::new(1, 1),
        player2_start: GridPos::new(far, far),
        goal1: GridPos::new(far, 1),
        goal2: GridPos::new(1, far),
        walls: walls(wall_cells),
    }
}

fn builtin_levels() -> Vec<Level> {
    vec![
        // Zigzag paths
        corner_level(8, &[
            (2, 2), (2, 3), (2, 4), (2, 5),
            (3, 1), (3, 2), (3, 3), (3, 4),
            (4, 3), (4, 4), (4, 5), (4, 6),
            (5, 2), (5, 3), (5, 4), (5, 5),
        ]),
        // Spiral maze
        corner_level(10, &[
            (2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7),
            (3, 2), (3, 7),
            (4, 2), (4, 3), (4, 4), (4, 5), (4, 6), (4, 7),
            (5, 2), (5, 7),
            (6, 2), (6, 3), (6, 4), (6, 5), (6, 6), (6, 7),
            (7, 2), (7, 7),
        ]),
        // Complex crossing
        corner_level(12, &[
            (2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7), (2, 8), (2, 9),
            (9, 2), (9, 3), (9, 4), (9, 5), (9, 6), (9, 7), (9, 8), (9, 9),
            (3, 2), (4, 2), (5, 2), (6, 2), (7, 2), (8, 2),
            (3, 9), (4, 9), (5, 9), (6, 9), (7, 9), (8, 9),
            (4, 4), (4, 5), (4, 6), (4, 7),
            (7, 4), (7, 5), (7, 6), (7, 7),
            (5, 3), (5, 4), (5, 5),
            (6, 6), (6, 7), (6, 8),
        ]),
        // Multiple paths with dead ends
        corner_level(14, &[
            (2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7), (2, 8), (2, 9), (2, 10), (2, 11),
            (11, 2), (11, 3), (11, 4), (11, 5), (11, 6), (11, 7), (11, 8), (11, 9), (11, 10), (11, 11),
            (3, 2), (4, 2), (5, 2), (6, 2), (7, 2), (8, 2), (9, 2), (10, 2),
            (3, 11), (4, 11), (5, 11), (6, 11), (7, 11), (8, 11), (9, 11), (10, 11),
            (4, 4), (4, 5), (4, 6), (4, 7), (4, 8), (4, 9),
            (9, 4), (9, 5), (9, 6), (9, 7), (9, 8), (9, 9),
            (6, 3), (6, 4), (6, 5), (6, 6),
            (7, 7), (7, 8), (7, 9), (7, 10),
            (5, 6), (5, 7), (5, 8),
            (8, 5), (8, 6), (8, 7),
        ]),
        // Ultimate challenge
        corner_level(16, &[
            (2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7), (2, 8), (2, 9), (2, 10), (2, 11), (2, 12), (2, 13),
            (13, 2), (13, 3), (13, 4), (13, 5), (13, 6), (13, 7), (13, 8), (13, 9), (13, 10), (13, 11), (13, 12), (13, 13),
            (3, 2), (4, 2), (5, 2), (6, 2), (7, 2), (8, 2), (9, 2), (10, 2), (11, 2), (12, 2),
            (3, 13), (4, 13), (5, 13), (6, 13), (7, 13), (8, 13), (9, 13), (10, 13), (11, 13), (12, 13),
            (4, 4), (4, 5), (4, 6), (4, 7), (4, 8), (4, 9), (4, 10), (4, 11),
            (11, 4), (11, 5), (11, 6), (11, 7), (11, 8), (11, 9), (11, 10), (11, 11),
            (6, 4), (6, 5), (6, 6), (6, 7), (6, 8), (6, 9),
            (9, 4), (9, 5), (9, 6), (9, 7), (9, 8), (9, 9),
            (5, 3), (5, 4), (5, 5), (5, 6),
            (10, 8), (10, 9), (10, 10), (10, 11),
            (7, 5), (7, 6), (7, 7), (7, 8),
            (8, 6), (8, 7), (8, 8), (8, 9),
        ]),
    ]
}

// =============================================================================
// TESTS
// =============================================================================
