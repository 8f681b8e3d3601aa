use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Direction;
use crate::snake::Position;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default initial snake length in segments.
pub const DEFAULT_INITIAL_SNAKE_LENGTH: u16 = 3;

/// Default score awarded per food eaten.
pub const DEFAULT_FOOD_REWARD: u32 = 10;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Errors raised when validating a session configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("initial snake length must be at least 1")]
    ZeroSnakeLength,
    #[error("initial snake length {length} does not fit a {width}x{height} grid")]
    SnakeDoesNotFit {
        length: u16,
        width: u16,
        height: u16,
    },
    #[error("initial snake length {length} leaves no free cell for food on a {width}x{height} grid")]
    NoRoomForFood {
        length: u16,
        width: u16,
        height: u16,
    },
}

/// Session construction parameters.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid: GridSize,
    pub initial_snake_length: u16,
    pub initial_heading: Direction,
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            initial_snake_length: DEFAULT_INITIAL_SNAKE_LENGTH,
            initial_heading: Direction::Right,
            food_reward: DEFAULT_FOOD_REWARD,
        }
    }
}

impl GameConfig {
    /// Returns the starting head position, at the grid center.
    #[must_use]
    pub fn start_position(&self) -> Position {
        Position {
            x: i32::from(self.grid.width / 2),
            y: i32::from(self.grid.height / 2),
        }
    }

    /// Validates the configuration.
    ///
    /// Rejects empty grids, a zero-length snake, an initial body that would
    /// not fit behind the centered head, and a body that would fill the
    /// grid outright, so a session built from a valid configuration always
    /// starts fully inside the grid with a free cell left for food.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::ZeroSnakeLength);
        }

        // The body extends opposite the heading from the centered head;
        // the tail segment is the furthest out and must stay in bounds.
        let (dx, dy) = self.initial_heading.delta();
        let head = self.start_position();
        let span = i32::from(self.initial_snake_length) - 1;
        let tail = Position {
            x: head.x - dx * span,
            y: head.y - dy * span,
        };
        if !tail.is_within_bounds(self.grid) {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        // Food needs somewhere to spawn: the initial body must leave at
        // least one grid cell free.
        if usize::from(self.initial_snake_length) >= self.grid.total_cells() {
            return Err(ConfigError::NoRoomForFood {
                length: self.initial_snake_length,
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        Ok(())
    }
}
