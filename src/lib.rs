//! Simulation core for a grid-based snake game.
//!
//! Pure logic with no I/O: the presentation layer reads snapshot state once
//! per repaint and an input layer feeds [`GameInput`] events in. A fixed
//! interval driver owned by the host calls [`GameSession::tick`].

pub mod config;
pub mod events;
pub mod food;
pub mod game;
pub mod input;
pub mod snake;

pub use config::{ConfigError, GameConfig, GridSize};
pub use events::GameEvent;
pub use game::{GameSession, GameStatus};
pub use input::{Direction, GameInput};
pub use snake::{Position, Snake};
