use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConfigError, GameConfig};
use crate::events::GameEvent;
use crate::food;
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// Complete mutable simulation state for one session.
///
/// Owns the snake, the food cell, the score, and the state machine. The
/// host drives it with [`GameSession::tick`] on a fixed interval and feeds
/// input through [`GameSession::apply_input`]; the presentation layer reads
/// the public fields once per repaint. The core is single-threaded: a
/// multi-threaded host wraps the whole session in one mutex.
pub struct GameSession {
    pub snake: Snake,
    pub food: Position,
    pub score: u32,
    pub status: GameStatus,
    config: GameConfig,
    rng: StdRng,
    listeners: Vec<Box<dyn FnMut(GameEvent)>>,
}

impl GameSession {
    /// Creates a session from a validated configuration.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = initial_snake(&config);
        let food = food::spawn_position(&mut rng, config.grid, &snake)
            .expect("validated config leaves at least one free cell");

        Ok(Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Playing,
            config,
            rng,
            listeners: Vec::new(),
        })
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Registers a listener for [`GameEvent`]s.
    ///
    /// Listeners are invoked synchronously during the tick that produced
    /// the event and survive [`GameSession::reset`].
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(GameEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Reinitializes snake, food, score, and status to a fresh Playing
    /// session. The RNG stream and registered listeners are kept.
    pub fn reset(&mut self) {
        self.snake = initial_snake(&self.config);
        self.food = food::spawn_position(&mut self.rng, self.config.grid, &self.snake)
            .expect("validated config leaves at least one free cell");
        self.score = 0;
        self.status = GameStatus::Playing;
    }

    /// Advances the simulation by one tick.
    ///
    /// Outside Playing this is a no-op that mutates nothing. Within a tick
    /// the wall and self-collision checks run strictly after the move and
    /// strictly before the food check, so a move that both collides and
    /// lands on food ends the game without awarding score.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.snake.move_forward();

        let head = self.snake.head();
        if !head.is_within_bounds(self.config.grid) {
            self.finish_game();
            return;
        }

        if self.snake.head_overlaps_body() {
            self.finish_game();
            return;
        }

        if head == self.food {
            self.snake.grow_next();
            self.score += self.config.food_reward;
            self.emit(GameEvent::FoodEaten { position: head });

            match food::spawn_position(&mut self.rng, self.config.grid, &self.snake) {
                Some(position) => self.food = position,
                // The snake covers the whole grid; nothing left to eat.
                None => self.finish_game(),
            }
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.set_direction(direction),
            GameInput::Pause => self.pause(),
            GameInput::Resume => self.resume(),
            GameInput::Restart => self.restart(),
        }
    }

    /// Buffers a direction change for the next tick.
    ///
    /// Forwarded to the snake only while Playing; direction input while
    /// Paused or after game over is ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Playing {
            self.snake.buffer_direction(direction);
        }
    }

    /// Pauses a running session. No-op outside Playing.
    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
        }
    }

    /// Resumes a paused session. No-op outside Paused.
    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
        }
    }

    /// Restarts the session from any state via [`GameSession::reset`].
    pub fn restart(&mut self) {
        self.reset();
    }

    fn finish_game(&mut self) {
        self.status = GameStatus::GameOver;
        let score = self.score;
        self.emit(GameEvent::GameOver { score });
    }

    fn emit(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("snake", &self.snake)
            .field("food", &self.food)
            .field("score", &self.score)
            .field("status", &self.status)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builds the starting snake: head at the grid center, body trailing
/// opposite the initial heading.
fn initial_snake(config: &GameConfig) -> Snake {
    Snake::with_length(
        config.start_position(),
        config.initial_heading,
        usize::from(config.initial_snake_length),
    )
}
