use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighboring position one step in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Mutable snake state and movement buffering behavior.
///
/// The snake moves on an unbounded integer grid; keeping the head inside the
/// board is the session's job, not the snake's.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Direction,
    pending_heading: Direction,
    grow: bool,
}

impl Snake {
    /// Creates a snake of `length` segments with its head at `head`, laid
    /// contiguously along the heading axis with the body trailing behind.
    #[must_use]
    pub fn with_length(head: Position, heading: Direction, length: usize) -> Self {
        debug_assert!(length >= 1);

        let (dx, dy) = heading.delta();
        let body = (0..length as i32)
            .map(|i| Position {
                x: head.x - dx * i,
                y: head.y - dy * i,
            })
            .collect();

        Self {
            body,
            heading,
            pending_heading: heading,
            grow: false,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
            heading,
            pending_heading: heading,
            grow: false,
        }
    }

    /// Buffers `direction` to apply on the next movement tick.
    ///
    /// A request to reverse straight into the body is silently ignored; this
    /// is the sole guard against immediate self-collision from input. The
    /// buffer is a single slot with last-write-wins semantics, so several
    /// inputs between ticks leave only the most recent valid one in effect.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if !direction_change_is_valid(self.heading, direction) {
            return;
        }
        self.pending_heading = direction;
    }

    /// Applies one movement step using the buffered heading.
    ///
    /// Pushes the new head and pops the tail, unless a growth request is
    /// pending, in which case the tail stays and the flag is cleared. This
    /// is the only operation that changes head position or body length.
    pub fn move_forward(&mut self) {
        self.heading = self.pending_heading;
        let next_head = self.head().stepped(self.heading);

        self.body.push_front(next_head);
        if self.grow {
            self.grow = false;
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Queues growth for the next movement tick.
    ///
    /// Idempotent between ticks: however many times it is called before the
    /// next [`Snake::move_forward`], only one segment is added.
    pub fn grow_next(&mut self) {
        self.grow = true;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the heading applied by the most recent movement tick.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn with_length_lays_body_behind_head() {
        let snake = Snake::with_length(Position { x: 10, y: 10 }, Direction::Right, 3);

        let segments: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position { x: 10, y: 10 },
                Position { x: 9, y: 10 },
                Position { x: 8, y: 10 },
            ]
        );
        assert!(!snake.head_overlaps_body());
    }

    #[test]
    fn with_length_follows_vertical_headings() {
        let snake = Snake::with_length(Position { x: 4, y: 4 }, Direction::Up, 3);

        let segments: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position { x: 4, y: 4 },
                Position { x: 4, y: 5 },
                Position { x: 4, y: 6 },
            ]
        );
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::with_length(Position { x: 5, y: 5 }, Direction::Right, 3);

        snake.move_forward();

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = Snake::with_length(Position { x: 5, y: 5 }, Direction::Right, 1);

        snake.grow_next();
        snake.move_forward();

        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn repeated_growth_requests_add_one_segment() {
        let mut snake = Snake::with_length(Position { x: 5, y: 5 }, Direction::Right, 3);

        snake.grow_next();
        snake.grow_next();
        snake.grow_next();
        snake.move_forward();
        assert_eq!(snake.len(), 4);

        // The flag was consumed; the next move keeps the length.
        snake.move_forward();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut snake = Snake::with_length(Position { x: 5, y: 5 }, Direction::Up, 3);

        snake.buffer_direction(Direction::Down);
        snake.move_forward();

        assert_eq!(snake.head(), Position { x: 5, y: 4 });
        assert_eq!(snake.heading(), Direction::Up);
    }

    #[test]
    fn direction_buffer_is_last_write_wins() {
        let mut snake = Snake::with_length(Position { x: 5, y: 5 }, Direction::Right, 3);

        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Down);
        snake.move_forward();

        assert_eq!(snake.head(), Position { x: 5, y: 6 });
    }

    #[test]
    fn reversal_guard_checks_the_applied_heading() {
        let mut snake = Snake::with_length(Position { x: 5, y: 5 }, Direction::Right, 3);

        // Left is the opposite of the current heading even though Up is
        // already buffered, so it is dropped.
        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Left);
        snake.move_forward();

        assert_eq!(snake.head(), Position { x: 5, y: 4 });
    }

    #[test]
    fn move_never_reenters_the_neck() {
        let headings = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let inputs = headings;

        for heading in headings {
            for input in inputs {
                let mut snake = Snake::with_length(Position { x: 5, y: 5 }, heading, 3);
                let neck = Position { x: 5, y: 5 }.stepped(heading.opposite());

                snake.buffer_direction(input);
                snake.move_forward();

                assert_ne!(
                    snake.head(),
                    neck,
                    "heading {heading:?} with input {input:?} reversed into the neck",
                );
            }
        }
    }

    #[test]
    fn occupies_covers_every_segment() {
        let snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 1 },
            ],
            Direction::Right,
        );

        assert!(snake.occupies(Position { x: 2, y: 2 }));
        assert!(snake.occupies(Position { x: 1, y: 1 }));
        assert!(!snake.occupies(Position { x: 2, y: 1 }));
    }

    #[test]
    fn head_overlap_detects_self_collision() {
        let snake = Snake::from_segments(
            vec![
                Position { x: 1, y: 1 },
                Position { x: 2, y: 1 },
                Position { x: 2, y: 2 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 1 },
            ],
            Direction::Up,
        );

        assert!(snake.head_overlaps_body());
    }
}
