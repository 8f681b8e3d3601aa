use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Picks a food position uniformly among cells not occupied by the snake.
///
/// Returns `None` when the snake covers the whole grid, which the session
/// treats as a terminal condition. On a sparse board the position is found
/// by rejection sampling; once the snake covers more than half the grid the
/// free cells are enumerated directly so placement stays bounded as the
/// board fills up.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let total = bounds.total_cells();
    if snake.len() >= total {
        return None;
    }

    if snake.len() * 2 <= total {
        // At least half the cells are free: expected draws ≤ 2.
        loop {
            let candidate = Position {
                x: rng.gen_range(0..i32::from(bounds.width)),
                y: rng.gen_range(0..i32::from(bounds.height)),
            };
            if !snake.occupies(candidate) {
                return Some(candidate);
            }
        }
    }

    let candidates: Vec<Position> = free_cells(bounds, snake);
    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

fn free_cells(bounds: GridSize, snake: &Snake) -> Vec<Position> {
    let mut candidates = Vec::with_capacity(bounds.total_cells() - snake.len());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    candidates
}
