use super::grid::{Grid, Position};
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use thiserror::Error;

/// Chooses where to put regular and bonus food
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FoodSpawner {
    grid: Grid,
    attempts: u32,
}

impl FoodSpawner {
    pub(crate) fn new(grid: Grid) -> FoodSpawner {
        FoodSpawner {
            grid,
            attempts: consts::SPAWN_ATTEMPTS,
        }
    }

    /// Pick a random interior cell that is neither on nor next to the snake
    /// and, if `excluding` is given, neither on nor next to that cell.
    ///
    /// Random cells are tried up to a fixed number of times; if none of them
    /// are usable, a random choice is made from all usable cells instead.
    ///
    /// # Errors
    ///
    /// Returns `Err` if no interior cell is usable.
    pub(crate) fn place<R: Rng>(
        &self,
        rng: &mut R,
        snake: &Snake,
        excluding: Option<Position>,
    ) -> Result<Position, SpawnExhausted> {
        let usable = |pos: Position| {
            !snake.is_near(pos, 1) && excluding.is_none_or(|ex| ex.chebyshev(pos) > 1)
        };
        let (xs, ys) = self.grid.interior();
        if xs.is_empty() || ys.is_empty() {
            return Err(SpawnExhausted);
        }
        for _ in 0..self.attempts {
            let candidate = Position::new(rng.random_range(xs.clone()), rng.random_range(ys.clone()));
            if usable(candidate) {
                return Ok(candidate);
            }
        }
        self.grid
            .interior_cells()
            .filter(|&pos| usable(pos))
            .choose(rng)
            .ok_or(SpawnExhausted)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no free cell left on the grid for food")]
pub(crate) struct SpawnExhausted;
