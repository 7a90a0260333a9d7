use super::bonus::{BonusFood, BonusTimer};
use super::difficulty::{Difficulty, Speed};
use super::direction::{Direction, DirectionQueue, Velocity};
use super::food::{FoodSpawner, SpawnExhausted};
use super::grid::{Grid, Position};
use super::notify::Notification;
use super::snake::Snake;
use crate::consts;
use rand::Rng;
use std::time::Duration;

/// The state of one game of snake and the rules for advancing it
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Simulation {
    grid: Grid,
    spawner: FoodSpawner,
    snake: Snake,
    velocity: Velocity,
    queue: DirectionQueue,
    food: Option<Position>,
    bonus: BonusFood,
    bonus_timer: BonusTimer,
    score: u32,
    high_score: u32,
    /// Whether the high score has been beaten during the current run
    beat_high_score: bool,
    difficulty: Difficulty,
    speed: Speed,
}

impl Simulation {
    pub(crate) fn new(grid: Grid, difficulty: Difficulty, high_score: u32) -> Simulation {
        Simulation {
            grid,
            spawner: FoodSpawner::new(grid),
            snake: Snake::new(consts::SNAKE_ORIGIN),
            velocity: Velocity::STILL,
            queue: DirectionQueue::new(),
            food: None,
            bonus: BonusFood::Inactive,
            bonus_timer: BonusTimer::default(),
            score: 0,
            high_score,
            beat_high_score: false,
            difficulty,
            speed: difficulty.profile().initial_speed,
        }
    }

    /// Put everything back the way it is at the start of a run on the given
    /// tier.  The high score and the food are kept.
    pub(crate) fn reset(&mut self, difficulty: Difficulty) {
        self.snake = Snake::new(consts::SNAKE_ORIGIN);
        self.velocity = Direction::Right.velocity();
        self.queue.clear();
        self.bonus.clear();
        self.bonus_timer.reset();
        self.score = 0;
        self.beat_high_score = false;
        self.difficulty = difficulty;
        self.speed = difficulty.profile().initial_speed;
    }

    /// Place the regular food if there is none or if it is on or next to the
    /// snake
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is nowhere to put the food.
    pub(crate) fn ensure_food<R: Rng>(&mut self, rng: &mut R) -> Result<(), SpawnExhausted> {
        if self.food.is_none_or(|pos| self.snake.is_near(pos, 1)) {
            self.food = Some(self.spawner.place(rng, &self.snake, None)?);
        }
        Ok(())
    }

    pub(crate) fn queue_direction(&mut self, dir: Direction) {
        self.queue.push(dir);
        tracing::trace!(?dir, pending = self.queue.len(), "Queued direction change");
    }

    pub(crate) fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Advance the game by one logic tick: turn, move, eat, then check for
    /// collisions.  If the snake survives and new food could be placed, bonus
    /// food may appear.
    pub(crate) fn tick<R: Rng>(&mut self, rng: &mut R) -> TickReport {
        let mut report = TickReport::default();
        if let Some(dir) = self.queue.pop() {
            if self.velocity.allows_turn(dir) {
                self.velocity = dir.velocity();
            }
        }
        let head = self.snake.advance(self.velocity);
        if self.food == Some(head) {
            let before = self.score;
            self.score = self.score.saturating_add(consts::FOOD_REWARD);
            // The milestone announcement stands in for the usual one
            if crossed(before, self.score, consts::MILESTONE_INTERVAL) {
                report.notifications.push(Notification::CrossedMilestone);
            } else {
                report.notifications.push(Notification::AteFood);
            }
            self.record_high_score(&mut report);
            if crossed(before, self.score, consts::SPEED_UP_INTERVAL) {
                let speed = self.speed.accelerate(self.difficulty.profile().increment);
                if speed != self.speed {
                    tracing::debug!(from = %self.speed, to = %speed, "Speeding up");
                    self.speed = speed;
                    report.speed_changed = true;
                }
            }
            self.food = match self.spawner.place(rng, &self.snake, None) {
                Ok(pos) => Some(pos),
                Err(e) => {
                    tracing::warn!(score = self.score, "{e}");
                    report.exhausted = Some(e);
                    None
                }
            };
        } else if self.bonus.position() == Some(head) {
            if let Some(value) = self.bonus.consume() {
                self.score = self.score.saturating_add(value);
                report.notifications.push(Notification::AteBonus);
                self.record_high_score(&mut report);
            }
            self.snake.drop_tail();
        } else {
            self.snake.drop_tail();
        }

        if !self.grid.contains(head) {
            report.collision = Some(Collision::Wall);
        } else if self.snake.bites_itself() {
            report.collision = Some(Collision::Body);
        } else if report.exhausted.is_none() {
            self.maybe_spawn_bonus(rng);
        }
        report
    }

    fn record_high_score(&mut self, report: &mut TickReport) {
        if self.score > self.high_score {
            self.high_score = self.score;
            report.high_score_changed = true;
            if !self.beat_high_score {
                self.beat_high_score = true;
                report.notifications.push(Notification::BeatHighScore);
            }
        }
    }

    fn maybe_spawn_bonus<R: Rng>(&mut self, rng: &mut R) {
        let interval = self.difficulty.profile().bonus_interval;
        if self.bonus_timer.tick(interval)
            && !self.bonus.is_active()
            && rng.random_bool(consts::BONUS_SPAWN_PROBABILITY)
        {
            match self.spawner.place(rng, &self.snake, self.food) {
                Ok(pos) => {
                    tracing::debug!(x = pos.x, y = pos.y, "Bonus food appeared");
                    self.bonus.spawn(pos);
                }
                Err(e) => tracing::warn!("Could not place bonus food: {e}"),
            }
        }
    }

    /// Let `elapsed` real time pass for the bonus food
    pub(crate) fn decay_bonus(&mut self, elapsed: Duration) {
        if self.bonus.decay(elapsed) {
            tracing::debug!("Bonus food expired");
        }
    }

    /// Switch the run to a different tier, recomputing the speed as though
    /// the run had been on that tier from the start.  Returns `true` if the
    /// speed changed.
    pub(crate) fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        let speed = difficulty.profile().speed_at(self.score);
        tracing::info!(
            %difficulty,
            score = self.score,
            from = %self.speed,
            to = %speed,
            "Reconciled speed with new difficulty"
        );
        self.difficulty = difficulty;
        let changed = speed != self.speed;
        self.speed = speed;
        changed
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    pub(crate) fn bonus(&self) -> &BonusFood {
        &self.bonus
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(crate) fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub(crate) fn speed(&self) -> Speed {
        self.speed
    }
}

#[cfg(test)]
impl Simulation {
    pub(super) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub(super) fn set_snake(&mut self, cells: &[(i32, i32)]) {
        self.snake = Snake {
            cells: cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
        };
    }

    pub(super) fn set_food(&mut self, pos: Position) {
        self.food = Some(pos);
    }
}

/// Did going from `before` to `after` pass (or land on) a multiple of `n`?
fn crossed(before: u32, after: u32, n: u32) -> bool {
    before / n != after / n
}

/// What happened during a logic tick
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TickReport {
    pub(crate) notifications: Vec<Notification>,
    /// Set if the snake ran into something, ending the run
    pub(crate) collision: Option<Collision>,
    pub(crate) speed_changed: bool,
    pub(crate) high_score_changed: bool,
    /// Set if the snake ate the food and there was nowhere left to put a new
    /// one, ending the run
    pub(crate) exhausted: Option<SpawnExhausted>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The head left the grid
    Wall,
    /// The head ran into the rest of the snake
    Body,
}
