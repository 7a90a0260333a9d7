use crate::consts;
use std::collections::VecDeque;
use std::ops::Neg;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(crate) fn velocity(self) -> Velocity {
        match self {
            Direction::Up => Velocity::new(0, -1),
            Direction::Down => Velocity::new(0, 1),
            Direction::Left => Velocity::new(-1, 0),
            Direction::Right => Velocity::new(1, 0),
        }
    }
}

/// Per-tick displacement of the snake's head, in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Velocity {
    pub(crate) dx: i32,
    pub(crate) dy: i32,
}

impl Velocity {
    /// The velocity of a snake that has not started moving yet
    pub(crate) const STILL: Velocity = Velocity::new(0, 0);

    pub(crate) const fn new(dx: i32, dy: i32) -> Velocity {
        Velocity { dx, dy }
    }

    /// Can a snake moving with this velocity start moving in `dir` without
    /// doubling back on itself?
    pub(crate) fn allows_turn(self, dir: Direction) -> bool {
        dir.velocity() != -self
    }

    /// Return the direction this velocity points in, if any
    pub(crate) fn direction(self) -> Option<Direction> {
        match (self.dx, self.dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

impl Neg for Velocity {
    type Output = Velocity;

    fn neg(self) -> Velocity {
        Velocity::new(-self.dx, -self.dy)
    }
}

/// Direction changes entered by the player that have not been applied yet.
/// At most one is consumed per logic tick.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct DirectionQueue(VecDeque<Direction>);

impl DirectionQueue {
    pub(crate) fn new() -> DirectionQueue {
        DirectionQueue(VecDeque::with_capacity(consts::DIRECTION_QUEUE_DEPTH))
    }

    /// Append a direction change.  If the queue is already full, the oldest
    /// entry is discarded.
    pub(crate) fn push(&mut self, dir: Direction) {
        while self.0.len() >= consts::DIRECTION_QUEUE_DEPTH {
            let _ = self.0.pop_front();
        }
        self.0.push_back(dir);
    }

    pub(crate) fn pop(&mut self) -> Option<Direction> {
        self.0.pop_front()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
