use super::direction::Velocity;
use super::grid::Position;
use std::collections::VecDeque;

/// The snake's body
///
/// The cells are stored head first, so iteration order is body order.  There
/// is always at least one cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(super) cells: VecDeque<Position>,
}

impl Snake {
    /// Create a new snake consisting of just a head at `head`
    pub(crate) fn new(head: Position) -> Snake {
        Snake {
            cells: VecDeque::from([head]),
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.cells[0]
    }

    /// Return the positions of all of the snake's cells, head first
    pub(crate) fn cells(&self) -> &VecDeque<Position> {
        &self.cells
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Push a new head one step from the current one in the direction of
    /// `velocity` and return its position.  The tail is left in place; call
    /// [`Snake::drop_tail()`] unless the snake is growing.
    pub(crate) fn advance(&mut self, velocity: Velocity) -> Position {
        let head = self.head().step(velocity);
        self.cells.push_front(head);
        head
    }

    /// Remove the last cell of the snake, as long as that leaves at least the
    /// head
    pub(crate) fn drop_tail(&mut self) {
        if self.cells.len() > 1 {
            let _ = self.cells.pop_back();
        }
    }

    /// Does the head occupy the same cell as any other part of the snake?
    pub(crate) fn bites_itself(&self) -> bool {
        let head = self.head();
        self.cells.iter().skip(1).any(|&p| p == head)
    }

    /// Is `pos` within `distance` cells (in any direction, diagonals
    /// included) of some part of the snake?
    pub(crate) fn is_near(&self, pos: Position, distance: u32) -> bool {
        self.cells.iter().any(|&p| p.chebyshev(pos) <= distance)
    }
}
