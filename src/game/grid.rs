use super::direction::Velocity;
use crate::consts;
use ratatui::layout::Size;
use std::ops::Range;

/// A cell on the game grid.  Coordinates are signed so that a head which has
/// just run off the edge of the grid can still be represented.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// Return the cell reached by moving one step with `velocity`
    pub(crate) fn step(self, velocity: Velocity) -> Position {
        Position {
            x: self.x.saturating_add(velocity.dx),
            y: self.y.saturating_add(velocity.dy),
        }
    }

    /// Return the Chebyshev ("king's move") distance between two cells
    pub(crate) fn chebyshev(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// The dimensions of the playing field, in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub(crate) const fn new(width: u16, height: u16) -> Grid {
        Grid { width, height }
    }

    /// Divide a canvas measured in canvas units into
    /// [`CELL_SIZE`][consts::CELL_SIZE]-unit cells
    pub(crate) fn from_canvas(canvas: Size) -> Grid {
        Grid::new(
            canvas.width / consts::CELL_SIZE,
            canvas.height / consts::CELL_SIZE,
        )
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    /// Is `pos` on the grid?
    pub(crate) fn contains(self, pos: Position) -> bool {
        (0..i32::from(self.width)).contains(&pos.x) && (0..i32::from(self.height)).contains(&pos.y)
    }

    /// Return the x and y ranges of the cells that are not on the outermost
    /// ring of the grid.  Either range may be empty on tiny grids.
    pub(crate) fn interior(self) -> (Range<i32>, Range<i32>) {
        (
            1..i32::from(self.width) - 1,
            1..i32::from(self.height) - 1,
        )
    }

    /// Iterate over every interior cell, row by row
    pub(crate) fn interior_cells(self) -> impl Iterator<Item = Position> {
        let (xs, ys) = self.interior();
        ys.flat_map(move |y| xs.clone().map(move |x| Position::new(x, y)))
    }
}
