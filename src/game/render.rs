use super::bonus::ActiveBonus;
use super::difficulty::{Difficulty, Speed};
use super::direction::{Direction, Velocity};
use super::grid::{Grid, Position};
use super::scheduler::{GameState, RunEnd};
use super::snake::Snake;
use crate::consts;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// A read-only view of everything needed to draw the game
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Snapshot<'a> {
    pub(crate) grid: Grid,
    pub(crate) snake: &'a Snake,
    pub(crate) velocity: Velocity,
    pub(crate) food: Option<Position>,
    pub(crate) bonus: Option<ActiveBonus>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) difficulty: Difficulty,
    pub(crate) speed: Speed,
    pub(crate) state: GameState,
    pub(crate) run_end: Option<RunEnd>,
    pub(crate) game_over_frame: u32,
}

impl Snapshot<'_> {
    /// Size of the bordered board, in terminal cells
    fn board_size(&self) -> Size {
        Size {
            width: self
                .grid
                .width()
                .saturating_mul(consts::CELL_COLUMNS)
                .saturating_add(2),
            height: self.grid.height().saturating_add(2),
        }
    }

    fn border_style(&self) -> Style {
        if self.state == GameState::GameOverAnimating
            && self.game_over_frame < consts::GAME_OVER_FLASH_FRAMES
            && self.game_over_frame % 4 < 2
        {
            consts::FLASH_STYLE
        } else {
            Style::default()
        }
    }

    fn head_symbol(&self) -> char {
        match self.velocity.direction() {
            Some(Direction::Up) => consts::SNAKE_HEAD_UP_SYMBOL,
            Some(Direction::Down) => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Some(Direction::Left) => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Some(Direction::Right) => consts::SNAKE_HEAD_RIGHT_SYMBOL,
            None => consts::SNAKE_HEAD_STILL_SYMBOL,
        }
    }

    fn score_line(&self) -> Line<'static> {
        Line::styled(
            format!(
                " Score: {}   High Score: {}   Difficulty: {}   Speed: {}",
                self.score, self.high_score, self.difficulty, self.speed
            ),
            consts::SCORE_BAR_STYLE,
        )
    }

    fn render_bonus_timer(&self, area: Rect, buf: &mut Buffer) {
        let Some(bonus) = self.bonus else {
            return;
        };
        let label = format!(" Bonus: {:>3} ", bonus.value());
        let full = area
            .width
            .saturating_sub(u16::try_from(label.len()).unwrap_or(u16::MAX))
            .saturating_sub(1);
        let total = consts::BONUS_LIFETIME.as_millis().max(1);
        let left = bonus.remaining().as_millis().min(total);
        let width = u16::try_from(u128::from(full) * left / total).unwrap_or(full);
        let bar = std::iter::repeat_n(consts::BONUS_TIMER_SYMBOL, usize::from(width))
            .collect::<String>();
        Line::from_iter([
            Span::styled(label, consts::BONUS_STYLE),
            Span::styled(bar, consts::BONUS_TIMER_STYLE),
        ])
        .render(area, buf);
    }

    fn render_messages(&self, msg1_area: Rect, msg2_area: Rect, buf: &mut Buffer) {
        match self.state {
            GameState::Idle => {
                Line::from_iter([
                    Span::raw(" Press "),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(" to start"),
                ])
                .render(msg1_area, buf);
                controls_line().render(msg2_area, buf);
            }
            GameState::GameOver => {
                let mut line = Line::from(format!(" Game Over! Your score: {}", self.score));
                if self.run_end == Some(RunEnd::Exhausted) {
                    line.push_span(" (the board is full!)");
                }
                line.render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Choose One: Restart ("),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(") — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            GameState::Running | GameState::Paused | GameState::GameOverAnimating => (),
        }
    }
}

impl Widget for Snapshot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, timer_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        self.score_line().render(score_area, buf);
        self.render_bonus_timer(timer_area, buf);

        let block_area = center_rect(board_area, self.board_size());
        Block::bordered()
            .border_style(self.border_style())
            .render(block_area, buf);
        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        if let Some(pos) = self.food {
            board.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        if let Some(bonus) = self.bonus {
            let symbol = if bonus.size() >= consts::BONUS_LARGE_SIZE {
                consts::BONUS_LARGE_SYMBOL
            } else {
                consts::BONUS_SMALL_SYMBOL
            };
            board.draw_cell(bonus.position(), symbol, consts::BONUS_STYLE);
        }
        for &p in self.snake.cells().iter().skip(1) {
            board.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        let head = self.snake.head();
        if self.run_end.is_some() {
            // A head that went through a wall is shown on the edge it hit
            let head = Position::new(
                head.x.min(i32::from(self.grid.width()) - 1).max(0),
                head.y.min(i32::from(self.grid.height()) - 1).max(0),
            );
            board.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            board.draw_cell(head, self.head_symbol(), consts::SNAKE_STYLE);
        }

        self.render_messages(msg1_area, msg2_area, buf);
    }
}

fn controls_line() -> Line<'static> {
    Line::from_iter([
        Span::raw(" Steer: "),
        Span::styled("← ↑ → ↓", consts::KEY_STYLE),
        Span::raw(" / "),
        Span::styled("wasd", consts::KEY_STYLE),
        Span::raw(" / "),
        Span::styled("hjkl", consts::KEY_STYLE),
        Span::raw(" — Pause: "),
        Span::styled("Esc", consts::KEY_STYLE),
        Span::raw(" / "),
        Span::styled("p", consts::KEY_STYLE),
    ])
}

/// Draws grid cells into a buffer, each cell
/// [`CELL_COLUMNS`][consts::CELL_COLUMNS] terminal columns wide
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let (Ok(col), Ok(row)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        let Some(x) = col
            .checked_mul(consts::CELL_COLUMNS)
            .and_then(|dx| self.area.x.checked_add(dx))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if !self.area.contains(ratatui::layout::Position { x, y }) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
